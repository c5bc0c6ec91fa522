//! iconsprite - a runtime SVG sprite-sheet compositor
//!
//! Collects individual SVG icon files referenced by logical asset handles,
//! inlines their markup into one shared sprite document (printed once per
//! page), and renders lightweight `<svg><use>` references so the same icon
//! markup is never repeated. Untrusted SVG input is merged through an
//! allow-list sanitization boundary.
//!
//! # Example
//!
//! ```no_run
//! use iconsprite::{AssetDefinition, AttributeMap, Sprite, SpriteConfig};
//!
//! let config = SpriteConfig::new().with_svg_directory("theme/icons");
//! let mut sprite = Sprite::new(config);
//! sprite.add_asset(AssetDefinition::new("menu", "menu.svg"))?;
//!
//! // Printed once, right after the opening body content:
//! let sheet = sprite.sheet();
//!
//! // Wherever the icon is used:
//! let mut attrs = AttributeMap::new();
//! attrs.insert("height".into(), "16".into());
//! let icon = sprite.render_symbol("menu", &attrs);
//! # Ok::<(), iconsprite::SpriteError>(())
//! ```

pub mod allowed;
pub mod dimensions;
pub mod dom;
pub mod error;
pub mod loader;
pub mod manifest;
pub mod sanitize;
pub mod sprite;
mod symbol;

pub use allowed::AllowedHtml;
pub use dimensions::Dimensions;
pub use error::SpriteError;
pub use manifest::{ManifestError, SpriteManifest};
pub use sanitize::{MarkupFilter, Sanitizer};
pub use sprite::{AssetDefinition, Sprite, SVG_NAMESPACE};

use std::path::PathBuf;

use indexmap::IndexMap;

/// Ordered attribute mapping. Merging is overwrite-by-key: later layers win,
/// and a key keeps the position of its first appearance.
pub type AttributeMap = IndexMap<String, String>;

/// Configuration for a [`Sprite`], passed at construction time.
///
/// These are the explicit replacements for the host-side filter hooks: the
/// base SVG directory, attributes applied to every rendered symbol, and
/// extra sprite-sheet allow-list entries.
#[derive(Debug, Clone)]
pub struct SpriteConfig {
    /// Base directory for relative asset paths.
    pub svg_directory: PathBuf,
    /// Attributes applied to every rendered symbol (lowest merge priority).
    pub global_attributes: AttributeMap,
    /// Extra allow-list entries for sprite sheet output, e.g. `xmlns:*`
    /// attributes the defaults do not cover.
    pub sprite_allowed_extra: AllowedHtml,
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            svg_directory: PathBuf::from("."),
            global_attributes: AttributeMap::new(),
            sprite_allowed_extra: AllowedHtml::new(),
        }
    }
}

impl SpriteConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base directory for relative asset paths
    pub fn with_svg_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.svg_directory = directory.into();
        self
    }

    /// Add an attribute applied to every rendered symbol
    pub fn with_global_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.global_attributes.insert(name.into(), value.into());
        self
    }

    /// Allow an extra tag (and attributes) through sprite sheet sanitization
    pub fn with_sprite_allowance(mut self, tag: &str, attrs: &[&str]) -> Self {
        self.sprite_allowed_extra.allow_element(tag);
        for attr in attrs {
            self.sprite_allowed_extra.allow_attr(tag, attr);
        }
        self
    }
}
