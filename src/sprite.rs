//! The sprite compositor
//!
//! One [`Sprite`] owns the shared sprite document for a page: a hidden root
//! `<svg>` whose children are `<symbol>` wrappers, one per registered asset
//! handle. Composition happens during a registration phase; rendering reads
//! the map afterwards. Hosts that share a sprite across threads wrap
//! composition in their own mutual exclusion.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::allowed::AllowedHtml;
use crate::dimensions::resolve_dimensions;
use crate::dom::{Element, Node};
use crate::error::SpriteError;
use crate::loader::load_svg_root;
use crate::sanitize::{MarkupFilter, Sanitizer};
use crate::{AttributeMap, SpriteConfig};

/// Namespace attribute stamped onto the sprite root.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// A single icon registered with the sprite.
///
/// The `handle` is the case-sensitive identity; `src` is an absolute path or
/// a path relative to the configured SVG directory. Attributes ride along to
/// every render of the symbol, and gain the resolved intrinsic `width` and
/// `height` during ingestion.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetDefinition {
    pub handle: String,
    pub src: PathBuf,
    pub attributes: AttributeMap,
    /// Collaborator-decided inclusion gate; `false` skips the asset silently.
    pub condition: bool,
}

impl AssetDefinition {
    pub fn new(handle: impl Into<String>, src: impl Into<PathBuf>) -> Self {
        Self {
            handle: handle.into(),
            src: src.into(),
            attributes: AttributeMap::new(),
            condition: true,
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_condition(mut self, condition: bool) -> Self {
        self.condition = condition;
        self
    }
}

/// The shared sprite document plus its bookkeeping.
///
/// Owned by the host application's composition root; tests build fresh
/// instances instead of resetting shared state.
pub struct Sprite {
    pub(crate) config: SpriteConfig,
    pub(crate) root: Element,
    pub(crate) asset_handles: Vec<String>,
    pub(crate) sprite_map: IndexMap<String, AssetDefinition>,
    pub(crate) sprite_allowed: AllowedHtml,
    pub(crate) symbol_allowed: AllowedHtml,
    pub(crate) sanitizer: Box<dyn Sanitizer + Send + Sync>,
}

impl Sprite {
    /// Create an empty sprite document: `<svg style="display:none">` in the
    /// SVG namespace, no symbols yet.
    pub fn new(config: SpriteConfig) -> Self {
        let mut root = Element::new("svg");
        root.set_attr("style", "display:none");
        root.set_attr("xmlns", SVG_NAMESPACE);

        let mut sprite_allowed = AllowedHtml::sprite_defaults();
        sprite_allowed.merge(&config.sprite_allowed_extra);

        Self {
            config,
            root,
            asset_handles: Vec::new(),
            sprite_map: IndexMap::new(),
            sprite_allowed,
            symbol_allowed: AllowedHtml::symbol_defaults(),
            sanitizer: Box::new(MarkupFilter),
        }
    }

    /// Replace the built-in [`MarkupFilter`] with the host's sanitizer.
    pub fn with_sanitizer<S>(mut self, sanitizer: S) -> Self
    where
        S: Sanitizer + Send + Sync + 'static,
    {
        self.sanitizer = Box::new(sanitizer);
        self
    }

    pub fn config(&self) -> &SpriteConfig {
        &self.config
    }

    /// Registered handles in insertion order.
    pub fn handles(&self) -> &[String] {
        &self.asset_handles
    }

    /// The stored definition for a handle, if composition succeeded for it.
    pub fn get_asset(&self, handle: &str) -> Option<&AssetDefinition> {
        self.sprite_map.get(handle)
    }

    /// The allow-list guarding sprite sheet output.
    pub fn sprite_allowed(&self) -> &AllowedHtml {
        &self.sprite_allowed
    }

    /// The allow-list guarding rendered symbol output.
    pub fn symbol_allowed(&self) -> &AllowedHtml {
        &self.symbol_allowed
    }

    /// The symbol id derived from an asset handle.
    pub fn symbol_id(handle: &str) -> String {
        format!("am-symbol-{handle}")
    }

    /// Absolute paths pass through; relative paths join the configured base
    /// directory.
    pub(crate) fn normalize_filepath(&self, src: &Path) -> PathBuf {
        if src.as_os_str().is_empty() || src.is_absolute() {
            src.to_path_buf()
        } else {
            self.config.svg_directory.join(src)
        }
    }

    /// Add an asset's markup to the sprite as a `<symbol>`.
    ///
    /// Every recoverable failure (gated-off condition, unloadable or invalid
    /// file) is a silent no-op: the asset simply does not appear, and
    /// [`get_asset`](Self::get_asset) confirms whether it did. The one hard
    /// error is re-adding a handle that is already in the sprite.
    pub fn add_asset(&mut self, mut asset: AssetDefinition) -> Result<(), SpriteError> {
        if !asset.condition {
            return Ok(());
        }
        if self.sprite_map.contains_key(&asset.handle) {
            return Err(SpriteError::DuplicateHandle(asset.handle));
        }

        let src = self.normalize_filepath(&asset.src);
        let Some(svg) = load_svg_root(&src) else {
            return Ok(());
        };

        // Intrinsic size, stored on the definition so a render with only one
        // dimension can derive the other from the aspect ratio.
        let dimensions = resolve_dimensions(&svg, &asset.attributes);
        if dimensions.is_known() {
            asset
                .attributes
                .insert("width".into(), dimensions.width.to_string());
            asset
                .attributes
                .insert("height".into(), dimensions.height.to_string());
        }

        let mut symbol = Element::new("symbol");
        symbol.set_attr("id", Self::symbol_id(&asset.handle));
        match svg.attr("viewBox") {
            Some(viewbox) if !viewbox.is_empty() => symbol.set_attr("viewBox", viewbox),
            _ => {}
        }

        // Import the source's direct children, excluding text nodes and
        // top-level <script> elements.
        for child in &svg.children {
            if let Node::Element(element) = child {
                if element.name != "script" {
                    symbol.children.push(Node::Element(element.clone()));
                }
            }
        }

        self.sprite_allowed.collect(&symbol, true);
        self.root.children.push(Node::Element(symbol));
        self.asset_handles.push(asset.handle.clone());
        self.sprite_map.insert(asset.handle.clone(), asset);
        Ok(())
    }

    /// The composed sprite sheet, sanitized against the sprite-level
    /// allow-list. Emitted once per page, right after the opening body
    /// content.
    pub fn sheet(&self) -> String {
        self.sanitizer.sanitize(&self.root.to_xml(), &self.sprite_allowed)
    }

    /// Write the sprite sheet to an output stream.
    pub fn write_sheet(&self, out: &mut impl Write) -> io::Result<()> {
        out.write_all(self.sheet().as_bytes())
    }
}
