//! TOML asset manifests
//!
//! The CLI describes a sprite declaratively:
//!
//! ```toml
//! [sprite]
//! directory = "icons"
//!
//! [sprite.global_attributes]
//! class = "icon"
//!
//! [[asset]]
//! handle = "menu"
//! src = "menu.svg"
//!
//! [asset.attributes]
//! width = 24
//! height = 24
//! ```
//!
//! Attribute values accept TOML strings, integers, floats, and booleans;
//! `width = 24` and `width = "24"` are equivalent.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use crate::{AssetDefinition, AttributeMap};

/// Errors that can occur when loading or parsing manifests
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read manifest file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse manifest TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// A parsed sprite manifest: base configuration plus the assets to compose.
#[derive(Debug, Clone, Default)]
pub struct SpriteManifest {
    /// Base directory for relative asset paths, if the manifest sets one.
    pub directory: Option<PathBuf>,
    /// Attributes applied to every rendered symbol.
    pub global_attributes: AttributeMap,
    /// Assets in declaration order.
    pub assets: Vec<AssetDefinition>,
}

#[derive(Deserialize)]
struct TomlManifest {
    sprite: Option<TomlSprite>,
    #[serde(default, rename = "asset")]
    assets: Vec<TomlAsset>,
}

#[derive(Deserialize, Default)]
struct TomlSprite {
    directory: Option<PathBuf>,
    #[serde(default)]
    global_attributes: IndexMap<String, toml::Value>,
}

#[derive(Deserialize)]
struct TomlAsset {
    handle: String,
    src: PathBuf,
    #[serde(default)]
    attributes: IndexMap<String, toml::Value>,
    #[serde(default = "default_condition")]
    condition: bool,
}

fn default_condition() -> bool {
    true
}

impl SpriteManifest {
    /// Load a manifest from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a manifest from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ManifestError> {
        let parsed: TomlManifest = toml::from_str(content)?;
        let sprite = parsed.sprite.unwrap_or_default();

        Ok(SpriteManifest {
            directory: sprite.directory,
            global_attributes: attribute_map(sprite.global_attributes),
            assets: parsed
                .assets
                .into_iter()
                .map(|asset| AssetDefinition {
                    handle: asset.handle,
                    src: asset.src,
                    attributes: attribute_map(asset.attributes),
                    condition: asset.condition,
                })
                .collect(),
        })
    }
}

fn attribute_map(values: IndexMap<String, toml::Value>) -> AttributeMap {
    values
        .into_iter()
        .map(|(name, value)| (name, attribute_value(value)))
        .collect()
}

fn attribute_value(value: toml::Value) -> String {
    match value {
        toml::Value::String(text) => text,
        toml::Value::Integer(number) => number.to_string(),
        toml::Value::Float(number) => number.to_string(),
        toml::Value::Boolean(flag) => flag.to_string(),
        other => other.to_string(),
    }
}
