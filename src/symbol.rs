//! Rendering `<svg><use>` references to sprite symbols

use std::io::{self, Write};

use crate::sanitize::escape_attribute;
use crate::sprite::Sprite;
use crate::AttributeMap;

impl Sprite {
    /// Markup for displaying the symbol registered under `handle`.
    ///
    /// Display attributes merge in increasing priority: global defaults from
    /// the config, the asset's stored attributes, then the caller's
    /// overrides. When the asset has a known intrinsic size and the caller
    /// supplies exactly one of `width`/`height`, the other is derived from
    /// the aspect ratio with truncating two-decimal precision.
    ///
    /// Empty and unknown handles render as an empty string. The output has
    /// been through the sanitization boundary and is safe to print.
    pub fn render_symbol(&mut self, handle: &str, overrides: &AttributeMap) -> String {
        if handle.is_empty() {
            return String::new();
        }
        let Some(asset) = self.get_asset(handle) else {
            return String::new();
        };
        let asset_attributes = asset.attributes.clone();

        let mut attrs = overrides.clone();

        let stored_width = filled(asset_attributes.get("width")).map(parse_number);
        let stored_height = filled(asset_attributes.get("height")).map(parse_number);
        if let (Some(width), Some(height)) = (stored_width, stored_height) {
            let ratio = width / height;
            let override_width = filled(attrs.get("width")).map(parse_number);
            let override_height = filled(attrs.get("height")).map(parse_number);
            if ratio.is_finite() && ratio > 0.0 {
                match (override_width, override_height) {
                    // Width from height: ratio * height.
                    (None, Some(height)) => {
                        attrs.insert("width".into(), format_precision(ratio * height, 2));
                    }
                    // Height from width: width / ratio.
                    (Some(width), None) => {
                        attrs.insert("height".into(), format_precision(width / ratio, 2));
                    }
                    _ => {}
                }
            }
        }

        // Later layers overwrite earlier ones key-for-key; a key keeps the
        // position of its first appearance.
        let mut merged = self.config.global_attributes.clone();
        merged.extend(asset_attributes);
        merged.extend(attrs);
        let merged: AttributeMap = merged
            .into_iter()
            .map(|(name, value)| (name, escape_attribute(&value).into_owned()))
            .collect();

        // The sanitizer has to know about every attribute this render emits.
        for name in merged.keys() {
            self.symbol_allowed.allow_attr("svg", name);
        }

        let attrs: Vec<String> = merged
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(name, value)| format!(r#"{name}="{value}""#))
            .collect();
        let id = escape_attribute(&Self::symbol_id(handle)).into_owned();
        let markup = if attrs.is_empty() {
            format!(r##"<svg><use href="#{id}"></use></svg>"##)
        } else {
            format!(r##"<svg {}><use href="#{id}"></use></svg>"##, attrs.join(" "))
        };

        self.sanitizer.sanitize(&markup, &self.symbol_allowed)
    }

    /// Render a symbol and write it to an output stream; unknown handles
    /// write nothing.
    pub fn write_symbol(
        &mut self,
        out: &mut impl Write,
        handle: &str,
        overrides: &AttributeMap,
    ) -> io::Result<()> {
        let markup = self.render_symbol(handle, overrides);
        if markup.is_empty() {
            return Ok(());
        }
        out.write_all(markup.as_bytes())
    }
}

/// A dimension counts as supplied only when non-empty and not `"0"`.
fn filled(value: Option<&String>) -> Option<&str> {
    value
        .map(String::as_str)
        .filter(|v| !v.is_empty() && *v != "0")
}

/// Numeric coercion of an attribute value: leading numeric prefix, 0 for junk.
fn parse_number(value: &str) -> f64 {
    let value = value.trim();
    let end = value
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(value.len());
    value[..end].parse().unwrap_or(0.0)
}

/// Truncation-based precision: multiply by 10^precision, truncate, divide
/// back, then format with that many decimals. `format_precision(12.567, 2)`
/// is `"12.56"`, not `"12.57"`.
fn format_precision(value: f64, precision: i32) -> String {
    let pow = 10f64.powi(precision);
    let truncated = (value * pow).trunc() / pow;
    format!("{truncated:.prec$}", prec = precision as usize)
}
