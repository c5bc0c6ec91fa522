//! Intrinsic dimension resolution for SVG assets
//!
//! An asset's natural size feeds the render-time aspect ratio, so a caller
//! can pass only a height (or only a width) and get the other dimension for
//! free. Resolution precedence: explicit caller intent overrides file
//! metadata, which overrides geometry inferred from the `viewBox`.

use crate::dom::Element;
use crate::AttributeMap;

/// A resolved width/height pair; `{0, 0}` means undeterminable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    /// Both dimensions resolved to something usable.
    pub fn is_known(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Determine an asset's default dimensions, first match wins:
///
/// 1. `width` and `height` both set in the asset's own attributes.
/// 2. `width` and `height` attributes on the root `<svg>`, both non-zero.
/// 3. The third and fourth `viewBox` tokens.
/// 4. `{0, 0}`.
pub fn resolve_dimensions(svg: &Element, attributes: &AttributeMap) -> Dimensions {
    let declared_width = attributes.get("width").map(String::as_str).filter(|v| is_filled(v));
    let declared_height = attributes.get("height").map(String::as_str).filter(|v| is_filled(v));
    if let (Some(width), Some(height)) = (declared_width, declared_height) {
        return Dimensions {
            width: parse_length(width),
            height: parse_length(height),
        };
    }

    let width_attr = svg.attr("width").map(parse_length).unwrap_or(0);
    let height_attr = svg.attr("height").map(parse_length).unwrap_or(0);
    if width_attr > 0 && height_attr > 0 {
        return Dimensions {
            width: width_attr,
            height: height_attr,
        };
    }

    // viewBox tokens: min-x, min-y, width, height.
    if let Some(viewbox) = svg.attr("viewBox") {
        let tokens: Vec<&str> = viewbox.split(' ').collect();
        if tokens.len() >= 4 && is_filled(tokens[2]) && is_filled(tokens[3]) {
            return Dimensions {
                width: parse_length(tokens[2]),
                height: parse_length(tokens[3]),
            };
        }
    }

    Dimensions::default()
}

/// "Set" means a non-empty value other than the bare string `"0"`.
fn is_filled(value: &str) -> bool {
    !value.is_empty() && value != "0"
}

/// Integer cast of a length-ish attribute value: the leading numeric prefix,
/// truncated, so `"24px"` is 24, `"24.5"` is 24, and junk is 0.
pub(crate) fn parse_length(value: &str) -> u32 {
    let value = value.trim();
    let end = value
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(value.len());
    value[..end].parse::<f64>().map(|n| n as u32).unwrap_or(0)
}
