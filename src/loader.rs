//! Loading SVG roots from disk
//!
//! Malformed input is never fatal here. A file that is missing, empty,
//! unparseable, or simply not an SVG produces `None` and the asset quietly
//! stays out of the sprite.

use std::fs;
use std::path::{Component, Path};

use crate::dom::{self, Element};

/// Read `path` and extract the first `<svg>` element in it.
///
/// Soft-fails with `None` when the path is empty, contains parent-directory
/// components, does not exist, reads empty, fails to parse as XML, or holds
/// no `<svg>` element.
pub fn load_svg_root(path: &Path) -> Option<Element> {
    if path.as_os_str().is_empty() || !is_clean_path(path) {
        return None;
    }

    let contents = fs::read_to_string(path).ok()?;
    if contents.trim().is_empty() {
        return None;
    }

    let root = dom::parse(&contents)?;
    find_svg(&root).cloned()
}

/// Traversal guard: no `..` components anywhere in the path.
fn is_clean_path(path: &Path) -> bool {
    !path
        .components()
        .any(|component| matches!(component, Component::ParentDir))
}

fn find_svg(element: &Element) -> Option<&Element> {
    if element.name == "svg" {
        return Some(element);
    }
    element.child_elements().find_map(find_svg)
}
