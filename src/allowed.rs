//! Allow-lists consumed by the sanitization boundary
//!
//! Symbol content is not known until runtime, so the allow-list is built by
//! walking composed markup and accumulating every element and attribute name
//! encountered. The sets only ever grow; re-collecting a subtree is a no-op.

use indexmap::{IndexMap, IndexSet};

use crate::dom::{Element, Node};

/// Tag name -> permitted attribute names.
///
/// Keys are stored lowercase and looked up case-insensitively, matching the
/// sanitizer's behavior (`viewBox` on a symbol is allowed via `viewbox`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedHtml {
    tags: IndexMap<String, IndexSet<String>>,
}

impl AllowedHtml {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults for escaping the sprite sheet itself.
    pub fn sprite_defaults() -> Self {
        let mut allowed = Self::new();
        allowed.allow_attr("svg", "style");
        allowed.allow_attr("svg", "xmlns");
        allowed.allow_attr("symbol", "id");
        allowed.allow_attr("symbol", "viewBox");
        allowed
    }

    /// Defaults for escaping rendered `<svg><use>` markup.
    pub fn symbol_defaults() -> Self {
        let mut allowed = Self::new();
        allowed.allow_attr("svg", "height");
        allowed.allow_attr("svg", "width");
        allowed.allow_attr("svg", "class");
        allowed.allow_attr("use", "href");
        allowed
    }

    /// Permit an element with whatever attributes it already has listed.
    pub fn allow_element(&mut self, tag: &str) {
        self.tags.entry(tag.to_ascii_lowercase()).or_default();
    }

    /// Permit an attribute on a given element.
    pub fn allow_attr(&mut self, tag: &str, attr: &str) {
        self.tags
            .entry(tag.to_ascii_lowercase())
            .or_default()
            .insert(attr.to_ascii_lowercase());
    }

    pub fn is_element_allowed(&self, tag: &str) -> bool {
        self.tags.contains_key(&tag.to_ascii_lowercase())
    }

    pub fn is_attr_allowed(&self, tag: &str, attr: &str) -> bool {
        self.tags
            .get(&tag.to_ascii_lowercase())
            .is_some_and(|attrs| attrs.contains(&attr.to_ascii_lowercase()))
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Union another allow-list into this one.
    pub fn merge(&mut self, other: &AllowedHtml) {
        for (tag, attrs) in &other.tags {
            self.tags
                .entry(tag.clone())
                .or_default()
                .extend(attrs.iter().cloned());
        }
    }

    /// Register an element, its attribute names, and (when `recurse` is set)
    /// everything below it.
    pub fn collect(&mut self, element: &Element, recurse: bool) {
        self.allow_element(&element.name);
        for attr in element.attributes.keys() {
            self.allow_attr(&element.name, attr);
        }
        if recurse {
            for child in &element.children {
                if let Node::Element(child) = child {
                    self.collect(child, true);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;

    #[test]
    fn test_defaults() {
        let sprite = AllowedHtml::sprite_defaults();
        assert!(sprite.is_attr_allowed("svg", "style"));
        assert!(sprite.is_attr_allowed("symbol", "viewBox"));
        assert!(!sprite.is_element_allowed("use"));

        let symbol = AllowedHtml::symbol_defaults();
        assert!(symbol.is_attr_allowed("use", "href"));
        assert!(symbol.is_attr_allowed("svg", "class"));
        assert!(!symbol.is_attr_allowed("svg", "onclick"));
    }

    #[test]
    fn test_collect_recurses_and_registers_attributes() {
        let root = dom::parse(
            r#"<symbol id="x" viewBox="0 0 1 1"><g fill="none"><path d="M0 0"/></g></symbol>"#,
        )
        .unwrap();
        let mut allowed = AllowedHtml::new();
        allowed.collect(&root, true);

        assert!(allowed.is_attr_allowed("symbol", "id"));
        assert!(allowed.is_attr_allowed("symbol", "viewbox"));
        assert!(allowed.is_attr_allowed("g", "fill"));
        assert!(allowed.is_attr_allowed("path", "d"));
    }

    #[test]
    fn test_collect_without_recursion_stays_shallow() {
        let root = dom::parse(r#"<g fill="none"><path d="M0 0"/></g>"#).unwrap();
        let mut allowed = AllowedHtml::new();
        allowed.collect(&root, false);

        assert!(allowed.is_attr_allowed("g", "fill"));
        assert!(!allowed.is_element_allowed("path"));
    }

    #[test]
    fn test_collect_is_idempotent() {
        let root = dom::parse(r#"<path d="M0 0"/>"#).unwrap();
        let mut allowed = AllowedHtml::new();
        allowed.collect(&root, true);
        let snapshot = allowed.clone();
        allowed.collect(&root, true);
        assert_eq!(allowed, snapshot);
    }

    #[test]
    fn test_lookups_are_case_insensitive() {
        let mut allowed = AllowedHtml::new();
        allowed.allow_attr("symbol", "viewBox");
        assert!(allowed.is_attr_allowed("SYMBOL", "viewbox"));
        assert!(allowed.is_attr_allowed("symbol", "VIEWBOX"));
    }

    #[test]
    fn test_merge_is_additive() {
        let mut allowed = AllowedHtml::sprite_defaults();
        let mut extra = AllowedHtml::new();
        extra.allow_attr("svg", "xmlns:xlink");
        allowed.merge(&extra);

        assert!(allowed.is_attr_allowed("svg", "xmlns:xlink"));
        assert!(allowed.is_attr_allowed("svg", "style"));
    }
}
