//! The sanitization boundary
//!
//! Rendered markup never reaches the page unfiltered. The [`Sanitizer`]
//! trait is the seam for a host CMS's own escaping layer; [`MarkupFilter`]
//! is the built-in implementation, which strips anything not on the
//! allow-list rather than erroring. Stripping is fail-safe behavior, not a
//! fault: the worst outcome is an icon that does not render.

use std::borrow::Cow;

use quick_xml::escape::escape;

use crate::allowed::AllowedHtml;
use crate::dom::{self, Element, Node};

/// Reduce markup to what the allow-list permits.
pub trait Sanitizer {
    fn sanitize(&self, markup: &str, allowed: &AllowedHtml) -> String;
}

/// Default allow-list sanitizer.
///
/// Disallowed elements are dropped together with their subtree; disallowed
/// attributes are dropped from kept elements; text content is preserved and
/// re-escaped. Markup that does not parse degrades to an empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupFilter;

impl Sanitizer for MarkupFilter {
    fn sanitize(&self, markup: &str, allowed: &AllowedHtml) -> String {
        match dom::parse(markup) {
            Some(root) => filter_element(&root, allowed)
                .map(|element| element.to_xml())
                .unwrap_or_default(),
            None => String::new(),
        }
    }
}

fn filter_element(element: &Element, allowed: &AllowedHtml) -> Option<Element> {
    if !allowed.is_element_allowed(&element.name) {
        return None;
    }

    let mut kept = Element::new(element.name.clone());
    for (name, value) in &element.attributes {
        if allowed.is_attr_allowed(&element.name, name) {
            kept.attributes.insert(name.clone(), value.clone());
        }
    }
    for child in &element.children {
        match child {
            Node::Element(child) => {
                if let Some(child) = filter_element(child, allowed) {
                    kept.children.push(Node::Element(child));
                }
            }
            Node::Text(text) => kept.children.push(Node::Text(text.clone())),
        }
    }
    Some(kept)
}

/// Escape a value for embedding in a double-quoted HTML attribute.
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    escape(value)
}
