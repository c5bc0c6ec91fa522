//! Minimal owned XML tree for sprite composition
//!
//! The sprite document owns every node it contains. "Importing" markup from
//! a source file means deep-cloning a subtree into the owning tree; nodes are
//! never shared across documents. Serialization is canonical-style: attributes
//! in document order, empty elements written as `<tag></tag>`, entities
//! expanded on parse and re-escaped on write.

use indexmap::IndexMap;
use quick_xml::escape::{escape, partial_escape, unescape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// A node in the tree: an element or a text run.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An XML element with ordered attributes and child nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub name: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Look up an attribute value by exact name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Set an attribute, keeping its original position if already present.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Iterate over direct element children, skipping text nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Serialize the subtree rooted at this element.
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        self.write_xml(&mut out);
        out
    }

    fn write_xml(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape(value.as_str()));
            out.push('"');
        }
        out.push('>');
        for child in &self.children {
            match child {
                Node::Element(element) => element.write_xml(out),
                Node::Text(text) => out.push_str(&partial_escape(text.as_str())),
            }
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

/// Parse markup into its first root element.
///
/// Returns `None` for anything malformed: unbalanced or mismatched tags,
/// invalid attribute syntax, unresolvable entity references, or input with
/// no element at all. Comments, processing instructions, the XML
/// declaration, and doctypes are dropped; whitespace-only text nodes are
/// dropped too, but text with content keeps its surrounding whitespace.
/// Content after the first root element is ignored.
pub fn parse(markup: &str) -> Option<Element> {
    let mut reader = Reader::from_str(markup);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                stack.push(element_from_start(&start)?);
            }
            Ok(Event::Empty(start)) => {
                let element = element_from_start(&start)?;
                attach(&mut stack, &mut root, Node::Element(element));
            }
            Ok(Event::End(end)) => {
                let element = stack.pop()?;
                if element.name.as_bytes() != end.name().as_ref() {
                    return None;
                }
                attach(&mut stack, &mut root, Node::Element(element));
            }
            Ok(Event::Text(text)) => {
                let text = text.decode().ok()?;
                // Indentation between elements is not content.
                if !text.trim().is_empty() {
                    attach(&mut stack, &mut root, Node::Text(text.into_owned()));
                }
            }
            Ok(Event::CData(cdata)) => {
                let text = String::from_utf8(cdata.into_inner().into_owned()).ok()?;
                attach(&mut stack, &mut root, Node::Text(text));
            }
            // Entity references come through as their own events; expand
            // them back into text. Entities we cannot resolve fail the
            // whole parse.
            Ok(Event::GeneralRef(entity)) => {
                let name = entity.decode().ok()?;
                let text = unescape(&format!("&{name};")).ok()?;
                attach(&mut stack, &mut root, Node::Text(text.into_owned()));
            }
            Ok(Event::Decl(_) | Event::DocType(_) | Event::Comment(_) | Event::PI(_)) => {}
            Ok(Event::Eof) => break,
            Err(_) => return None,
        }
    }

    if !stack.is_empty() {
        return None;
    }
    root
}

fn element_from_start(start: &BytesStart<'_>) -> Option<Element> {
    let name = String::from_utf8(start.name().as_ref().to_vec()).ok()?;
    let mut element = Element::new(name);
    for attr in start.attributes() {
        let attr = attr.ok()?;
        let key = String::from_utf8(attr.key.as_ref().to_vec()).ok()?;
        let value = attr.unescape_value().ok()?;
        element.attributes.insert(key, value.into_owned());
    }
    Some(element)
}

/// Completed nodes go to the open parent, or become the root. Nodes outside
/// the first root element are dropped.
fn attach(stack: &mut Vec<Element>, root: &mut Option<Element>, node: Node) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    } else if root.is_none() {
        if let Node::Element(element) = node {
            *root = Some(element);
        }
    }
}
