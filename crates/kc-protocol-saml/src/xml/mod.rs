//! Minimal owned XML tree used to assemble outgoing SAML messages.
//!
//! Messages are small and built once, so the tree favors a simple API over
//! zero-copy tricks. Rendering is where the attribute quoting policy is
//! applied; canonicalization for signing lives in [`c14n`].

pub mod c14n;

use std::borrow::Cow;
use std::fmt::Write;

use serde::{Deserialize, Serialize};

/// Quote character used around attribute values when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    /// `name='value'`
    #[default]
    Single,
    /// `name="value"`
    Double,
}

impl QuoteStyle {
    /// Returns the quote character.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Single => '\'',
            Self::Double => '"',
        }
    }
}

/// A node in an element's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Nested element.
    Element(Element),
    /// Character data.
    Text(String),
}

/// An XML element with ordered attributes and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Creates an empty element with a qualified name such as `saml:Issuer`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Appends a text node.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Appends a child element.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.push_child(child);
        self
    }

    /// Sets an attribute, replacing an existing value in place.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Appends a child element.
    pub fn push_child(&mut self, child: Self) {
        self.children.push(Node::Element(child));
    }

    /// Inserts a child element at a content position.
    ///
    /// # Panics
    ///
    /// Panics if `index > self.content().len()`.
    pub fn insert_child(&mut self, index: usize, child: Self) {
        self.children.insert(index, Node::Element(child));
    }

    /// Returns the qualified name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the namespace prefix, if any.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(prefix, _)| prefix)
    }

    /// Returns the name without its prefix.
    #[must_use]
    pub fn local_name(&self) -> &str {
        self.name.split_once(':').map_or(&self.name, |(_, local)| local)
    }

    /// Returns an attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns all attributes in insertion order.
    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Returns the raw content nodes.
    #[must_use]
    pub fn content(&self) -> &[Node] {
        &self.children
    }

    /// Iterates over child elements.
    pub fn children(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Returns the first child element with the given local name.
    #[must_use]
    pub fn child(&self, local_name: &str) -> Option<&Self> {
        self.children().find(|e| e.local_name() == local_name)
    }

    /// Returns the content position of the first child element with the given local name.
    #[must_use]
    pub fn child_position(&self, local_name: &str) -> Option<usize> {
        self.children.iter().position(|node| match node {
            Node::Element(e) => e.local_name() == local_name,
            Node::Text(_) => false,
        })
    }

    /// Concatenates the direct text content.
    #[must_use]
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(t) => Some(t.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// Renders the element and its subtree without an XML declaration.
    #[must_use]
    pub fn to_xml(&self, quote: QuoteStyle) -> String {
        let mut out = String::new();
        self.write_to(&mut out, quote);
        out
    }

    fn write_to(&self, out: &mut String, quote: QuoteStyle) {
        let q = quote.as_char();
        out.push('<');
        out.push_str(&self.name);
        for (name, value) in &self.attributes {
            // Writing into a String cannot fail.
            let _ = write!(out, " {name}={q}{}{q}", escape(value));
        }

        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }

        out.push('>');
        for node in &self.children {
            match node {
                Node::Element(e) => e.write_to(out, quote),
                Node::Text(t) => out.push_str(&escape(t)),
            }
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

fn escape(raw: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::new("samlp:LogoutRequest")
            .with_attribute("ID", "_abc")
            .with_attribute("Version", "2.0")
            .with_child(Element::new("saml:Issuer").with_text("https://sp.example.com"))
            .with_child(Element::new("samlp:SessionIndex"))
    }

    #[test]
    fn renders_single_quotes_by_default() {
        let xml = sample().to_xml(QuoteStyle::default());
        assert_eq!(
            xml,
            "<samlp:LogoutRequest ID='_abc' Version='2.0'>\
             <saml:Issuer>https://sp.example.com</saml:Issuer>\
             <samlp:SessionIndex/>\
             </samlp:LogoutRequest>"
        );
    }

    #[test]
    fn renders_double_quotes() {
        let xml = sample().to_xml(QuoteStyle::Double);
        assert!(xml.starts_with(r#"<samlp:LogoutRequest ID="_abc" Version="2.0">"#));
    }

    #[test]
    fn escapes_text_and_attributes() {
        let xml = Element::new("a")
            .with_attribute("v", "it's <x> & \"y\"")
            .with_text("1 < 2 & 3")
            .to_xml(QuoteStyle::Single);
        assert!(!xml.contains("it's"));
        assert!(xml.contains("&amp;"));
        assert!(xml.contains("1 &lt; 2 &amp; 3"));
    }

    #[test]
    fn set_attribute_replaces_in_place() {
        let mut e = Element::new("a").with_attribute("x", "1").with_attribute("y", "2");
        e.set_attribute("x", "3");
        assert_eq!(e.attributes()[0], ("x".to_string(), "3".to_string()));
        assert_eq!(e.attributes().len(), 2);
    }

    #[test]
    fn child_lookup_by_local_name() {
        let root = sample();
        assert_eq!(root.child("Issuer").map(Element::text).as_deref(), Some("https://sp.example.com"));
        assert_eq!(root.child_position("SessionIndex"), Some(1));
        assert!(root.child("NameID").is_none());
        assert_eq!(root.prefix(), Some("samlp"));
        assert_eq!(root.local_name(), "LogoutRequest");
    }
}
