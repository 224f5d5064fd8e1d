//! Exclusive XML canonicalization (without comments).
//!
//! Covers the subset of Exclusive C14N 1.0 reachable from trees built by
//! this crate: no comments, processing instructions or DTDs. Namespace
//! declarations are emitted only where a prefix is visibly used and not
//! already rendered by an output ancestor.

use super::{Element, Node};

type Scope = Vec<(String, String)>;

/// Canonicalizes an element as the apex of the output.
#[must_use]
pub fn canonicalize(element: &Element) -> String {
    canonicalize_in_scope(element, &[])
}

/// Canonicalizes an element whose ancestors (not part of the output)
/// declare the given `(prefix, namespace URI)` pairs.
#[must_use]
pub fn canonicalize_in_scope(element: &Element, inherited: &[(&str, &str)]) -> String {
    let declared: Scope = inherited
        .iter()
        .map(|(p, u)| ((*p).to_string(), (*u).to_string()))
        .collect();
    let mut out = String::new();
    write_element(element, &declared, &Vec::new(), &mut out);
    out
}

fn lookup<'a>(scope: &'a Scope, prefix: &str) -> Option<&'a str> {
    scope
        .iter()
        .rev()
        .find(|(p, _)| p == prefix)
        .map(|(_, u)| u.as_str())
}

fn namespace_declaration(name: &str) -> Option<&str> {
    if name == "xmlns" {
        Some("")
    } else {
        name.strip_prefix("xmlns:")
    }
}

fn write_element(element: &Element, declared: &Scope, rendered: &Scope, out: &mut String) {
    let mut in_scope = declared.clone();
    let mut attributes = Vec::new();
    for (name, value) in element.attributes() {
        match namespace_declaration(name) {
            Some(prefix) => in_scope.push((prefix.to_string(), value.clone())),
            None => attributes.push((name.as_str(), value.as_str())),
        }
    }

    let mut utilized: Vec<&str> = vec![element.prefix().unwrap_or("")];
    for (name, _) in &attributes {
        if let Some((prefix, _)) = name.split_once(':') {
            if prefix != "xml" && !utilized.contains(&prefix) {
                utilized.push(prefix);
            }
        }
    }

    let mut namespaces: Vec<(&str, &str)> = Vec::new();
    for prefix in utilized {
        let uri = lookup(&in_scope, prefix).unwrap_or("");
        let already = lookup(rendered, prefix).unwrap_or("");
        if uri != already {
            namespaces.push((prefix, uri));
        }
    }
    namespaces.sort_by(|a, b| a.0.cmp(b.0));

    let mut keyed: Vec<(&str, &str, &str, &str)> = attributes
        .iter()
        .map(|(name, value)| match name.split_once(':') {
            Some((prefix, local)) => (lookup(&in_scope, prefix).unwrap_or(""), local, *name, *value),
            None => ("", *name, *name, *value),
        })
        .collect();
    keyed.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

    out.push('<');
    out.push_str(element.name());
    for (prefix, uri) in &namespaces {
        if prefix.is_empty() {
            out.push_str(" xmlns=\"");
        } else {
            out.push_str(" xmlns:");
            out.push_str(prefix);
            out.push_str("=\"");
        }
        out.push_str(&escape_attribute(uri));
        out.push('"');
    }
    for (_, _, name, value) in &keyed {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attribute(value));
        out.push('"');
    }
    out.push('>');

    let mut child_rendered = rendered.clone();
    child_rendered.extend(
        namespaces
            .iter()
            .map(|(p, u)| ((*p).to_string(), (*u).to_string())),
    );

    for node in element.content() {
        match node {
            Node::Element(child) => write_element(child, &in_scope, &child_rendered, out),
            Node::Text(text) => out.push_str(&escape_text(text)),
        }
    }

    out.push_str("</");
    out.push_str(element.name());
    out.push('>');
}

fn escape_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '\r' => result.push_str("&#xD;"),
            _ => result.push(c),
        }
    }
    result
}

fn escape_attribute(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '"' => result.push_str("&quot;"),
            '\t' => result.push_str("&#x9;"),
            '\n' => result.push_str("&#xA;"),
            '\r' => result.push_str("&#xD;"),
            _ => result.push(c),
        }
    }
    result
}
