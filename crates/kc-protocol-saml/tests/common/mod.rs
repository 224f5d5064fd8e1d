//! Common test utilities and fixtures.

#![allow(dead_code)]

use kc_protocol_saml::LogoutSettings;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// SP private key (PKCS#8, RSA-2048).
pub const SP_KEY: &str = include_str!("../fixtures/sp.key");

/// Self-signed SP certificate matching [`SP_KEY`].
pub const SP_CERT: &str = include_str!("../fixtures/sp.crt");

/// IdP single logout endpoint used throughout the tests.
pub const IDP_SLO_URL: &str = "https://idp.example.com/saml/slo";

/// One element of a parsed document, in document order.
#[derive(Debug, Clone)]
pub struct ParsedElement {
    /// Qualified element name.
    pub name: String,
    /// Attributes in source order.
    pub attributes: Vec<(String, String)>,
    /// Concatenated text content directly inside the element.
    pub text: String,
}

impl ParsedElement {
    /// Returns the value of an attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns attribute names in source order.
    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes.iter().map(|(k, _)| k.as_str()).collect()
    }
}

/// Parses XML with quick-xml into a flat list of elements.
pub fn parse_elements(xml: &str) -> anyhow::Result<Vec<ParsedElement>> {
    let mut reader = Reader::from_str(xml);
    let mut elements = Vec::new();
    let mut open: Vec<usize> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                open.push(elements.len());
                elements.push(parsed(&start)?);
            }
            Event::Empty(start) => elements.push(parsed(&start)?),
            Event::End(_) => {
                open.pop();
            }
            Event::Text(text) => {
                if let Some(&index) = open.last() {
                    let element: &mut ParsedElement = &mut elements[index];
                    element.text.push_str(&text.unescape()?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    anyhow::ensure!(open.is_empty(), "unclosed elements in document");
    Ok(elements)
}

fn parsed(start: &BytesStart<'_>) -> anyhow::Result<ParsedElement> {
    let name = String::from_utf8(start.name().as_ref().to_vec())?;
    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute?;
        attributes.push((
            String::from_utf8(attribute.key.as_ref().to_vec())?,
            attribute.unescape_value()?.into_owned(),
        ));
    }
    Ok(ParsedElement {
        name,
        attributes,
        text: String::new(),
    })
}

/// Finds the single element with the given qualified name.
pub fn find<'a>(elements: &'a [ParsedElement], name: &str) -> anyhow::Result<&'a ParsedElement> {
    let mut matches = elements.iter().filter(|e| e.name == name);
    let first = matches
        .next()
        .ok_or_else(|| anyhow::anyhow!("no {name} element"))?;
    anyhow::ensure!(matches.next().is_none(), "more than one {name} element");
    Ok(first)
}

/// Settings for a named principal with issuer and session index.
pub fn principal_settings() -> LogoutSettings {
    LogoutSettings::new(IDP_SLO_URL)
        .with_issuer("https://sp.example.com/metadata")
        .with_name_identifier(
            "alice@example.com",
            Some("urn:oasis:names:tc:SAML:1.1:nameid-format:emailAddress"),
        )
        .with_sp_name_qualifier("https://sp.example.com")
        .with_session_index("_be9967abd904ddcae3c0eb4189adbe3f71e327cf93")
}

/// Initializes test logging once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("kc_protocol_saml=debug")
        .with_test_writer()
        .try_init();
}
