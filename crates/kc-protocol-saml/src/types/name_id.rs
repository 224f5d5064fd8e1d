//! SAML Name ID types.
//!
//! Name identifiers name the principal whose session is being terminated.

use serde::{Deserialize, Serialize};

use super::{generate_id, NameIdFormat};
use crate::xml::Element;

/// Qualified name of the `NameID` element.
pub const NAME_ID_TAG: &str = "saml:NameID";

/// SAML Name ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameId {
    /// The actual identifier value.
    pub value: String,

    /// The format URI of the name identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// The security or administrative domain that qualifies the name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_qualifier: Option<String>,
}

impl NameId {
    /// Creates a new name ID with the given value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            format: None,
            name_qualifier: None,
        }
    }

    /// Creates a new transient name ID.
    #[must_use]
    pub fn transient(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            format: Some(NameIdFormat::Transient.uri().to_string()),
            name_qualifier: None,
        }
    }

    /// Creates a transient name ID with a freshly generated value.
    #[must_use]
    pub fn generate_transient() -> Self {
        Self::transient(generate_id())
    }

    /// Sets the format URI for this name ID.
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Sets the name qualifier.
    #[must_use]
    pub fn with_name_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.name_qualifier = Some(qualifier.into());
        self
    }

    /// Returns the parsed name ID format.
    #[must_use]
    pub fn parsed_format(&self) -> NameIdFormat {
        self.format
            .as_deref()
            .and_then(NameIdFormat::from_uri)
            .unwrap_or_default()
    }

    /// Builds the `saml:NameID` element.
    ///
    /// Attributes are written in the order `NameQualifier`, `Format`.
    #[must_use]
    pub fn to_element(&self) -> Element {
        let mut element = Element::new(NAME_ID_TAG);
        if let Some(qualifier) = &self.name_qualifier {
            element.set_attribute("NameQualifier", qualifier);
        }
        if let Some(format) = &self.format {
            element.set_attribute("Format", format);
        }
        element.with_text(&self.value)
    }
}
