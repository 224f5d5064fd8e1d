//! SAML Logout Request.
//!
//! The SP-initiated single logout message and its projection into XML.

use chrono::{DateTime, SubsecRound, Utc};

use super::{generate_id, ISSUE_INSTANT_FORMAT, SAMLP_NS, SAML_NS, SAML_VERSION};
use crate::settings::LogoutSettings;
use crate::xml::Element;

/// Qualified name of the root element.
pub const LOGOUT_REQUEST_TAG: &str = "samlp:LogoutRequest";

/// Qualified name of the issuer element.
pub const ISSUER_TAG: &str = "saml:Issuer";

/// Qualified name of the session index element.
pub const SESSION_INDEX_TAG: &str = "samlp:SessionIndex";

/// Builds one optional child of the request from the settings.
type ChildBuilder = fn(&LogoutSettings) -> Option<Element>;

/// Child builders in schema order. Each decides on its own whether the
/// element is present.
const CHILD_BUILDERS: [ChildBuilder; 3] = [issuer_element, name_id_element, session_index_element];

/// SAML Logout Request.
///
/// A request to terminate the principal's session at the IdP. The identifier
/// is assigned once at construction and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoutRequest {
    id: String,
    issue_instant: DateTime<Utc>,
}

impl Default for LogoutRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl LogoutRequest {
    /// Creates a new logout request with a fresh identifier issued now.
    #[must_use]
    pub fn new() -> Self {
        Self::issued_at(Utc::now())
    }

    /// Creates a new logout request with a fresh identifier and the given issue time.
    #[must_use]
    pub fn issued_at(issue_instant: DateTime<Utc>) -> Self {
        Self {
            id: generate_id(),
            issue_instant: issue_instant.trunc_subsecs(0),
        }
    }

    /// Returns the request identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the issue time.
    #[must_use]
    pub const fn issue_instant(&self) -> DateTime<Utc> {
        self.issue_instant
    }

    /// Returns the issue time as written in `IssueInstant`.
    #[must_use]
    pub fn issue_instant_string(&self) -> String {
        self.issue_instant.format(ISSUE_INSTANT_FORMAT).to_string()
    }

    /// Builds the unsigned request document.
    ///
    /// `Destination` is omitted when no SLO target URL is configured.
    #[must_use]
    pub fn to_element(&self, settings: &LogoutSettings) -> Element {
        let mut root = Element::new(LOGOUT_REQUEST_TAG)
            .with_attribute("xmlns:samlp", SAMLP_NS)
            .with_attribute("xmlns:saml", SAML_NS)
            .with_attribute("ID", &self.id)
            .with_attribute("IssueInstant", self.issue_instant_string())
            .with_attribute("Version", SAML_VERSION);

        if let Some(destination) = &settings.idp_slo_target_url {
            root.set_attribute("Destination", destination);
        }

        for child in CHILD_BUILDERS.iter().filter_map(|build| build(settings)) {
            root.push_child(child);
        }

        root
    }
}

fn issuer_element(settings: &LogoutSettings) -> Option<Element> {
    settings
        .issuer
        .as_ref()
        .map(|issuer| Element::new(ISSUER_TAG).with_text(issuer))
}

fn name_id_element(settings: &LogoutSettings) -> Option<Element> {
    Some(settings.name_id().to_element())
}

fn session_index_element(settings: &LogoutSettings) -> Option<Element> {
    settings
        .session_index
        .as_ref()
        .map(|index| Element::new(SESSION_INDEX_TAG).with_text(index))
}
