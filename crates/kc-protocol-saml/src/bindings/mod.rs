//! SAML HTTP-Redirect binding.
//!
//! Messages are optionally DEFLATE-compressed, base64-encoded and carried in
//! URL query parameters:
//!
//! - `SAMLRequest` - the encoded message, always first
//! - `RelayState` - opaque caller state, if any
//! - `SigAlg` / `Signature` - present only for detached signatures
//!
//! # Usage
//!
//! ```rust,ignore
//! use kc_protocol_saml::bindings::{HttpRedirectBinding, RequestParams};
//!
//! let encoded = HttpRedirectBinding::encode_message(&xml, true)?;
//! let params = RequestParams::new().with(SAML_REQUEST, encoded);
//! let url = HttpRedirectBinding::assemble_url("https://idp.example.com/slo", &params)?;
//! ```

mod redirect;

pub use redirect::*;

/// Query parameter carrying the encoded request.
pub const SAML_REQUEST: &str = "SAMLRequest";

/// Query parameter carrying caller state across the round trip.
pub const RELAY_STATE: &str = "RelayState";

/// Query parameter naming the detached signature algorithm.
pub const SIG_ALG: &str = "SigAlg";

/// Query parameter carrying the detached signature.
pub const SIGNATURE: &str = "Signature";

/// Parameters the pipeline owns; callers cannot set them.
pub const RESERVED_PARAMS: [&str; 3] = [SAML_REQUEST, SIG_ALG, SIGNATURE];

/// Ordered query parameters.
///
/// Insertion order is preserved and keys are not deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    entries: Vec<(String, String)>,
}

impl RequestParams {
    /// Creates an empty parameter list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a parameter.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    /// Appends a relay state parameter.
    #[must_use]
    pub fn with_relay_state(self, relay_state: impl Into<String>) -> Self {
        self.with(RELAY_STATE, relay_state)
    }

    /// Appends a parameter.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Returns the first value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the relay state, if present.
    #[must_use]
    pub fn relay_state(&self) -> Option<&str> {
        self.get(RELAY_STATE)
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterates over parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RequestParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Decoded HTTP-Redirect message.
#[derive(Debug, Clone)]
pub struct DecodedMessage {
    /// The decoded XML message.
    pub xml: String,
    /// The RelayState if present.
    pub relay_state: Option<String>,
    /// The signature (base64) if present.
    pub signature: Option<String>,
    /// The signature algorithm URI if present.
    pub sig_alg: Option<String>,
    /// All other query parameters in order.
    pub extra: RequestParams,
}
