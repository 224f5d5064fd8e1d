//! SAML 2.0 Single Logout for service providers.
//!
//! This crate builds SP-initiated `LogoutRequest` messages and delivers them
//! through the HTTP-Redirect binding:
//!
//! - **Request construction** - `samlp:LogoutRequest` documents from [`LogoutSettings`]
//! - **XML signature** - enveloped signatures with exclusive canonicalization
//! - **Redirect binding** - DEFLATE, base64 and detached query-string signatures
//!
//! # Architecture
//!
//! - [`types`] - Protocol constants, identifiers and the logout request
//! - [`xml`] - Element tree, serialization and canonicalization
//! - [`signature`] - Algorithms, credentials and the signing primitive
//! - [`bindings`] - HTTP-Redirect encoding and URL assembly
//! - [`slo`] - The end-to-end logout pipeline
//! - [`settings`] - SP configuration
//! - [`error`] - Error types for SAML operations
//!
//! # Example
//!
//! ```rust,ignore
//! use kc_protocol_saml::{LogoutRequest, LogoutSettings, RequestParams, SloBuilder};
//!
//! let settings = LogoutSettings::load("sp.toml")?;
//! let url = SloBuilder::new(&settings)
//!     .create(&LogoutRequest::new(), &RequestParams::new().with_relay_state("/"))?;
//! ```
//!
//! # SAML Specifications
//!
//! - [SAML 2.0 Core](https://docs.oasis-open.org/security/saml/v2.0/saml-core-2.0-os.pdf)
//! - [SAML 2.0 Bindings](https://docs.oasis-open.org/security/saml/v2.0/saml-bindings-2.0-os.pdf)
//! - [XML Signature](https://www.w3.org/TR/xmldsig-core1/)
//! - [Exclusive XML Canonicalization](https://www.w3.org/TR/xml-exc-c14n/)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod bindings;
pub mod error;
pub mod settings;
pub mod signature;
pub mod slo;
pub mod types;
pub mod xml;

pub use bindings::{HttpRedirectBinding, RequestParams};
pub use error::{SamlError, SamlResult};
pub use settings::{LogoutSettings, SecuritySettings};
pub use signature::{MessageSigner, SignatureAlgorithm, SigningCredentials, SigningMode, XmlSigner};
pub use slo::SloBuilder;
pub use types::*;
pub use xml::{Element, QuoteStyle};
