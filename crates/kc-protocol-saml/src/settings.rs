//! Service provider settings consumed when building logout requests.
//!
//! Settings are read-only during construction and may be shared between
//! threads. They are usually loaded from a TOML file:
//!
//! ```toml
//! idp_slo_target_url = "https://idp.example.com/slo"
//! issuer = "https://sp.example.com/metadata"
//! session_index = "_be9967abd904ddcae3c0eb4189adbe3f71e327cf93"
//!
//! [security]
//! logout_requests_signed = true
//! signature_method = "http://www.w3.org/2001/04/xmldsig-more#rsa-sha256"
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SamlError, SamlResult};
use crate::signature::{DigestAlgorithm, SignatureAlgorithm, SigningCredentials, SigningMode};
use crate::types::NameId;
use crate::xml::QuoteStyle;

/// Settings for SP-initiated single logout.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogoutSettings {
    /// IdP single logout endpoint; also written as `Destination`.
    pub idp_slo_target_url: Option<String>,
    /// SP entity ID written as `saml:Issuer`.
    pub issuer: Option<String>,
    /// Name ID of the principal being logged out.
    pub name_identifier_value: Option<String>,
    /// Format URI of the name ID.
    pub name_identifier_format: Option<String>,
    /// Written as the `NameQualifier` attribute of the name ID.
    pub sp_name_qualifier: Option<String>,
    /// Session index issued by the IdP at login.
    pub session_index: Option<String>,
    /// Raw-DEFLATE the request before base64 encoding.
    pub compress_request: bool,
    /// Render attribute values in double quotes instead of single quotes.
    pub double_quote_xml_attribute_values: bool,
    /// SP certificate (PEM).
    pub certificate: Option<String>,
    /// SP private key (PEM, PKCS#8 or PKCS#1).
    pub private_key: Option<String>,
    /// Signing policy.
    pub security: SecuritySettings,
}

/// Signing policy for logout requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecuritySettings {
    /// Sign outgoing logout requests.
    pub logout_requests_signed: bool,
    /// Embed the signature in the XML instead of signing the query string.
    pub embed_sign: bool,
    /// Signature algorithm URI.
    pub signature_method: String,
    /// Digest algorithm URI (embedded signatures only).
    pub digest_method: String,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            logout_requests_signed: false,
            embed_sign: false,
            signature_method: SignatureAlgorithm::default().uri().to_string(),
            digest_method: DigestAlgorithm::default().uri().to_string(),
        }
    }
}

impl Default for LogoutSettings {
    fn default() -> Self {
        Self {
            idp_slo_target_url: None,
            issuer: None,
            name_identifier_value: None,
            name_identifier_format: None,
            sp_name_qualifier: None,
            session_index: None,
            compress_request: true,
            double_quote_xml_attribute_values: false,
            certificate: None,
            private_key: None,
            security: SecuritySettings::default(),
        }
    }
}

impl fmt::Debug for LogoutSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogoutSettings")
            .field("idp_slo_target_url", &self.idp_slo_target_url)
            .field("issuer", &self.issuer)
            .field("name_identifier_value", &self.name_identifier_value)
            .field("name_identifier_format", &self.name_identifier_format)
            .field("sp_name_qualifier", &self.sp_name_qualifier)
            .field("session_index", &self.session_index)
            .field("compress_request", &self.compress_request)
            .field(
                "double_quote_xml_attribute_values",
                &self.double_quote_xml_attribute_values,
            )
            .field("certificate", &self.certificate.as_ref().map(|_| "<pem>"))
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("security", &self.security)
            .finish()
    }
}

impl LogoutSettings {
    /// Creates settings targeting the given IdP SLO endpoint.
    #[must_use]
    pub fn new(idp_slo_target_url: impl Into<String>) -> Self {
        Self {
            idp_slo_target_url: Some(idp_slo_target_url.into()),
            ..Self::default()
        }
    }

    /// Parses settings from TOML.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the document does not match the schema.
    pub fn from_toml_str(content: &str) -> SamlResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> SamlResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SamlError::Configuration(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Sets the SP entity ID.
    #[must_use]
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Sets the principal's name ID value and optional format.
    #[must_use]
    pub fn with_name_identifier(
        mut self,
        value: impl Into<String>,
        format: Option<impl Into<String>>,
    ) -> Self {
        self.name_identifier_value = Some(value.into());
        self.name_identifier_format = format.map(Into::into);
        self
    }

    /// Sets the name qualifier.
    #[must_use]
    pub fn with_sp_name_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.sp_name_qualifier = Some(qualifier.into());
        self
    }

    /// Sets the session index.
    #[must_use]
    pub fn with_session_index(mut self, index: impl Into<String>) -> Self {
        self.session_index = Some(index.into());
        self
    }

    /// Enables or disables DEFLATE compression.
    #[must_use]
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress_request = compress;
        self
    }

    /// Sets the attribute quoting style.
    #[must_use]
    pub fn with_quote_style(mut self, quote: QuoteStyle) -> Self {
        self.double_quote_xml_attribute_values = matches!(quote, QuoteStyle::Double);
        self
    }

    /// Sets the SP key pair (PEM).
    #[must_use]
    pub fn with_key_pair(
        mut self,
        private_key_pem: impl Into<String>,
        certificate_pem: Option<impl Into<String>>,
    ) -> Self {
        self.private_key = Some(private_key_pem.into());
        self.certificate = certificate_pem.map(Into::into);
        self
    }

    /// Requests signed logout requests.
    #[must_use]
    pub fn with_signing(mut self, embed: bool, signature: SignatureAlgorithm) -> Self {
        self.security.logout_requests_signed = true;
        self.security.embed_sign = embed;
        self.security.signature_method = signature.uri().to_string();
        self
    }

    /// Sets the digest algorithm for embedded signatures.
    #[must_use]
    pub fn with_digest(mut self, digest: DigestAlgorithm) -> Self {
        self.security.digest_method = digest.uri().to_string();
        self
    }

    /// Returns the attribute quoting style.
    #[must_use]
    pub const fn quote_style(&self) -> QuoteStyle {
        if self.double_quote_xml_attribute_values {
            QuoteStyle::Double
        } else {
            QuoteStyle::Single
        }
    }

    /// Projects the configured principal into a name ID.
    ///
    /// Without a configured value a transient name ID with a fresh value is
    /// returned, so two calls never yield the same identifier.
    #[must_use]
    pub fn name_id(&self) -> NameId {
        let Some(value) = &self.name_identifier_value else {
            return NameId::generate_transient();
        };

        let mut name_id = NameId::new(value);
        name_id.format.clone_from(&self.name_identifier_format);
        name_id.name_qualifier.clone_from(&self.sp_name_qualifier);
        name_id
    }

    /// Parses the configured key pair.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a configured PEM cannot be decoded.
    pub fn credentials(&self) -> SamlResult<Option<SigningCredentials>> {
        self.private_key
            .as_deref()
            .map(|key| SigningCredentials::from_pem(key, self.certificate.as_deref()))
            .transpose()
    }

    /// Resolves which signing mode applies.
    ///
    /// Embedded signing takes priority: with `embed_sign` set the request is
    /// signed in the document when a certificate is configured and sent
    /// unsigned otherwise. Detached signing is never used as a fallback.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when signing is requested without a
    /// private key, and a signing error for unknown algorithm URIs.
    pub fn signing_mode(&self) -> SamlResult<SigningMode> {
        let security = &self.security;
        if !security.logout_requests_signed {
            return Ok(SigningMode::Unsigned);
        }

        if self.private_key.is_none() {
            return Err(SamlError::Configuration(
                "logout requests are signed but no private key is configured".to_string(),
            ));
        }

        if security.embed_sign && self.certificate.is_none() {
            tracing::warn!(
                "Embedded signing requested without a certificate, logout request is unsigned"
            );
            return Ok(SigningMode::Unsigned);
        }

        let signature = SignatureAlgorithm::from_uri(&security.signature_method).ok_or_else(|| {
            SamlError::Signing(format!(
                "unsupported signature method: {}",
                security.signature_method
            ))
        })?;
        if signature.is_deprecated() {
            tracing::warn!(algorithm = signature.uri(), "Deprecated signature algorithm configured");
        }

        if !security.embed_sign {
            return Ok(SigningMode::Detached { signature });
        }

        let digest = DigestAlgorithm::from_uri(&security.digest_method).ok_or_else(|| {
            SamlError::Signing(format!("unsupported digest method: {}", security.digest_method))
        })?;

        Ok(SigningMode::Embedded { signature, digest })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NameIdFormat;

    #[test]
    fn defaults() {
        let settings = LogoutSettings::default();
        assert!(settings.compress_request);
        assert_eq!(settings.quote_style(), QuoteStyle::Single);
        assert!(!settings.security.logout_requests_signed);
        assert_eq!(
            settings.security.signature_method,
            "http://www.w3.org/2001/04/xmldsig-more#rsa-sha256"
        );
    }

    #[test]
    fn parse_toml() {
        let settings = LogoutSettings::from_toml_str(
            r#"
            idp_slo_target_url = "https://idp.example.com/slo"
            issuer = "https://sp.example.com"
            compress_request = false
            double_quote_xml_attribute_values = true

            [security]
            logout_requests_signed = true
            embed_sign = true
            "#,
        )
        .unwrap();

        assert_eq!(settings.idp_slo_target_url.as_deref(), Some("https://idp.example.com/slo"));
        assert!(!settings.compress_request);
        assert_eq!(settings.quote_style(), QuoteStyle::Double);
        assert!(settings.security.embed_sign);
        assert_eq!(settings.security.digest_method, DigestAlgorithm::Sha256.uri());
    }

    #[test]
    fn invalid_toml_is_configuration_error() {
        let err = LogoutSettings::from_toml_str("compress_request = \"yes\"").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn missing_file_is_configuration_error() {
        let err = LogoutSettings::load("/nonexistent/kc-slo.toml").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn name_id_from_settings() {
        let settings = LogoutSettings::default()
            .with_name_identifier("user@example.com", Some(NameIdFormat::Email.uri()))
            .with_sp_name_qualifier("https://sp.example.com");
        let name_id = settings.name_id();

        assert_eq!(name_id.value, "user@example.com");
        assert_eq!(name_id.parsed_format(), NameIdFormat::Email);
        assert_eq!(name_id.name_qualifier.as_deref(), Some("https://sp.example.com"));
    }

    #[test]
    fn transient_name_id_without_value() {
        let settings = LogoutSettings::default().with_sp_name_qualifier("ignored");
        let a = settings.name_id();
        let b = settings.name_id();

        assert_ne!(a.value, b.value);
        assert_eq!(a.parsed_format(), NameIdFormat::Transient);
        assert!(a.name_qualifier.is_none());
    }

    #[test]
    fn unsigned_when_signing_disabled() {
        let settings = LogoutSettings::default().with_key_pair("key", Some("cert"));
        assert_eq!(settings.signing_mode().unwrap(), SigningMode::Unsigned);
    }

    #[test]
    fn signing_without_key_fails() {
        let settings = LogoutSettings::default().with_signing(false, SignatureAlgorithm::RsaSha256);
        assert!(settings.signing_mode().unwrap_err().is_configuration());
    }

    #[test]
    fn embedded_takes_priority_with_certificate() {
        let settings = LogoutSettings::default()
            .with_key_pair("key", Some("cert"))
            .with_signing(true, SignatureAlgorithm::RsaSha512)
            .with_digest(DigestAlgorithm::Sha512);
        assert_eq!(
            settings.signing_mode().unwrap(),
            SigningMode::Embedded {
                signature: SignatureAlgorithm::RsaSha512,
                digest: DigestAlgorithm::Sha512,
            }
        );
    }

    #[test]
    fn embedded_without_certificate_is_unsigned() {
        let settings = LogoutSettings::default()
            .with_key_pair("key", None::<String>)
            .with_signing(true, SignatureAlgorithm::RsaSha256);
        assert_eq!(settings.signing_mode().unwrap(), SigningMode::Unsigned);
    }

    #[test]
    fn detached_when_not_embedded() {
        let settings = LogoutSettings::default()
            .with_key_pair("key", Some("cert"))
            .with_signing(false, SignatureAlgorithm::RsaSha384);
        assert_eq!(
            settings.signing_mode().unwrap(),
            SigningMode::Detached {
                signature: SignatureAlgorithm::RsaSha384
            }
        );
    }

    #[test]
    fn unknown_signature_method_is_signing_error() {
        let mut settings = LogoutSettings::default()
            .with_key_pair("key", None::<String>)
            .with_signing(false, SignatureAlgorithm::RsaSha256);
        settings.security.signature_method = "urn:unknown".to_string();
        assert!(matches!(settings.signing_mode(), Err(SamlError::Signing(_))));
    }

    #[test]
    fn deprecated_signature_method_still_resolves() {
        let settings = LogoutSettings::default()
            .with_key_pair("key", None::<String>)
            .with_signing(false, SignatureAlgorithm::RsaSha1);
        assert_eq!(
            settings.signing_mode().unwrap(),
            SigningMode::Detached {
                signature: SignatureAlgorithm::RsaSha1
            }
        );
    }

    #[test]
    fn debug_redacts_private_key() {
        let settings = LogoutSettings::default().with_key_pair("SECRET", None::<String>);
        assert!(!format!("{settings:?}").contains("SECRET"));
    }
}
