//! SAML 2.0 constants and URIs.
//!
//! Namespace URIs, name ID formats, and the algorithm identifiers used when
//! signing logout requests.

/// SAML 2.0 assertion namespace URI.
pub const SAML_NS: &str = "urn:oasis:names:tc:SAML:2.0:assertion";

/// SAML 2.0 protocol namespace URI.
pub const SAMLP_NS: &str = "urn:oasis:names:tc:SAML:2.0:protocol";

/// XML Digital Signature namespace URI.
pub const XMLDSIG_NS: &str = "http://www.w3.org/2000/09/xmldsig#";

/// Value of the `Version` attribute on every SAML 2.0 protocol message.
pub const SAML_VERSION: &str = "2.0";

/// Format of the `IssueInstant` attribute (UTC, second precision).
pub const ISSUE_INSTANT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

// ============================================================================
// Name ID Formats
// ============================================================================

/// SAML Name ID formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NameIdFormat {
    /// Unspecified name ID format.
    #[default]
    Unspecified,
    /// Email address format.
    Email,
    /// X.509 subject name format.
    X509SubjectName,
    /// Windows domain qualified name format.
    WindowsDomainQualifiedName,
    /// Kerberos principal name format.
    Kerberos,
    /// Entity identifier format.
    Entity,
    /// Persistent identifier format.
    Persistent,
    /// Transient identifier format.
    Transient,
}

impl NameIdFormat {
    /// Returns the URI for this name ID format.
    #[must_use]
    pub const fn uri(&self) -> &'static str {
        match self {
            Self::Unspecified => "urn:oasis:names:tc:SAML:1.1:nameid-format:unspecified",
            Self::Email => "urn:oasis:names:tc:SAML:1.1:nameid-format:emailAddress",
            Self::X509SubjectName => "urn:oasis:names:tc:SAML:1.1:nameid-format:X509SubjectName",
            Self::WindowsDomainQualifiedName => {
                "urn:oasis:names:tc:SAML:1.1:nameid-format:WindowsDomainQualifiedName"
            }
            Self::Kerberos => "urn:oasis:names:tc:SAML:2.0:nameid-format:kerberos",
            Self::Entity => "urn:oasis:names:tc:SAML:2.0:nameid-format:entity",
            Self::Persistent => "urn:oasis:names:tc:SAML:2.0:nameid-format:persistent",
            Self::Transient => "urn:oasis:names:tc:SAML:2.0:nameid-format:transient",
        }
    }

    /// Parses a name ID format from its URI.
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Self> {
        match uri {
            "urn:oasis:names:tc:SAML:1.1:nameid-format:unspecified" => Some(Self::Unspecified),
            "urn:oasis:names:tc:SAML:1.1:nameid-format:emailAddress" => Some(Self::Email),
            "urn:oasis:names:tc:SAML:1.1:nameid-format:X509SubjectName" => {
                Some(Self::X509SubjectName)
            }
            "urn:oasis:names:tc:SAML:1.1:nameid-format:WindowsDomainQualifiedName" => {
                Some(Self::WindowsDomainQualifiedName)
            }
            "urn:oasis:names:tc:SAML:2.0:nameid-format:kerberos" => Some(Self::Kerberos),
            "urn:oasis:names:tc:SAML:2.0:nameid-format:entity" => Some(Self::Entity),
            "urn:oasis:names:tc:SAML:2.0:nameid-format:persistent" => Some(Self::Persistent),
            "urn:oasis:names:tc:SAML:2.0:nameid-format:transient" => Some(Self::Transient),
            _ => None,
        }
    }
}

// ============================================================================
// Signature Algorithms
// ============================================================================

/// XML signature algorithms.
pub mod signature_algorithms {
    /// RSA-SHA256 signature algorithm.
    pub const RSA_SHA256: &str = "http://www.w3.org/2001/04/xmldsig-more#rsa-sha256";

    /// RSA-SHA384 signature algorithm.
    pub const RSA_SHA384: &str = "http://www.w3.org/2001/04/xmldsig-more#rsa-sha384";

    /// RSA-SHA512 signature algorithm.
    pub const RSA_SHA512: &str = "http://www.w3.org/2001/04/xmldsig-more#rsa-sha512";

    /// ECDSA-SHA256 signature algorithm.
    pub const ECDSA_SHA256: &str = "http://www.w3.org/2001/04/xmldsig-more#ecdsa-sha256";

    /// ECDSA-SHA384 signature algorithm.
    pub const ECDSA_SHA384: &str = "http://www.w3.org/2001/04/xmldsig-more#ecdsa-sha384";

    /// ECDSA-SHA512 signature algorithm.
    pub const ECDSA_SHA512: &str = "http://www.w3.org/2001/04/xmldsig-more#ecdsa-sha512";

    /// Legacy RSA-SHA1 signature algorithm (not recommended).
    pub const RSA_SHA1: &str = "http://www.w3.org/2000/09/xmldsig#rsa-sha1";
}

/// Digest algorithms.
pub mod digest_algorithms {
    /// SHA-256 digest algorithm.
    pub const SHA256: &str = "http://www.w3.org/2001/04/xmlenc#sha256";

    /// SHA-384 digest algorithm.
    pub const SHA384: &str = "http://www.w3.org/2001/04/xmldsig-more#sha384";

    /// SHA-512 digest algorithm.
    pub const SHA512: &str = "http://www.w3.org/2001/04/xmlenc#sha512";

    /// Legacy SHA-1 digest algorithm (not recommended).
    pub const SHA1: &str = "http://www.w3.org/2000/09/xmldsig#sha1";
}

/// Signature transform algorithms.
pub mod transform_algorithms {
    /// Enveloped signature transform.
    pub const ENVELOPED_SIGNATURE: &str = "http://www.w3.org/2000/09/xmldsig#enveloped-signature";
}

/// Canonicalization algorithms.
pub mod canonicalization_algorithms {
    /// Exclusive C14N without comments.
    pub const EXCLUSIVE_C14N: &str = "http://www.w3.org/2001/10/xml-exc-c14n#";
}
