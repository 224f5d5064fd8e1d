//! XML Signature support for SAML logout requests.
//!
//! Two mutually exclusive signing modes exist for the HTTP-Redirect binding:
//!
//! - **Embedded** - an enveloped `<ds:Signature>` is inserted into the
//!   request document before it is encoded.
//! - **Detached** - the document is left unsigned and a signature over the
//!   `SAMLRequest`, `RelayState` and `SigAlg` query parameters travels in the
//!   `Signature` parameter.
//!
//! The cryptography is reached through the [`MessageSigner`] trait so the
//! pipeline can be exercised with a fake signer. [`XmlSigner`] is the
//! production implementation backed by `kc-crypto`.
//!
//! # Signing Algorithms
//!
//! - RSA-SHA256 (default)
//! - RSA-SHA384
//! - RSA-SHA512
//!
//! RSA-SHA1 and the ECDSA URIs are recognized so that settings naming them
//! fail with a clear signing error instead of an unknown-algorithm error.

mod credentials;
mod signer;

pub use credentials::*;
pub use signer::*;

use kc_crypto::{HashAlgorithm, LegacyRsaAlgorithm};

use crate::error::{SamlError, SamlResult};
use crate::types::{digest_algorithms, signature_algorithms};
use crate::xml::Element;

/// Signature algorithm selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignatureAlgorithm {
    /// RSA with SHA-256 (recommended).
    #[default]
    RsaSha256,
    /// RSA with SHA-384.
    RsaSha384,
    /// RSA with SHA-512.
    RsaSha512,
    /// ECDSA with SHA-256.
    EcdsaSha256,
    /// ECDSA with SHA-384.
    EcdsaSha384,
    /// ECDSA with SHA-512.
    EcdsaSha512,
    /// Legacy RSA with SHA-1 (not recommended).
    RsaSha1,
}

impl SignatureAlgorithm {
    /// Returns the URI for this signature algorithm.
    #[must_use]
    pub const fn uri(&self) -> &'static str {
        match self {
            Self::RsaSha256 => signature_algorithms::RSA_SHA256,
            Self::RsaSha384 => signature_algorithms::RSA_SHA384,
            Self::RsaSha512 => signature_algorithms::RSA_SHA512,
            Self::EcdsaSha256 => signature_algorithms::ECDSA_SHA256,
            Self::EcdsaSha384 => signature_algorithms::ECDSA_SHA384,
            Self::EcdsaSha512 => signature_algorithms::ECDSA_SHA512,
            Self::RsaSha1 => signature_algorithms::RSA_SHA1,
        }
    }

    /// Parses a signature algorithm from its URI.
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Self> {
        match uri {
            signature_algorithms::RSA_SHA256 => Some(Self::RsaSha256),
            signature_algorithms::RSA_SHA384 => Some(Self::RsaSha384),
            signature_algorithms::RSA_SHA512 => Some(Self::RsaSha512),
            signature_algorithms::ECDSA_SHA256 => Some(Self::EcdsaSha256),
            signature_algorithms::ECDSA_SHA384 => Some(Self::EcdsaSha384),
            signature_algorithms::ECDSA_SHA512 => Some(Self::EcdsaSha512),
            signature_algorithms::RSA_SHA1 => Some(Self::RsaSha1),
            _ => None,
        }
    }

    /// Returns true if this algorithm uses a deprecated hash (SHA-1).
    #[must_use]
    pub const fn is_deprecated(&self) -> bool {
        matches!(self, Self::RsaSha1)
    }

    /// Maps this algorithm onto the RSA primitive that implements it.
    ///
    /// # Errors
    ///
    /// Returns a signing error for algorithms without a signing implementation.
    pub fn rsa_algorithm(&self) -> SamlResult<LegacyRsaAlgorithm> {
        match self {
            Self::RsaSha256 => Ok(LegacyRsaAlgorithm::Rs256),
            Self::RsaSha384 => Ok(LegacyRsaAlgorithm::Rs384),
            Self::RsaSha512 => Ok(LegacyRsaAlgorithm::Rs512),
            other => Err(SamlError::Signing(format!(
                "unsupported signature algorithm: {}",
                other.uri()
            ))),
        }
    }
}

/// Digest algorithm selection for embedded signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DigestAlgorithm {
    /// Legacy SHA-1.
    Sha1,
    /// SHA-256 (recommended).
    #[default]
    Sha256,
    /// SHA-384.
    Sha384,
    /// SHA-512.
    Sha512,
}

impl DigestAlgorithm {
    /// Returns the URI for this digest algorithm.
    #[must_use]
    pub const fn uri(&self) -> &'static str {
        match self {
            Self::Sha1 => digest_algorithms::SHA1,
            Self::Sha256 => digest_algorithms::SHA256,
            Self::Sha384 => digest_algorithms::SHA384,
            Self::Sha512 => digest_algorithms::SHA512,
        }
    }

    /// Parses a digest algorithm from its URI.
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Self> {
        match uri {
            digest_algorithms::SHA1 => Some(Self::Sha1),
            digest_algorithms::SHA256 => Some(Self::Sha256),
            digest_algorithms::SHA384 => Some(Self::Sha384),
            digest_algorithms::SHA512 => Some(Self::Sha512),
            _ => None,
        }
    }

    /// Returns the hash primitive for this digest.
    #[must_use]
    pub const fn hash_algorithm(&self) -> HashAlgorithm {
        match self {
            Self::Sha1 => HashAlgorithm::Sha1,
            Self::Sha256 => HashAlgorithm::Sha256,
            Self::Sha384 => HashAlgorithm::Sha384,
            Self::Sha512 => HashAlgorithm::Sha512,
        }
    }
}

/// How a logout request is signed, resolved once from the settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningMode {
    /// No signature anywhere.
    Unsigned,
    /// Enveloped signature inside the document.
    Embedded {
        /// Signature algorithm.
        signature: SignatureAlgorithm,
        /// Digest algorithm for the reference.
        digest: DigestAlgorithm,
    },
    /// Signature over the redirect query string.
    Detached {
        /// Signature algorithm, also sent as `SigAlg`.
        signature: SignatureAlgorithm,
    },
}

impl SigningMode {
    /// Returns a short name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Unsigned => "unsigned",
            Self::Embedded { .. } => "embedded",
            Self::Detached { .. } => "detached",
        }
    }
}

/// Signing primitive used by the logout pipeline.
pub trait MessageSigner: Send + Sync {
    /// Inserts an enveloped signature into `document`, referencing its `ID`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document has no `ID`, the credentials lack a
    /// certificate, or the primitive fails.
    fn sign_embedded(
        &self,
        document: &mut Element,
        credentials: &SigningCredentials,
        signature: SignatureAlgorithm,
        digest: DigestAlgorithm,
    ) -> SamlResult<()>;

    /// Signs `data` and returns the raw signature bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the primitive fails or the algorithm is unsupported.
    fn sign_detached(
        &self,
        data: &[u8],
        credentials: &SigningCredentials,
        signature: SignatureAlgorithm,
    ) -> SamlResult<Vec<u8>>;
}
