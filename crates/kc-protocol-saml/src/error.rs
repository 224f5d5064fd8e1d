//! SAML error types.
//!
//! Logout request construction either produces a complete redirect URL or
//! fails with one of these errors before any output exists.

use thiserror::Error;

/// Result type for SAML operations.
pub type SamlResult<T> = Result<T, SamlError>;

/// SAML protocol errors.
#[derive(Debug, Error)]
pub enum SamlError {
    /// Settings are unusable for the requested operation.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Serialization, compression or encoding failed.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The signing primitive failed or the algorithm is unsupported.
    #[error("signature creation failed: {0}")]
    Signing(String),

    /// Invalid SAML message on the receiving side.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Base64 decoding error.
    #[error("base64 decode error: {0}")]
    Base64Decode(String),

    /// Deflate decompression error.
    #[error("deflate error: {0}")]
    Deflate(String),
}

impl SamlError {
    /// Returns true if the error stems from the settings rather than the input.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

impl From<base64::DecodeError> for SamlError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Base64Decode(err.to_string())
    }
}

impl From<std::io::Error> for SamlError {
    fn from(err: std::io::Error) -> Self {
        Self::Encoding(err.to_string())
    }
}

impl From<kc_crypto::SignatureError> for SamlError {
    fn from(err: kc_crypto::SignatureError) -> Self {
        match err {
            kc_crypto::SignatureError::InvalidKey(msg) => Self::Configuration(msg),
            other => Self::Signing(other.to_string()),
        }
    }
}

impl From<toml::de::Error> for SamlError {
    fn from(err: toml::de::Error) -> Self {
        Self::Configuration(format!("failed to parse settings: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crypto_errors_are_classified() {
        let err: SamlError = kc_crypto::SignatureError::InvalidKey("bad".to_string()).into();
        assert!(err.is_configuration());

        let err: SamlError =
            kc_crypto::SignatureError::UnsupportedAlgorithm("rsa-sha1".to_string()).into();
        assert!(matches!(err, SamlError::Signing(_)));
    }

    #[test]
    fn error_messages() {
        let err = SamlError::Configuration("no private key".to_string());
        assert_eq!(err.to_string(), "configuration error: no private key");

        let err = SamlError::Encoding("deflate failed".to_string());
        assert_eq!(err.to_string(), "encoding error: deflate failed");
    }
}
