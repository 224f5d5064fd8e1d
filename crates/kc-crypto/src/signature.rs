//! Signature error types.

use thiserror::Error;

/// Error type for signature operations.
#[derive(Debug, Error)]
pub enum SignatureError {
    /// Signing failed.
    #[error("signing failed: {0}")]
    Signing(String),

    /// Verification failed.
    #[error("signature verification failed")]
    Verification,

    /// Invalid key format.
    #[error("invalid key format: {0}")]
    InvalidKey(String),

    /// Algorithm not supported.
    #[error("algorithm not supported: {0}")]
    UnsupportedAlgorithm(String),
}
