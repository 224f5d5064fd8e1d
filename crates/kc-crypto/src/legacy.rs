//! RSA PKCS#1 v1.5 signatures for XML-DSig and the SAML redirect binding.
//!
//! SAML deployments still negotiate `rsa-sha256` as the common baseline.

use aws_lc_rs::{
    rand::SystemRandom,
    signature::{self, KeyPair, RsaKeyPair},
};

use crate::signature::SignatureError;

/// RSA signature algorithms accepted for SAML signing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyRsaAlgorithm {
    /// RSA PKCS#1 v1.5 with SHA-256.
    Rs256,
    /// RSA PKCS#1 v1.5 with SHA-384.
    Rs384,
    /// RSA PKCS#1 v1.5 with SHA-512.
    Rs512,
}

fn load_key_pair(key_der: &[u8]) -> Result<RsaKeyPair, SignatureError> {
    RsaKeyPair::from_pkcs8(key_der)
        .or_else(|_| RsaKeyPair::from_der(key_der))
        .map_err(|e| SignatureError::InvalidKey(format!("Invalid RSA key: {e}")))
}

/// Signs data using RSA PKCS#1 v1.5.
///
/// # Arguments
///
/// * `key_der` - RSA private key in DER format (PKCS#8 or PKCS#1)
/// * `data` - Data to sign
/// * `algorithm` - Signature algorithm
///
/// # Errors
///
/// Returns an error if the key cannot be parsed or signing fails.
pub fn rsa_sign_legacy(
    key_der: &[u8],
    data: &[u8],
    algorithm: LegacyRsaAlgorithm,
) -> Result<Vec<u8>, SignatureError> {
    let key_pair = load_key_pair(key_der)?;

    let rng = SystemRandom::new();
    let mut signature = vec![0u8; key_pair.public_modulus_len()];

    let padding = match algorithm {
        LegacyRsaAlgorithm::Rs256 => &signature::RSA_PKCS1_SHA256,
        LegacyRsaAlgorithm::Rs384 => &signature::RSA_PKCS1_SHA384,
        LegacyRsaAlgorithm::Rs512 => &signature::RSA_PKCS1_SHA512,
    };

    key_pair
        .sign(padding, &rng, data, &mut signature)
        .map_err(|e| SignatureError::Signing(format!("RSA signing failed: {e}")))?;

    Ok(signature)
}

/// Returns the DER-encoded public key (`RSAPublicKey`) of a private key.
///
/// # Errors
///
/// Returns an error if the key cannot be parsed.
pub fn rsa_public_key_der(key_der: &[u8]) -> Result<Vec<u8>, SignatureError> {
    let key_pair = load_key_pair(key_der)?;
    Ok(key_pair.public_key().as_ref().to_vec())
}

/// Verifies an RSA PKCS#1 v1.5 signature.
///
/// # Arguments
///
/// * `public_key_der` - RSA public key in DER format
/// * `data` - Original data that was signed
/// * `sig` - Signature to verify
/// * `algorithm` - Signature algorithm
///
/// # Errors
///
/// Never fails today; the `Result` leaves room for key parsing errors.
pub fn rsa_verify_legacy(
    public_key_der: &[u8],
    data: &[u8],
    sig: &[u8],
    algorithm: LegacyRsaAlgorithm,
) -> Result<bool, SignatureError> {
    use aws_lc_rs::signature::{
        UnparsedPublicKey, RSA_PKCS1_2048_8192_SHA256, RSA_PKCS1_2048_8192_SHA384,
        RSA_PKCS1_2048_8192_SHA512,
    };

    let verification_alg: &'static dyn signature::VerificationAlgorithm = match algorithm {
        LegacyRsaAlgorithm::Rs256 => &RSA_PKCS1_2048_8192_SHA256,
        LegacyRsaAlgorithm::Rs384 => &RSA_PKCS1_2048_8192_SHA384,
        LegacyRsaAlgorithm::Rs512 => &RSA_PKCS1_2048_8192_SHA512,
    };

    let public_key = UnparsedPublicKey::new(verification_alg, public_key_der);

    match public_key.verify(data, sig) {
        Ok(()) => Ok(true),
        Err(_) => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pem::pem_to_der;

    const TEST_KEY: &str = include_str!("../tests/fixtures/rsa2048.key");

    fn test_key_der() -> Vec<u8> {
        pem_to_der(TEST_KEY, "PRIVATE KEY").unwrap()
    }

    #[test]
    fn sign_and_verify() {
        let key = test_key_der();
        let public_key = rsa_public_key_der(&key).unwrap();

        for alg in [
            LegacyRsaAlgorithm::Rs256,
            LegacyRsaAlgorithm::Rs384,
            LegacyRsaAlgorithm::Rs512,
        ] {
            let sig = rsa_sign_legacy(&key, b"SAMLRequest=abc", alg).unwrap();
            assert_eq!(sig.len(), 256);
            assert!(rsa_verify_legacy(&public_key, b"SAMLRequest=abc", &sig, alg).unwrap());
            assert!(!rsa_verify_legacy(&public_key, b"SAMLRequest=abd", &sig, alg).unwrap());
        }
    }

    #[test]
    fn pkcs1_signatures_are_deterministic() {
        let key = test_key_der();
        let a = rsa_sign_legacy(&key, b"data", LegacyRsaAlgorithm::Rs256).unwrap();
        let b = rsa_sign_legacy(&key, b"data", LegacyRsaAlgorithm::Rs256).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_key_is_rejected() {
        let err = rsa_sign_legacy(b"not a key", b"data", LegacyRsaAlgorithm::Rs256).unwrap_err();
        assert!(matches!(err, SignatureError::InvalidKey(_)));
    }
}
