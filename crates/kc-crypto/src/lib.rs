//! # kc-crypto
//!
//! Cryptographic primitives for SAML message signing, built on aws-lc-rs.
//!
//! XML-DSig as deployed by SAML identity providers still relies on
//! SHA-256 and, in older installations, SHA-1. This crate exposes those
//! digests alongside RSA PKCS#1 v1.5 signing so the protocol crate can
//! produce both enveloped and redirect-binding signatures.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod algorithm;
pub mod hash;
pub mod legacy;
pub mod pem;
pub mod signature;

pub use algorithm::HashAlgorithm;
pub use hash::{hash, sha1, sha256, sha384, sha512};
pub use legacy::{rsa_public_key_der, rsa_sign_legacy, rsa_verify_legacy, LegacyRsaAlgorithm};
pub use pem::pem_to_der;
pub use signature::SignatureError;
