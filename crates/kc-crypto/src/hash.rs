//! Hash functions.

use crate::algorithm::HashAlgorithm;
use aws_lc_rs::digest;

/// Computes a hash of the input data.
#[must_use]
pub fn hash(algorithm: HashAlgorithm, data: &[u8]) -> Vec<u8> {
    let alg = match algorithm {
        HashAlgorithm::Sha1 => &digest::SHA1_FOR_LEGACY_USE_ONLY,
        HashAlgorithm::Sha256 => &digest::SHA256,
        HashAlgorithm::Sha384 => &digest::SHA384,
        HashAlgorithm::Sha512 => &digest::SHA512,
    };

    digest::digest(alg, data).as_ref().to_vec()
}

/// Computes a SHA-1 hash of the input data.
#[must_use]
pub fn sha1(data: &[u8]) -> Vec<u8> {
    hash(HashAlgorithm::Sha1, data)
}

/// Computes a SHA-256 hash of the input data.
#[must_use]
pub fn sha256(data: &[u8]) -> Vec<u8> {
    hash(HashAlgorithm::Sha256, data)
}

/// Computes a SHA-384 hash of the input data.
#[must_use]
pub fn sha384(data: &[u8]) -> Vec<u8> {
    hash(HashAlgorithm::Sha384, data)
}

/// Computes a SHA-512 hash of the input data.
#[must_use]
pub fn sha512(data: &[u8]) -> Vec<u8> {
    hash(HashAlgorithm::Sha512, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digests_have_expected_length() {
        for (alg, len) in [
            (HashAlgorithm::Sha1, 20),
            (HashAlgorithm::Sha256, 32),
            (HashAlgorithm::Sha384, 48),
            (HashAlgorithm::Sha512, 64),
        ] {
            assert_eq!(hash(alg, b"logout").len(), len);
        }
    }

    #[test]
    fn sha256_known_vector() {
        // SHA-256("abc")
        let expected = [
            0xba, 0x78, 0x16, 0xbf, 0x8f, 0x01, 0xcf, 0xea, 0x41, 0x41, 0x40, 0xde, 0x5d, 0xae,
            0x22, 0x23, 0xb0, 0x03, 0x61, 0xa3, 0x96, 0x17, 0x7a, 0x9c, 0xb4, 0x10, 0xff, 0x61,
            0xf2, 0x00, 0x15, 0xad,
        ];
        assert_eq!(sha256(b"abc"), expected);
    }

    #[test]
    fn different_inputs_produce_different_hashes() {
        assert_ne!(sha1(b"hello"), sha1(b"world"));
        assert_ne!(sha384(b"hello"), sha384(b"world"));
    }

    #[test]
    fn hashing_is_deterministic() {
        assert_eq!(sha512(b"hello world"), sha512(b"hello world"));
    }
}
