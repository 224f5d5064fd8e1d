//! XML Signature creation.
//!
//! Produces enveloped XML-DSig signatures and detached redirect-binding
//! signatures with RSA keys.

use base64::Engine;

use crate::error::{SamlError, SamlResult};
use crate::types::{canonicalization_algorithms, transform_algorithms, XMLDSIG_NS};
use crate::xml::{c14n, Element};

use super::{DigestAlgorithm, MessageSigner, SignatureAlgorithm, SigningCredentials};

/// Default [`MessageSigner`] backed by `kc-crypto`.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlSigner;

impl XmlSigner {
    /// Creates a new signer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl MessageSigner for XmlSigner {
    fn sign_embedded(
        &self,
        document: &mut Element,
        credentials: &SigningCredentials,
        signature: SignatureAlgorithm,
        digest: DigestAlgorithm,
    ) -> SamlResult<()> {
        let reference_id = document
            .attribute("ID")
            .ok_or_else(|| SamlError::Signing("document has no ID attribute".to_string()))?
            .to_string();

        if document.child("Signature").is_some() {
            return Err(SamlError::Signing("document is already signed".to_string()));
        }

        let certificate = credentials.certificate_base64().ok_or_else(|| {
            SamlError::Configuration("embedded signing requires a certificate".to_string())
        })?;
        let rsa_algorithm = signature.rsa_algorithm()?;

        // The signature element is not in the tree yet, so this is already the
        // output of the enveloped-signature transform.
        let canonical_document = c14n::canonicalize(document);
        let digest_value = kc_crypto::hash(digest.hash_algorithm(), canonical_document.as_bytes());
        let digest_b64 = base64::engine::general_purpose::STANDARD.encode(digest_value);

        let signed_info = build_signed_info(&reference_id, &digest_b64, signature, digest);
        let canonical_signed_info = c14n::canonicalize_in_scope(&signed_info, &[("ds", XMLDSIG_NS)]);

        let signature_value = kc_crypto::rsa_sign_legacy(
            credentials.private_key_der(),
            canonical_signed_info.as_bytes(),
            rsa_algorithm,
        )?;
        let signature_b64 = base64::engine::general_purpose::STANDARD.encode(signature_value);

        let signature_element = build_signature_element(signed_info, &signature_b64, &certificate);

        // SAML schema order: Issuer, then Signature, then the rest.
        let position = document.child_position("Issuer").map_or(0, |i| i + 1);
        document.insert_child(position, signature_element);

        Ok(())
    }

    fn sign_detached(
        &self,
        data: &[u8],
        credentials: &SigningCredentials,
        signature: SignatureAlgorithm,
    ) -> SamlResult<Vec<u8>> {
        let rsa_algorithm = signature.rsa_algorithm()?;
        Ok(kc_crypto::rsa_sign_legacy(
            credentials.private_key_der(),
            data,
            rsa_algorithm,
        )?)
    }
}

/// Builds the `ds:SignedInfo` element.
fn build_signed_info(
    reference_id: &str,
    digest_b64: &str,
    signature: SignatureAlgorithm,
    digest: DigestAlgorithm,
) -> Element {
    let algorithm = |name: &str, uri: &str| Element::new(name).with_attribute("Algorithm", uri);

    let transforms = Element::new("ds:Transforms")
        .with_child(algorithm(
            "ds:Transform",
            transform_algorithms::ENVELOPED_SIGNATURE,
        ))
        .with_child(algorithm(
            "ds:Transform",
            canonicalization_algorithms::EXCLUSIVE_C14N,
        ));

    let reference = Element::new("ds:Reference")
        .with_attribute("URI", format!("#{reference_id}"))
        .with_child(transforms)
        .with_child(algorithm("ds:DigestMethod", digest.uri()))
        .with_child(Element::new("ds:DigestValue").with_text(digest_b64));

    Element::new("ds:SignedInfo")
        .with_child(algorithm(
            "ds:CanonicalizationMethod",
            canonicalization_algorithms::EXCLUSIVE_C14N,
        ))
        .with_child(algorithm("ds:SignatureMethod", signature.uri()))
        .with_child(reference)
}

/// Builds the complete `ds:Signature` element.
fn build_signature_element(signed_info: Element, signature_b64: &str, certificate_b64: &str) -> Element {
    let key_info = Element::new("ds:KeyInfo").with_child(
        Element::new("ds:X509Data")
            .with_child(Element::new("ds:X509Certificate").with_text(certificate_b64)),
    );

    Element::new("ds:Signature")
        .with_attribute("xmlns:ds", XMLDSIG_NS)
        .with_child(signed_info)
        .with_child(Element::new("ds:SignatureValue").with_text(signature_b64))
        .with_child(key_info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kc_crypto::LegacyRsaAlgorithm;

    const KEY_PEM: &str = include_str!("../../tests/fixtures/sp.key");
    const CERT_PEM: &str = include_str!("../../tests/fixtures/sp.crt");

    fn credentials() -> SigningCredentials {
        SigningCredentials::from_pem(KEY_PEM, Some(CERT_PEM)).unwrap()
    }

    fn document() -> Element {
        Element::new("samlp:LogoutRequest")
            .with_attribute("xmlns:samlp", "urn:oasis:names:tc:SAML:2.0:protocol")
            .with_attribute("xmlns:saml", "urn:oasis:names:tc:SAML:2.0:assertion")
            .with_attribute("ID", "_req1")
            .with_child(Element::new("saml:Issuer").with_text("https://sp.example.com"))
            .with_child(Element::new("saml:NameID").with_text("user"))
    }

    #[test]
    fn embedded_signature_follows_issuer() {
        let mut doc = document();
        XmlSigner
            .sign_embedded(&mut doc, &credentials(), SignatureAlgorithm::RsaSha256, DigestAlgorithm::Sha256)
            .unwrap();

        let names: Vec<&str> = doc.children().map(Element::local_name).collect();
        assert_eq!(names, ["Issuer", "Signature", "NameID"]);

        let signature = doc.child("Signature").unwrap();
        let reference = signature.child("SignedInfo").and_then(|s| s.child("Reference")).unwrap();
        assert_eq!(reference.attribute("URI"), Some("#_req1"));
        assert!(signature
            .child("KeyInfo")
            .and_then(|k| k.child("X509Data"))
            .and_then(|x| x.child("X509Certificate"))
            .is_some());
    }

    #[test]
    fn embedded_signature_verifies() {
        let creds = credentials();
        let unsigned = document();
        let mut doc = unsigned.clone();
        XmlSigner
            .sign_embedded(&mut doc, &creds, SignatureAlgorithm::RsaSha256, DigestAlgorithm::Sha256)
            .unwrap();

        let signature = doc.child("Signature").unwrap();
        let signed_info = signature.child("SignedInfo").unwrap();

        let expected_digest = base64::engine::general_purpose::STANDARD
            .encode(kc_crypto::sha256(c14n::canonicalize(&unsigned).as_bytes()));
        let digest_value = signed_info
            .child("Reference")
            .and_then(|r| r.child("DigestValue"))
            .map(Element::text)
            .unwrap();
        assert_eq!(digest_value, expected_digest);

        let signature_value = base64::engine::general_purpose::STANDARD
            .decode(signature.child("SignatureValue").unwrap().text())
            .unwrap();
        let canonical = c14n::canonicalize_in_scope(signed_info, &[("ds", XMLDSIG_NS)]);
        let public_key = kc_crypto::rsa_public_key_der(creds.private_key_der()).unwrap();
        assert!(kc_crypto::rsa_verify_legacy(
            &public_key,
            canonical.as_bytes(),
            &signature_value,
            LegacyRsaAlgorithm::Rs256
        )
        .unwrap());
    }

    #[test]
    fn embedded_without_issuer_goes_first() {
        let mut doc = Element::new("samlp:LogoutRequest")
            .with_attribute("ID", "_x")
            .with_child(Element::new("saml:NameID").with_text("user"));
        XmlSigner
            .sign_embedded(&mut doc, &credentials(), SignatureAlgorithm::RsaSha512, DigestAlgorithm::Sha512)
            .unwrap();
        assert_eq!(doc.children().next().map(Element::local_name), Some("Signature"));
    }

    #[test]
    fn embedded_requires_certificate_and_id() {
        let no_cert = SigningCredentials::from_pem(KEY_PEM, None).unwrap();
        let err = XmlSigner
            .sign_embedded(&mut document(), &no_cert, SignatureAlgorithm::RsaSha256, DigestAlgorithm::Sha256)
            .unwrap_err();
        assert!(err.is_configuration());

        let mut no_id = Element::new("samlp:LogoutRequest");
        let err = XmlSigner
            .sign_embedded(&mut no_id, &credentials(), SignatureAlgorithm::RsaSha256, DigestAlgorithm::Sha256)
            .unwrap_err();
        assert!(matches!(err, SamlError::Signing(_)));
    }

    #[test]
    fn signing_twice_is_rejected() {
        let mut doc = document();
        let creds = credentials();
        XmlSigner
            .sign_embedded(&mut doc, &creds, SignatureAlgorithm::RsaSha256, DigestAlgorithm::Sha256)
            .unwrap();
        assert!(XmlSigner
            .sign_embedded(&mut doc, &creds, SignatureAlgorithm::RsaSha256, DigestAlgorithm::Sha256)
            .is_err());
    }

    #[test]
    fn detached_signature_verifies() {
        let creds = credentials();
        let data = b"SAMLRequest=abc&SigAlg=http%3A%2F%2Fwww.w3.org%2F2001%2F04%2Fxmldsig-more%23rsa-sha256";
        let sig = XmlSigner
            .sign_detached(data, &creds, SignatureAlgorithm::RsaSha256)
            .unwrap();

        let public_key = kc_crypto::rsa_public_key_der(creds.private_key_der()).unwrap();
        assert!(kc_crypto::rsa_verify_legacy(&public_key, data, &sig, LegacyRsaAlgorithm::Rs256).unwrap());
    }

    #[test]
    fn unsupported_algorithm_is_signing_error() {
        let err = XmlSigner
            .sign_detached(b"data", &credentials(), SignatureAlgorithm::RsaSha1)
            .unwrap_err();
        assert!(matches!(err, SamlError::Signing(_)));
    }
}
