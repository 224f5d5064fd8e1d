//! HTTP-Redirect Binding implementation.
//!
//! Encodes SAML messages into query parameters and assembles the redirect
//! URL. The signed portion of the query string is built here as well, since
//! its byte layout must match what the receiver recomputes.

use base64::Engine;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use std::fmt::Write as _;
use std::io::{Read, Write};

use crate::error::{SamlError, SamlResult};

use super::{DecodedMessage, RequestParams, RELAY_STATE, SAML_REQUEST, SIGNATURE, SIG_ALG};

/// HTTP-Redirect binding encoder/decoder.
pub struct HttpRedirectBinding;

impl HttpRedirectBinding {
    /// Encodes a serialized message as a `SAMLRequest` value.
    ///
    /// The XML is raw-DEFLATE compressed when `compress` is set and then
    /// base64 encoded without line wrapping.
    ///
    /// # Errors
    ///
    /// Returns an encoding error if compression fails.
    pub fn encode_message(xml: &str, compress: bool) -> SamlResult<String> {
        let payload = if compress {
            deflate(xml.as_bytes())?
        } else {
            xml.as_bytes().to_vec()
        };
        Ok(base64::engine::general_purpose::STANDARD.encode(payload))
    }

    /// Decodes a `SAMLRequest` value back into XML.
    ///
    /// Uncompressed payloads are accepted: if inflating fails the base64
    /// decoded bytes are used as they are.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not base64 or not UTF-8.
    pub fn decode_message(encoded: &str) -> SamlResult<String> {
        let raw = base64::engine::general_purpose::STANDARD.decode(encoded.trim())?;

        let bytes = match inflate(&raw) {
            Ok(inflated) if looks_like_xml(&inflated) => inflated,
            _ => raw,
        };

        String::from_utf8(bytes)
            .map_err(|e| SamlError::InvalidRequest(format!("Invalid UTF-8 in message: {e}")))
    }

    /// Builds the exact string a detached redirect signature covers:
    /// `SAMLRequest=<enc>[&RelayState=<enc>]&SigAlg=<enc>`.
    #[must_use]
    pub fn signed_query_string(saml_request: &str, relay_state: Option<&str>, sig_alg: &str) -> String {
        let mut to_sign = format!("{SAML_REQUEST}={}", urlencoding::encode(saml_request));

        if let Some(rs) = relay_state {
            let _ = write!(to_sign, "&{RELAY_STATE}={}", urlencoding::encode(rs));
        }

        let _ = write!(to_sign, "&{SIG_ALG}={}", urlencoding::encode(sig_alg));
        to_sign
    }

    /// Appends the parameters to `base_url` as a query string.
    ///
    /// `SAMLRequest` is written first, then every other parameter in order.
    /// The separator is `&` if `base_url` already has a query, `?` otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if `params` has no `SAMLRequest`.
    pub fn assemble_url(base_url: &str, params: &RequestParams) -> SamlResult<String> {
        let saml_request = params
            .get(SAML_REQUEST)
            .ok_or_else(|| SamlError::InvalidRequest("No SAMLRequest parameter".to_string()))?;

        let separator = if base_url.contains('?') { '&' } else { '?' };
        let mut url = format!(
            "{base_url}{separator}{SAML_REQUEST}={}",
            urlencoding::encode(saml_request)
        );

        for (key, value) in params.iter().filter(|(k, _)| *k != SAML_REQUEST) {
            let _ = write!(url, "&{key}={}", urlencoding::encode(value));
        }

        Ok(url)
    }

    /// Decodes a message from a full redirect URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or carries no decodable `SAMLRequest`.
    pub fn decode_url(url: &str) -> SamlResult<DecodedMessage> {
        let parsed = url::Url::parse(url)
            .map_err(|e| SamlError::InvalidRequest(format!("Invalid URL: {e}")))?;

        let mut saml_request = None;
        let mut relay_state = None;
        let mut signature = None;
        let mut sig_alg = None;
        let mut extra = RequestParams::new();

        for (key, value) in parsed.query_pairs() {
            match key.as_ref() {
                SAML_REQUEST => saml_request = Some(value.into_owned()),
                RELAY_STATE => relay_state = Some(value.into_owned()),
                SIGNATURE => signature = Some(value.into_owned()),
                SIG_ALG => sig_alg = Some(value.into_owned()),
                _ => extra.push(key.into_owned(), value.into_owned()),
            }
        }

        let encoded = saml_request
            .ok_or_else(|| SamlError::InvalidRequest("No SAMLRequest parameter".to_string()))?;

        Ok(DecodedMessage {
            xml: Self::decode_message(&encoded)?,
            relay_state,
            signature,
            sig_alg,
            extra,
        })
    }

    /// Extracts the signed portion of a redirect URL's query string.
    ///
    /// The raw (still percent-encoded) `SAMLRequest`, `RelayState` and
    /// `SigAlg` pairs are joined in that order, which is what a detached
    /// signature must be verified against.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL has no `SAMLRequest` or `SigAlg`.
    pub fn extract_signed_query(url: &str) -> SamlResult<String> {
        let query = url
            .split_once('?')
            .map(|(_, q)| q)
            .ok_or_else(|| SamlError::InvalidRequest("URL has no query string".to_string()))?;

        let raw_pair = |name: &str| {
            query
                .split('&')
                .find(|pair| pair.split_once('=').is_some_and(|(k, _)| k == name))
        };

        let saml_request = raw_pair(SAML_REQUEST)
            .ok_or_else(|| SamlError::InvalidRequest("No SAMLRequest parameter".to_string()))?;
        let sig_alg = raw_pair(SIG_ALG)
            .ok_or_else(|| SamlError::InvalidRequest("No SigAlg parameter".to_string()))?;

        let mut parts = vec![saml_request];
        if let Some(relay_state) = raw_pair(RELAY_STATE) {
            parts.push(relay_state);
        }
        parts.push(sig_alg);

        Ok(parts.join("&"))
    }
}

fn looks_like_xml(bytes: &[u8]) -> bool {
    std::str::from_utf8(bytes).is_ok_and(|s| s.trim_start().starts_with('<'))
}

/// Compresses data using DEFLATE (raw, no zlib header).
///
/// # Errors
///
/// Returns an encoding error if the encoder fails.
pub fn deflate(data: &[u8]) -> SamlResult<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| SamlError::Encoding(format!("Compression error: {e}")))?;
    encoder
        .finish()
        .map_err(|e| SamlError::Encoding(format!("Compression finish error: {e}")))
}

/// Decompresses raw DEFLATE data.
///
/// # Errors
///
/// Returns a deflate error if the data is not a valid raw DEFLATE stream.
pub fn inflate(data: &[u8]) -> SamlResult<Vec<u8>> {
    let mut decoder = DeflateDecoder::new(data);
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| SamlError::Deflate(format!("Decompression error: {e}")))?;
    Ok(decompressed)
}
