//! SP-initiated single logout.
//!
//! [`SloBuilder`] runs the whole pipeline for one [`LogoutRequest`]:
//! document construction, optional enveloped signing, serialization,
//! encoding, optional detached signing and URL assembly.
//!
//! ```rust,ignore
//! let settings = LogoutSettings::load("sp.toml")?;
//! let url = SloBuilder::new(&settings)
//!     .create(&LogoutRequest::new(), &RequestParams::new().with_relay_state("/home"))?;
//! ```

use base64::Engine;

use crate::bindings::{
    HttpRedirectBinding, RequestParams, RESERVED_PARAMS, SAML_REQUEST, SIGNATURE, SIG_ALG,
};
use crate::error::{SamlError, SamlResult};
use crate::settings::LogoutSettings;
use crate::signature::{MessageSigner, SigningCredentials, SigningMode, XmlSigner};
use crate::types::LogoutRequest;
use crate::xml::Element;

/// Builds logout request redirects from shared, read-only settings.
pub struct SloBuilder<'a, S = XmlSigner> {
    settings: &'a LogoutSettings,
    signer: S,
}

impl<'a> SloBuilder<'a, XmlSigner> {
    /// Creates a builder that signs with [`XmlSigner`].
    #[must_use]
    pub const fn new(settings: &'a LogoutSettings) -> Self {
        Self {
            settings,
            signer: XmlSigner::new(),
        }
    }
}

impl<'a, S: MessageSigner> SloBuilder<'a, S> {
    /// Creates a builder with a custom signing primitive.
    #[must_use]
    pub const fn with_signer(settings: &'a LogoutSettings, signer: S) -> Self {
        Self { settings, signer }
    }

    /// Returns the settings.
    #[must_use]
    pub const fn settings(&self) -> &LogoutSettings {
        self.settings
    }

    /// Builds the request document, signed in place when embedded signing applies.
    ///
    /// # Errors
    ///
    /// Returns an error if the signing policy cannot be satisfied or signing fails.
    pub fn build_document(&self, request: &LogoutRequest) -> SamlResult<Element> {
        let (mode, credentials) = self.resolve_signing()?;
        self.document(request, mode, credentials.as_ref())
    }

    /// Builds the redirect query parameters.
    ///
    /// The result starts with `SAMLRequest`, followed by the caller's
    /// parameters in order and, for detached signing, `SigAlg` and
    /// `Signature`. Caller values for reserved keys are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if signing is misconfigured, encoding fails or the
    /// signing primitive fails.
    pub fn create_params(
        &self,
        request: &LogoutRequest,
        params: &RequestParams,
    ) -> SamlResult<RequestParams> {
        let (mode, credentials) = self.resolve_signing()?;
        tracing::debug!(request_id = %request.id(), mode = mode.name(), "Building SLO logout request");

        let document = self.document(request, mode, credentials.as_ref())?;
        let xml = document.to_xml(self.settings.quote_style());
        tracing::debug!("Created SLO Logout Request: {}", xml);

        let saml_request = HttpRedirectBinding::encode_message(&xml, self.settings.compress_request)?;

        let mut request_params = RequestParams::new().with(SAML_REQUEST, saml_request.as_str());
        for (key, value) in params.iter() {
            if RESERVED_PARAMS.contains(&key) {
                tracing::warn!(param = key, "Ignoring caller-supplied reserved SLO parameter");
                continue;
            }
            request_params.push(key, value);
        }

        if let (SigningMode::Detached { signature }, Some(credentials)) = (mode, &credentials) {
            let sig_alg = signature.uri();
            let to_sign =
                HttpRedirectBinding::signed_query_string(&saml_request, params.relay_state(), sig_alg);
            let signed = self.signer.sign_detached(to_sign.as_bytes(), credentials, signature)?;

            request_params.push(SIG_ALG, sig_alg);
            request_params.push(
                SIGNATURE,
                base64::engine::general_purpose::STANDARD.encode(signed),
            );
        }

        Ok(request_params)
    }

    /// Builds the complete redirect URL to the IdP SLO endpoint.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no SLO target URL is configured, and
    /// any error of [`Self::create_params`].
    pub fn create(&self, request: &LogoutRequest, params: &RequestParams) -> SamlResult<String> {
        let target = self.settings.idp_slo_target_url.as_deref().ok_or_else(|| {
            SamlError::Configuration("no IdP SLO target URL configured".to_string())
        })?;

        let request_params = self.create_params(request, params)?;
        HttpRedirectBinding::assemble_url(target, &request_params)
    }

    fn resolve_signing(&self) -> SamlResult<(SigningMode, Option<SigningCredentials>)> {
        let mode = self.settings.signing_mode()?;
        if mode == SigningMode::Unsigned {
            return Ok((mode, None));
        }

        let credentials = self.settings.credentials()?.ok_or_else(|| {
            SamlError::Configuration("signing requested but no private key is configured".to_string())
        })?;
        Ok((mode, Some(credentials)))
    }

    fn document(
        &self,
        request: &LogoutRequest,
        mode: SigningMode,
        credentials: Option<&SigningCredentials>,
    ) -> SamlResult<Element> {
        let mut document = request.to_element(self.settings);

        if let (SigningMode::Embedded { signature, digest }, Some(credentials)) = (mode, credentials) {
            self.signer
                .sign_embedded(&mut document, credentials, signature, digest)?;
        }

        Ok(document)
    }
}
