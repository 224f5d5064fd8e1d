//! # kc-slo
//!
//! Builds an SP-initiated SAML logout redirect URL from a settings file.

#![forbid(unsafe_code)]

pub mod cli;

use anyhow::Context;
use kc_protocol_saml::{HttpRedirectBinding, LogoutRequest, LogoutSettings, RequestParams, SloBuilder};

use crate::cli::Cli;

/// Output of a single run.
#[derive(Debug)]
pub struct Output {
    /// The redirect URL.
    pub url: String,
    /// The decoded request document, when requested.
    pub xml: Option<String>,
}

/// Loads the settings and builds the redirect URL.
///
/// # Errors
///
/// Returns an error if the settings cannot be loaded or the request cannot be built.
pub fn run(cli: &Cli) -> anyhow::Result<Output> {
    let settings = LogoutSettings::load(&cli.settings)
        .with_context(|| format!("Failed to load settings from {}", cli.settings.display()))?;

    let mut params = RequestParams::new();
    if let Some(relay_state) = &cli.relay_state {
        params.push(kc_protocol_saml::bindings::RELAY_STATE, relay_state.as_str());
    }
    for (key, value) in &cli.params {
        params.push(key.as_str(), value.as_str());
    }

    let request = LogoutRequest::new();
    tracing::info!(request_id = %request.id(), "Building logout request");

    let url = SloBuilder::new(&settings)
        .create(&request, &params)
        .context("Failed to build logout request")?;

    let xml = if cli.print_xml {
        Some(HttpRedirectBinding::decode_url(&url)?.xml)
    } else {
        None
    };

    Ok(Output { url, xml })
}
