//! CLI argument parsing.

use std::path::PathBuf;

use clap::Parser;

/// kc-slo - Build a SAML single logout redirect URL.
#[derive(Debug, Parser)]
#[command(name = "kc-slo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the SP logout settings (TOML).
    #[arg(short, long, env = "KC_SLO_SETTINGS")]
    pub settings: PathBuf,

    /// RelayState to send along with the request.
    #[arg(short, long)]
    pub relay_state: Option<String>,

    /// Extra query parameter, repeatable.
    #[arg(short, long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    /// Print the logout request XML before the URL.
    #[arg(long)]
    pub print_xml: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses a `key=value` pair.
///
/// # Errors
///
/// Returns an error if there is no `=` or the key is empty.
pub fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}
