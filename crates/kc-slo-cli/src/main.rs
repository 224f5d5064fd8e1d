//! # kc-slo
//!
//! Prints a SAML single logout redirect URL.

#![forbid(unsafe_code)]
#![deny(warnings)]

use clap::Parser;
use kc_slo_cli::cli::Cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let output = kc_slo_cli::run(&cli)?;

    if let Some(xml) = output.xml {
        println!("{xml}");
    }
    println!("{}", output.url);

    Ok(())
}
