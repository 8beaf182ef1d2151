//! Binary crate for the `skycast` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive lookups and configuration
//! - Rendering weather records into the terminal

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cards;
mod cli;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Silent unless RUST_LOG asks for output; diagnostics go to stderr so
    // the rendered region stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
