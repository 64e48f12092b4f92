//! Binary crate for the `weatherbot` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Process bootstrap (logging, config, serving)
//! - A smoke-test client for a running server

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod smoke;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weatherbot=info,weatherbot_core=info,tower_http=info".into()),
        )
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
