use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};
use weatherbot_core::Config;
use weatherbot_core::api::{AppState, create_router};

use crate::smoke;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherbot", version, about = "Weather chatbot server")]
pub struct Cli {
    /// Config file to use instead of the one in the platform config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server.
    Serve {
        /// Listen host; overrides the config file.
        #[arg(long)]
        host: Option<String>,

        /// Listen port; overrides the config file.
        #[arg(long)]
        port: Option<u16>,
    },

    /// Send messages to a running server and print the replies.
    Ask {
        /// Server base URL; defaults to the configured listen address.
        #[arg(long)]
        server: Option<String>,

        /// Messages to send; defaults to a known and an unknown city.
        messages: Vec<String>,
    },

    /// Interactively set the listen address and save it to the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        match self.command {
            Command::Serve { host, port } => serve(config, host, port).await,
            Command::Ask { server, messages } => {
                let server = server.unwrap_or_else(|| config.server.base_url());
                let messages = if messages.is_empty() {
                    smoke::DEFAULT_MESSAGES.iter().map(|m| m.to_string()).collect()
                } else {
                    messages
                };
                smoke::run(&server, &messages).await
            }
            Command::Configure => configure(config, self.config),
        }
    }
}

async fn serve(mut config: Config, host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let bind_addr = config.server.bind_addr();
    let app = create_router(AppState::new(config)?)?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {bind_addr}"))?;

    tracing::info!(
        "weatherbot v{} listening on {bind_addr}",
        env!("CARGO_PKG_VERSION")
    );

    axum::serve(listener, app).await.context("Server error")
}

fn configure(mut config: Config, path: Option<PathBuf>) -> anyhow::Result<()> {
    let current_host = config.server.host.clone();

    config.server.host = Text::new("Listen host:")
        .with_default(&current_host)
        .prompt()?;
    config.server.port = CustomType::<u16>::new("Listen port:")
        .with_default(config.server.port)
        .with_error_message("Please enter a port number between 0 and 65535")
        .prompt()?;

    let path = match path {
        Some(path) => path,
        None => Config::config_file_path()?,
    };
    config.save_to(&path)?;

    println!("Saved configuration to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_accepts_overrides() {
        let cli = Cli::try_parse_from(["weatherbot", "serve", "--port", "8001"]).unwrap();
        match cli.command {
            Command::Serve { host, port } => {
                assert_eq!(host, None);
                assert_eq!(port, Some(8001));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn ask_collects_messages_and_global_config() {
        let cli = Cli::try_parse_from([
            "weatherbot",
            "ask",
            "Paris",
            "New York",
            "--config",
            "/tmp/weatherbot.toml",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("/tmp/weatherbot.toml")));
        match cli.command {
            Command::Ask { server, messages } => {
                assert_eq!(server, None);
                assert_eq!(messages, vec!["Paris", "New York"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_out_of_range_port() {
        assert!(Cli::try_parse_from(["weatherbot", "serve", "--port", "70000"]).is_err());
    }
}
