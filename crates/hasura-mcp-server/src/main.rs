use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use hasura_mcp_server::server::Server;
use runtime::Config;
use tracing::{info, warn};

mod runtime;

/// Clap styling
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// Arguments to the MCP server
#[derive(Debug, clap::Parser)]
#[command(
    version,
    styles = STYLES,
    about = "Hasura MCP Server - explore and query a Hasura GraphQL backend from an AI agent",
)]
struct Args {
    /// Path to the config file
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config: Config = match Args::parse().config {
        Some(config_path) => runtime::read_config(&config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?,
        None => runtime::read_config_from_env().context("Failed to read config from env")?,
    };

    let _guard = runtime::setup_logging(&config)?;

    info!(
        "Hasura MCP Server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let headers = config.header_map()?;
    if config.admin_secret.is_none() {
        warn!("No admin secret configured, requests run with the endpoint's default role");
    }

    Ok(Server::builder()
        .transport(config.transport)
        .endpoint(config.endpoint.into_inner())
        .headers(headers)
        .timeout(config.timeout)
        .mutation_mode(config.mutation_mode)
        .build()?
        .start()
        .await?)
}
