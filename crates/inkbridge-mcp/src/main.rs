//! inkbridge-mcp - serve the Solana resources tool over MCP stdio
//!
//! stdout carries the protocol; all diagnostics go to stderr.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use inkbridge_core::{CompletionMode, EnvSecretStore, ProxyConfig, TracingLogger};
use inkbridge_mcp::InkbridgeServer;

#[derive(Parser)]
#[command(name = "inkbridge-mcp")]
#[command(about = "MCP stdio server for Solana development resources")]
#[command(version)]
struct Cli {
    /// YAML config file (default: user config dir, then built-in defaults)
    #[arg(short, long, env = "INKBRIDGE_CONFIG")]
    config: Option<PathBuf>,

    /// Completion mode, overrides completion.mode
    #[arg(short, long, env = "INKBRIDGE_MODE")]
    mode: Option<CompletionMode>,

    /// Forward tool calls to a deployed HTTP adapter, overrides relay.url
    #[arg(long, env = "INKBRIDGE_RELAY_URL")]
    relay_url: Option<String>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let mut config = ProxyConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(mode) = cli.mode {
        config.completion.mode = Some(mode);
    }
    if let Some(url) = cli.relay_url {
        config.relay.url = Some(url);
    }

    let server = InkbridgeServer::from_config(
        &config,
        &EnvSecretStore::new(),
        Arc::new(TracingLogger::new("mcp")),
    );

    info!("Solana MCP server running on stdio");

    // Run with stdio transport
    let transport = rmcp::transport::io::stdio();
    let service = rmcp::serve_server(server, transport).await?;
    service.waiting().await?;

    Ok(())
}
