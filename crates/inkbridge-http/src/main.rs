//! inkbridge-http - serve the tool-invocation proxy over HTTP

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use inkbridge_core::telemetry::HTTP_SOURCE;
use inkbridge_core::{
    CompletionMode, EnvSecretStore, ProxyConfig, ToolInvocationProxy, TracingLogger,
};

#[derive(Parser)]
#[command(name = "inkbridge-http")]
#[command(about = "HTTP adapter for the Solana resources tool")]
#[command(version)]
struct Cli {
    /// YAML config file (default: user config dir, then built-in defaults)
    #[arg(short, long, env = "INKBRIDGE_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, overrides http.bind
    #[arg(short, long, env = "INKBRIDGE_BIND")]
    bind: Option<String>,

    /// Completion mode, overrides completion.mode
    #[arg(short, long, env = "INKBRIDGE_MODE")]
    mode: Option<CompletionMode>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let mut config = ProxyConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(bind) = cli.bind {
        config.http.bind = bind;
    }
    if let Some(mode) = cli.mode {
        config.completion.mode = Some(mode);
    }

    let proxy = ToolInvocationProxy::from_config(
        &config,
        &EnvSecretStore::new(),
        CompletionMode::Buffered,
        HTTP_SOURCE,
        Arc::new(TracingLogger::new("proxy")),
    );
    if !proxy.has_credential() {
        tracing::warn!(
            key = %config.credential.key,
            "credential not set; every request will fail until it is"
        );
    }

    let app = inkbridge_http::router(Arc::new(proxy), &config.http.route);

    let listener = tokio::net::TcpListener::bind(&config.http.bind)
        .await
        .with_context(|| format!("binding {}", config.http.bind))?;
    info!("Listening on http://{}/api/{}", config.http.bind, config.http.route);

    axum::serve(listener, app).await?;
    Ok(())
}
