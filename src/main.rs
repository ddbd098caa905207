//! WikiSpace: a clutter-free reading proxy for Wikipedia.
//!
//! # Architecture Overview
//!
//! ```text
//!     Browser                ┌──────────────────────────────────────────────┐
//!     ───────── GET / ──────▶│ http::handlers                               │
//!                            │   validate targetUrl → retry(fetch) ─────────┼──▶ Wikipedia
//!                            │                          │                   │
//!                            │                          ▼                   │
//!                            │ transform: filter → collapsibles → forms     │
//!                            │            → links → branding                │
//!     ◀──────── HTML ────────┤                                              │
//!     ── GET /resource ─────▶│ validate → retry(fetch) → bytes + caching ───┼──▶ Wikimedia
//!                            └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use wikispace::config::{self, validation::validate_config, ConfigError, ProxyConfig};
use wikispace::http::HttpServer;
use wikispace::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "wikispace")]
#[command(about = "Clutter-free reading proxy for Wikipedia", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in defaults when omitted.
    #[arg(short, long, env = "WIKISPACE_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on, overriding the configured bind address port.
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,
}

fn resolve_config(cli: &Cli) -> Result<ProxyConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => ProxyConfig::default(),
    };

    if let Some(port) = cli.port {
        let host = config
            .listener
            .bind_address
            .rsplit_once(':')
            .map(|(host, _)| host.to_string())
            .unwrap_or_else(|| "0.0.0.0".to_string());
        config.listener.bind_address = format!("{host}:{port}");
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    logging::init(&config.observability);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "wikispace starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_retries = config.retries.max_retries,
        retry_delay_ms = config.retries.delay_ms,
        static_files = config.static_files.enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
