//! typografd: JSON gateway to the typograf SOAP webservice.
//!
//! # Architecture Overview
//!
//! ```text
//!   POST / {"data": ...}
//!   ─────────────────────▶ http::handler ──▶ pipeline ──▶ soap::escape
//!                                                │            │
//!                                                │            ▼
//!                                                │       soap::envelope (ProcessText)
//!                                                │            │
//!                                                │            ▼
//!                                                │       upstream::client ──▶ typograf.asmx
//!                                                │            │   (single attempt, 500ms)
//!                                                ▼            ▼
//!   ◀───────────────────── JSON response ◀── soap::envelope (ProcessTextResult)
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use typograf_gateway::config::{load_config, GatewayConfig};
use typograf_gateway::lifecycle::{signals, Shutdown};
use typograf_gateway::observability::logging;
use typograf_gateway::HttpServer;

/// Gateway exposing the typograf webservice over JSON.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (TOML); defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overrides listener.bind_address
    #[arg(short, long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error) or a full filter directive
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }
    if let Some(level) = args.log_level {
        config.observability.log_level = level;
    }

    logging::init(Some(&config.observability.log_level));

    tracing::info!("typografd v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.url,
        upstream_timeout_ms = config.upstream.timeout_ms,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        if let Err(e) = signals::wait_for_signal().await {
            tracing::error!(error = %e, "Failed to listen for shutdown signals");
        }
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
