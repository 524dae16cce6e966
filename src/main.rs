//! Tandem Server
//!
//! Run with: cargo run
//!
//! # Configuration
//!
//! Environment variables:
//! - `TANDEM_HOST`: Host to bind to (default: 0.0.0.0)
//! - `TANDEM_PORT` / `PORT`: Port to listen on (default: 5000)
//! - `TANDEM_MAX_CONNECTIONS`: Connection cap (default: 1000)
//! - `TANDEM_LOG_LEVEL`: Log level when `RUST_LOG` is unset (default: info)
//! - `TANDEM_LOG_FORMAT`: "pretty" or "json"

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tandem::api::{serve, AppState};
use tandem::config::{Config, LoggingConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Anonymous interest-based pairing and WebRTC signaling relay.
#[derive(Debug, Parser)]
#[command(name = "tandem", version, about)]
struct Cli {
    /// Path to a TOML config file (default: platform config dir,
    /// /etc/tandem/config.toml, ./config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listen host
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_default(),
    };
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    init_tracing(&config.logging);

    tracing::info!("Starting tandem v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Max connections: {}", config.websocket.max_connections);

    let state = AppState::new(config);
    serve(state).await?;

    tracing::info!("Tandem stopped");
    Ok(())
}

/// Initialize tracing. `RUST_LOG` wins over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("tandem={},tower_http=debug", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
