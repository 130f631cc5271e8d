//! Tracking event relay (v1)
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────────┐
//!                     │                     EVENT RELAY                       │
//!                     │                                                       │
//!   POST / (flat JSON)│  ┌─────────┐    ┌────────────┐    ┌───────────────┐  │
//!   ──────────────────┼─▶│  http   │───▶│  dispatch  │───▶│ worker task   │  │
//!                     │  │ server  │    │ (oneshot + │    │ event: decode │  │
//!                     │  └─────────┘    │  deadline) │    │  → extract    │  │
//!                     │       ▲         └─────┬──────┘    │  → assemble   │  │
//!   200 / 500 + msg   │       │               │           │ relay: POST   │──┼──▶ Downstream
//!   ◀─────────────────┼───────┴───────────────┘◀──────────└───────────────┘  │    Receiver
//!                     │                                                       │
//!                     │  config · observability · lifecycle                   │
//!                     └──────────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use event_relay::config::{load_config, ServiceConfig};
use event_relay::http::HttpServer;
use event_relay::lifecycle::{wait_for_signal, Shutdown};
use event_relay::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "event-relay")]
#[command(about = "Reshapes tracking events and relays them downstream", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };

    logging::init_logging(&config.observability.log_level);

    tracing::info!("event-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config_file = ?cli.config,
        bind_address = %config.listener.bind_address,
        downstream = %config.downstream.url,
        dispatch_timeout_secs = config.dispatch.timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
