//! Cornhole tournament bracket server.
//!
//! Serves the bracket API over HTTP with an in-memory tournament store.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Error;
use cornhole::{BracketManager, InMemoryStore, tournament::EventBus};
use cornhole_server::{api, config::ServerConfig, logging, metrics};
use pico_args::Arguments;
use tracing::info;

const HELP: &str = "\
Run a cornhole tournament bracket server

USAGE:
  cornhole_server [OPTIONS]

OPTIONS:
  --bind          IP:PORT  Server socket bind address   [default: env SERVER_BIND or 127.0.0.1:8000]
  --metrics-bind  IP:PORT  Prometheus exporter address  [default: env METRICS_BIND, disabled if unset]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:8000)
  METRICS_BIND             Prometheus exporter address (e.g., 0.0.0.0:9090)
  ROSTER_CAP               Maximum players per team  [default: 3]
  JOIN_CODE_LENGTH         Characters per join code  [default: 6]
  EVENT_CHANNEL_CAPACITY   Buffered events per feed subscriber  [default: 256]
  RULES_TEXT               HTML served at /t/{tid}/rules  [default: built-in cornhole rules]
  RUST_LOG                 Log filter  [default: info]
  (A .env file in the working directory is loaded if present)
";

struct Args {
    bind: Option<SocketAddr>,
    metrics_bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        bind: pargs.opt_value_from_str("--bind")?,
        metrics_bind: pargs.opt_value_from_str("--metrics-bind")?,
    };

    logging::init();

    let config = ServerConfig::from_env(args.bind, args.metrics_bind)?;
    config.validate()?;

    if let Some(addr) = config.metrics_bind {
        metrics::init_metrics(addr).map_err(|e| anyhow::anyhow!(e))?;
        info!("Prometheus metrics exported on http://{}/metrics", addr);
    }

    info!(
        "Starting cornhole bracket server at {} (roster cap {}, join code length {})",
        config.bind, config.bracket.roster_cap, config.bracket.join_code_length
    );

    let store = Arc::new(InMemoryStore::new());
    let events = EventBus::new(config.event_channel_capacity);
    let manager = BracketManager::with_event_bus(store, config.bracket.clone(), events);

    let app = api::create_router(api::AppState::with_rules(manager, config.rules_text));

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.bind, e))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Shutting down server...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
