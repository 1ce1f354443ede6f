//! Pingdom Exporter Server
//!
//! This crate connects the synchronization engine from `shared` to the
//! outside world: it polls the Pingdom API, keeps a set of Prometheus gauges
//! in step with the check inventory, and serves them for scraping.
//!
//! # Architecture
//!
//! The server is built on Axum and Tokio, providing:
//! - A background [`Scheduler`] running one synchronization cycle at a time
//! - A [`PingdomClient`] implementing the engine's inventory source
//! - A [`PrometheusSink`] implementing the engine's metric sink
//! - `/`, `/health` and `/metrics` HTTP routes
//!
//! # Example
//!
//! ```no_run
//! use exporter::{run_server_with_config, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut config = Config::new("pingdom-api-token");
//!     config.sync = config.sync.with_detailed_tags("detailed");
//!     run_server_with_config(config).await
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
pub mod metrics;
pub mod pingdom;
mod routes;
mod scheduler;
mod state;

pub use config::{Config, PingdomConfig, DEFAULT_BASE_URL};
pub use metrics::PrometheusSink;
pub use pingdom::PingdomClient;
pub use scheduler::Scheduler;
pub use state::{AppState, CycleStatus};

use anyhow::{Context, Result};
use axum::Router;
use shared::sync::SyncEngine;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Runs the exporter with the provided configuration.
///
/// The scheduler starts polling immediately. On SIGINT/SIGTERM it is aborted
/// without waiting for an in-flight cycle, then the HTTP server drains.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid
/// - The Pingdom client or the metric registry cannot be created
/// - The server fails to bind to the configured address
pub async fn run_server_with_config(config: Config) -> Result<()> {
    config.validate_config()?;
    let addr = config.socket_addr()?;

    tracing::info!(
        host = %config.host,
        port = %config.port,
        wait_secs = config.sync.poll_interval_secs,
        detailed_tags = ?config.sync.detailed_tags,
        "Pingdom exporter starting"
    );

    let client = PingdomClient::new(&config.pingdom).context("Failed to create Pingdom client")?;
    let state = AppState::with_fresh_registry().context("Failed to register metrics")?;

    let scheduler = Scheduler::new(
        SyncEngine::new(&config.sync),
        Arc::new(client),
        state.sink().clone(),
        state.status().clone(),
        config.sync.poll_interval(),
    )
    .spawn();

    let app = create_router(state);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!(%addr, "Listening for connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            scheduler.abort();
        })
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Creates the main application router with all routes and middleware.
///
/// This function is public to allow testing the router without starting a full server.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::index_routes())
        .merge(routes::health_routes(state.clone()))
        .merge(routes::metrics_routes(state))
        .layer(TraceLayer::new_for_http())
}

/// Waits for a shutdown signal (SIGTERM or SIGINT).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT, exiting");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, exiting");
        }
    }
}
