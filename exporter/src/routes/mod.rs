//! HTTP route definitions.
//!
//! This module organizes all HTTP routes served by the exporter.

mod health;
mod metrics;

pub use health::health_routes;
pub use metrics::metrics_routes;

use axum::{routing::get, Router};

/// Creates the index route, a plain liveness probe.
pub fn index_routes() -> Router {
    Router::new().route("/", get(|| async { "running" }))
}
