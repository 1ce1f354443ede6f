//! Health check endpoint.
//!
//! Reports process liveness together with the outcome of the last
//! synchronization cycle.

use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status (always "healthy" if reachable).
    pub status: &'static str,
    /// Service name.
    pub service: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Whether the last Pingdom poll succeeded; absent before the first cycle.
    pub upstream_up: Option<bool>,
    /// When the last cycle finished.
    pub last_cycle_at: Option<DateTime<Utc>>,
    /// Error of the last cycle, if it failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
    /// Cycles run since startup.
    pub cycles: u64,
}

/// Creates the health check routes.
pub fn health_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .with_state(state)
}

/// Health check handler.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let last = state.status().last();

    Json(HealthResponse {
        status: "healthy",
        service: "pingdom-exporter",
        version: env!("CARGO_PKG_VERSION"),
        upstream_up: last.as_ref().map(|o| o.healthy),
        last_cycle_at: last.as_ref().map(|o| o.finished_at),
        last_error: last.and_then(|o| o.error),
        cycles: state.status().cycles(),
    })
}
