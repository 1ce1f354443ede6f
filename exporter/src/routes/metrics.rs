//! Prometheus scrape endpoint.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use crate::metrics::PrometheusSink;
use crate::state::AppState;

/// Creates the scrape routes.
pub fn metrics_routes(state: AppState) -> Router {
    Router::new()
        .route("/metrics", get(scrape))
        .with_state(state)
}

async fn scrape(State(state): State<AppState>) -> Response {
    match state.sink().render() {
        Ok(text) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, PrometheusSink::content_type())],
            text,
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to render metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to encode metrics").into_response()
        }
    }
}
