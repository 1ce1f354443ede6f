//! Common test utilities and helpers for integration tests.
//!
//! This module provides shared functionality used across all integration tests,
//! including test app setup and HTTP request helpers.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use exporter::{create_router, AppState, Scheduler};
use http_body_util::BodyExt;
use serde_json::Value;
use shared::config::SyncConfig;
use shared::sync::SyncEngine;
use shared::testing::InMemorySource;
use std::sync::Arc;
use std::time::Duration;

/// Creates a test router backed by a fresh metric registry.
///
/// # Returns
///
/// A tuple containing the configured router and the app state.
pub fn test_app() -> (Router, AppState) {
    let state = AppState::with_fresh_registry().unwrap();
    let router = create_router(state.clone());
    (router, state)
}

/// Builds a scheduler that feeds the app state's sink from an in-memory source.
pub fn scheduler_for(state: &AppState, source: Arc<InMemorySource>, config: &SyncConfig) -> Scheduler {
    Scheduler::new(
        SyncEngine::new(config),
        source,
        state.sink().clone(),
        state.status().clone(),
        Duration::from_secs(60),
    )
}

/// Helper to make a GET request and read the body as text.
pub async fn get_text(app: Router, uri: &str) -> (StatusCode, String) {
    let response = tower::ServiceExt::oneshot(
        app,
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();

    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body_bytes.to_vec()).unwrap())
}

/// Helper to make a GET request.
///
/// # Returns
///
/// A tuple containing the response status code and parsed JSON response body.
pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, text) = get_text(app, uri).await;
    let json: Value = serde_json::from_str(&text).unwrap_or(Value::Null);
    (status, json)
}
