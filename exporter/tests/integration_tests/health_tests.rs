//! Integration tests for the index and health endpoints.

use axum::http::StatusCode;
use shared::config::SyncConfig;
use shared::models::{Check, CheckId};
use shared::testing::InMemorySource;
use std::sync::Arc;

use super::common::{get, get_text, scheduler_for, test_app};

#[tokio::test]
async fn test_index_reports_running() {
    let (app, _state) = test_app();

    let (status, body) = get_text(app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "running");
}

#[tokio::test]
async fn test_health_check() {
    let (app, _state) = test_app();

    let (status, response) = get(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["status"], "healthy");
    assert_eq!(response["service"], "pingdom-exporter");
    assert_eq!(response["cycles"], 0);
}

#[tokio::test]
async fn test_health_follows_upstream_state() {
    let (app, state) = test_app();
    let source = Arc::new(
        InMemorySource::new().with_checks(vec![Check::new(CheckId(1), "a", "a.example.com")]),
    );
    let mut scheduler = scheduler_for(&state, source.clone(), &SyncConfig::default());

    scheduler.tick().await;
    let (_, response) = get(app.clone(), "/health").await;
    assert_eq!(response["upstream_up"], true);
    assert!(response.get("last_error").is_none());

    source.fail_checks(true);
    scheduler.tick().await;
    let (status, response) = get(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["upstream_up"], false);
    assert_eq!(response["cycles"], 2);
    assert!(response["last_error"]
        .as_str()
        .unwrap()
        .starts_with("Error getting checks"));
}
