//! Integration tests for the scrape endpoint.
//!
//! Tests cover:
//! - Gauge exposition after a successful cycle
//! - Eviction of removed and relabelled checks
//! - The up gauge after a failed cycle

use axum::http::StatusCode;
use shared::config::SyncConfig;
use shared::models::{Check, CheckId, CheckResult, Probe};
use shared::testing::InMemorySource;
use std::sync::Arc;

use super::common::{get_text, scheduler_for, test_app};

#[tokio::test]
async fn test_metrics_empty_before_first_cycle() {
    let (app, _state) = test_app();

    let (status, body) = get_text(app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("pingdom_up 0"));
    assert!(!body.contains("pingdom_check_status{"));
}

#[tokio::test]
async fn test_metrics_after_cycle() {
    let (app, state) = test_app();
    let source = Arc::new(InMemorySource::new().with_checks(vec![
        Check::new(CheckId(1), "shop", "shop.example.com")
            .with_status("down")
            .with_response_time(812)
            .with_tag("web"),
        Check::new(CheckId(2), "api", "api.example.com").with_status("up"),
    ]));
    let mut scheduler = scheduler_for(&state, source, &SyncConfig::default());

    scheduler.tick().await;

    let (status, body) = get_text(app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("pingdom_up 1"));
    assert!(body.contains(
        r#"pingdom_check_status{city="",country="",hostname="shop.example.com",id="1",name="shop",paused="false",region="",resolution="1",tags="web"} 2"#
    ));
    assert!(body.contains(
        r#"pingdom_check_response_time{city="",country="",hostname="shop.example.com",id="1",name="shop",paused="false",region="",resolution="1",tags="web"} 812"#
    ));
    assert!(body.contains(r#"hostname="api.example.com""#));
}

#[tokio::test]
async fn test_removed_and_relabelled_checks_are_evicted() {
    let (app, state) = test_app();
    let source = Arc::new(InMemorySource::new().with_checks(vec![
        Check::new(CheckId(1), "shop", "shop.example.com"),
        Check::new(CheckId(2), "old", "old.example.com"),
    ]));
    let mut scheduler = scheduler_for(&state, source.clone(), &SyncConfig::default());
    scheduler.tick().await;

    source.set_checks(vec![
        Check::new(CheckId(1), "shop", "shop.example.com").with_status("paused")
    ]);
    scheduler.tick().await;

    let (_, body) = get_text(app, "/metrics").await;
    assert!(!body.contains("old.example.com"));
    assert!(!body.contains(r#"paused="false""#));
    assert!(body.contains(r#"paused="true""#));
    assert_eq!(body.matches("pingdom_check_status{").count(), 1);
}

#[tokio::test]
async fn test_failed_cycle_keeps_series() {
    let (app, state) = test_app();
    let source = Arc::new(
        InMemorySource::new().with_checks(vec![Check::new(CheckId(7), "db", "db.example.com")]),
    );
    let mut scheduler = scheduler_for(&state, source.clone(), &SyncConfig::default());
    scheduler.tick().await;

    source.fail_checks(true);
    scheduler.tick().await;

    let (_, body) = get_text(app, "/metrics").await;
    assert!(body.contains("pingdom_up 0"));
    assert!(body.contains(r#"hostname="db.example.com""#));
}

#[tokio::test]
async fn test_enriched_check_carries_probe_location() {
    let (app, state) = test_app();
    let source = Arc::new(
        InMemorySource::new()
            .with_checks(vec![
                Check::new(CheckId(3), "eu", "eu.example.com").with_tag("detailed")
            ])
            .with_probes(vec![Probe::new(44, "EU", "DE", "Frankfurt")])
            .with_result(
                CheckId(3),
                CheckResult {
                    probe_id: 44,
                    status: "up".to_string(),
                    response_time: 120,
                },
            ),
    );
    let config = SyncConfig::default().with_detailed_tags("detailed");
    let mut scheduler = scheduler_for(&state, source, &config);

    scheduler.tick().await;

    let (_, body) = get_text(app, "/metrics").await;
    assert!(body.contains(
        r#"pingdom_check_response_time{city="Frankfurt",country="DE",hostname="eu.example.com",id="3",name="eu",paused="false",region="EU",resolution="1",tags="detailed"} 120"#
    ));
}
