//! End-to-end tests against a local stand-in for the Pingdom API.
//!
//! A small Axum server on an ephemeral port serves canned `/checks`,
//! `/probes` and `/results/{id}` responses. The real [`PingdomClient`] polls
//! it and the engine writes into a real [`PrometheusSink`].

use axum::extract::{Path, Query};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use exporter::{PingdomClient, PingdomConfig, PrometheusSink};
use serde_json::{json, Value};
use shared::config::SyncConfig;
use shared::models::CheckId;
use shared::sync::{InventorySource, SourceError, SyncEngine};
use std::collections::HashMap;
use std::net::SocketAddr;
use tokio::net::TcpListener;

const TOKEN: &str = "test-token";

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": {
                "statuscode": 401,
                "statusdesc": "Unauthorized",
                "errormessage": "Invalid token"
            }
        })),
    )
        .into_response()
}

async fn checks(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let with_tags = params.get("include_tags").is_some_and(|v| v == "true");
    let tags = |names: &[&str]| -> Value {
        if with_tags {
            names.iter().map(|n| json!({"name": n, "type": "u", "count": 1})).collect()
        } else {
            json!([])
        }
    };

    Json(json!({
        "checks": [
            {
                "id": 85975,
                "name": "My check 1",
                "hostname": "example.com",
                "resolution": 1,
                "paused": false,
                "status": "up",
                "lastresponsetime": 355,
                "type": "http",
                "tags": tags(&["apache", "detailed"])
            },
            {
                "id": 161748,
                "name": "My check 2",
                "hostname": "mydomain.com",
                "resolution": 5,
                "paused": true,
                "status": "paused",
                "lastresponsetime": -1,
                "type": "ping",
                "tags": tags(&[])
            }
        ],
        "counts": { "total": 2, "limited": 2, "filtered": 2 }
    }))
    .into_response()
}

async fn probes(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!({
        "probes": [
            {
                "id": 1,
                "country": "United Kingdom",
                "city": "Manchester",
                "name": "Manchester, UK",
                "active": true,
                "hostname": "s424.pingdom.com",
                "countryiso": "GB",
                "region": "EU"
            }
        ]
    }))
    .into_response()
}

async fn results(headers: HeaderMap, Path(id): Path<u64>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let results = if id == 85975 {
        json!([{ "probeid": 1, "time": 1_563_361_580, "status": "down", "responsetime": 1210 }])
    } else {
        json!([])
    };
    Json(json!({ "activeprobes": [1], "results": results })).into_response()
}

async fn spawn_pingdom() -> SocketAddr {
    let app = Router::new()
        .route("/api/3.1/checks", get(checks))
        .route("/api/3.1/probes", get(probes))
        .route("/api/3.1/results/{id}", get(results));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client(addr: SocketAddr, token: &str) -> PingdomClient {
    let mut config = PingdomConfig::new(token);
    config.base_url = format!("http://{addr}/api/3.1");
    PingdomClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_client_lists_checks_with_tags() {
    let addr = spawn_pingdom().await;
    let client = client(addr, TOKEN);

    let checks = client.list_checks(true).await.unwrap();

    assert_eq!(checks.len(), 2);
    assert_eq!(checks[0].id, CheckId(85975));
    assert_eq!(checks[0].tags, vec!["apache", "detailed"]);
    assert_eq!(checks[0].last_response_time, 355);
    assert!(checks[1].is_paused());
    assert_eq!(checks[1].last_response_time, 0);
}

#[tokio::test]
async fn test_client_omits_tags_when_not_requested() {
    let addr = spawn_pingdom().await;
    let client = client(addr, TOKEN);

    let checks = client.list_checks(false).await.unwrap();

    assert!(checks.iter().all(|c| c.tags.is_empty()));
}

#[tokio::test]
async fn test_client_surfaces_api_errors() {
    let addr = spawn_pingdom().await;
    let client = client(addr, "wrong-token");

    let err = client.list_checks(true).await.unwrap_err();

    match err {
        SourceError::Upstream { status, message } => {
            assert_eq!(status, 401);
            assert!(message.contains("Invalid token"));
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_client_reports_missing_results() {
    let addr = spawn_pingdom().await;
    let client = client(addr, TOKEN);

    let err = client.latest_result(CheckId(161_748)).await.unwrap_err();

    assert!(matches!(err, SourceError::NoResults(CheckId(161_748))));
}

#[tokio::test]
async fn test_cycle_against_pingdom_api() {
    let addr = spawn_pingdom().await;
    let client = client(addr, TOKEN);
    let sink = PrometheusSink::new().unwrap();
    let mut engine = SyncEngine::new(&SyncConfig::default().with_detailed_tags("detailed"));

    let outcome = engine.run_cycle(&client, &sink).await;

    assert!(outcome.healthy);
    assert_eq!(outcome.checks, 2);
    assert_eq!(outcome.enriched, 1);

    let text = sink.render().unwrap();
    assert!(text.contains("pingdom_up 1"));
    assert!(text.contains(
        r#"pingdom_check_status{city="Manchester",country="GB",hostname="example.com",id="85975",name="My check 1",paused="false",region="EU",resolution="1",tags="apache,detailed"} 2"#
    ));
    assert!(text.contains(
        r#"pingdom_check_response_time{city="Manchester",country="GB",hostname="example.com",id="85975",name="My check 1",paused="false",region="EU",resolution="1",tags="apache,detailed"} 1210"#
    ));
    assert!(text.contains(
        r#"pingdom_check_status{city="",country="",hostname="mydomain.com",id="161748",name="My check 2",paused="true",region="",resolution="5",tags=""} -1"#
    ));
}

#[tokio::test]
async fn test_cycle_with_rejected_token_marks_down() {
    let addr = spawn_pingdom().await;
    let client = client(addr, "wrong-token");
    let sink = PrometheusSink::new().unwrap();
    let mut engine = SyncEngine::new(&SyncConfig::default());

    let outcome = engine.run_cycle(&client, &sink).await;

    assert!(!outcome.healthy);
    assert!(sink.render().unwrap().contains("pingdom_up 0"));
}
