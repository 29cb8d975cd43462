//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use repost_guard::{api::create_router, cache::SeenCache, AppState};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app(max_items: usize) -> Router {
    let cache = SeenCache::new(max_items).unwrap();
    create_router(AppState::new(cache))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn put_json(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// == SEEN Endpoint Tests ==

#[tokio::test]
async fn test_seen_first_sighting() {
    let app = create_test_app(100);

    let (status, json) = put_json(&app, "/seen", r#"{"fingerprint":"abc","label":"general"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["fingerprint"], "abc");
    assert_eq!(json["duplicate"], false);
    assert_eq!(json["label"], "general");
    assert!(json["first_seen"].is_string());
}

#[tokio::test]
async fn test_seen_repost_reports_original() {
    let app = create_test_app(100);

    let (_, first) = put_json(&app, "/seen", r#"{"fingerprint":"abc","label":"general"}"#).await;
    let (status, second) = put_json(&app, "/seen", r#"{"fingerprint":"abc","label":"memes"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["duplicate"], true);
    assert_eq!(second["label"], "general");
    assert_eq!(second["first_seen"], first["first_seen"]);
}

#[tokio::test]
async fn test_seen_empty_fingerprint() {
    let app = create_test_app(100);

    let (status, json) = put_json(&app, "/seen", r#"{"fingerprint":""}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("empty"));
}

#[tokio::test]
async fn test_seen_fingerprint_too_long() {
    let app = create_test_app(100);
    let body = format!(r#"{{"fingerprint":"{}"}}"#, "f".repeat(513));

    let (status, json) = put_json(&app, "/seen", &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_seen_malformed_json() {
    let app = create_test_app(100);

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/seen")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"fingerprint": }"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

// == Batch Endpoint Tests ==

#[tokio::test]
async fn test_batch_applies_items_in_order() {
    let app = create_test_app(100);

    let (status, json) = put_json(
        &app,
        "/seen/batch",
        r#"{"items":[{"fingerprint":"a"},{"fingerprint":"b"},{"fingerprint":"a"}]}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["inserted"], 2);
    assert_eq!(json["duplicates"], 1);
    let flags: Vec<bool> = json["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["duplicate"].as_bool().unwrap())
        .collect();
    assert_eq!(flags, vec![false, false, true]);

    let (_, entries) = send(&app, "GET", "/entries").await;
    let fingerprints: Vec<&str> = entries["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["fingerprint"].as_str().unwrap())
        .collect();
    assert_eq!(fingerprints, vec!["a", "b"]);
}

#[tokio::test]
async fn test_batch_rejects_invalid_item() {
    let app = create_test_app(100);

    let (status, json) = put_json(
        &app,
        "/seen/batch",
        r#"{"items":[{"fingerprint":"ok"},{"fingerprint":""}]}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("Item 1"));

    // Nothing from a rejected batch is stored
    let (_, lookup) = send(&app, "GET", "/seen/ok").await;
    assert_eq!(lookup["seen"], false);
}

// == Lookup / Delete Endpoint Tests ==

#[tokio::test]
async fn test_lookup_after_seen() {
    let app = create_test_app(100);

    let (_, missing) = send(&app, "GET", "/seen/abc").await;
    assert_eq!(missing["seen"], false);
    assert!(missing.get("first_seen").is_none());

    put_json(&app, "/seen", r#"{"fingerprint":"abc"}"#).await;

    let (status, found) = send(&app, "GET", "/seen/abc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["seen"], true);
    assert!(found["first_seen"].is_string());
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let app = create_test_app(100);
    put_json(&app, "/seen", r#"{"fingerprint":"abc"}"#).await;

    let (status, first) = send(&app, "DELETE", "/seen/abc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["removed"], true);

    let (status, second) = send(&app, "DELETE", "/seen/abc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["removed"], false);

    // A forgotten fingerprint is new again
    let (_, again) = put_json(&app, "/seen", r#"{"fingerprint":"abc"}"#).await;
    assert_eq!(again["duplicate"], false);
}

// == Eviction Through The API ==

#[tokio::test]
async fn test_capacity_sweep_visible_in_entries_and_stats() {
    let app = create_test_app(4);

    for fp in ["A", "B", "C", "D", "E"] {
        let body = format!(r#"{{"fingerprint":"{}"}}"#, fp);
        put_json(&app, "/seen", &body).await;
    }

    let (_, entries) = send(&app, "GET", "/entries").await;
    assert_eq!(entries["max_items"], 4);
    assert_eq!(entries["size"], 3);
    let fingerprints: Vec<&str> = entries["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["fingerprint"].as_str().unwrap())
        .collect();
    assert_eq!(fingerprints, vec!["C", "D", "E"]);

    let (status, stats) = send(&app, "GET", "/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["inserts"], 5);
    assert_eq!(stats["evictions"], 2);
    assert_eq!(stats["sweeps"], 1);
    assert_eq!(stats["total_entries"], 3);

    // An evicted fingerprint counts as new again
    let (_, json) = put_json(&app, "/seen", r#"{"fingerprint":"A"}"#).await;
    assert_eq!(json["duplicate"], false);
}

#[tokio::test]
async fn test_stats_duplicate_rate() {
    let app = create_test_app(100);

    put_json(&app, "/seen", r#"{"fingerprint":"x"}"#).await;
    put_json(&app, "/seen", r#"{"fingerprint":"x"}"#).await;

    let (_, stats) = send(&app, "GET", "/stats").await;
    assert_eq!(stats["inserts"], 1);
    assert_eq!(stats["rejections"], 1);
    assert!((stats["duplicate_rate"].as_f64().unwrap() - 0.5).abs() < 0.001);
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app(100);

    let (status, json) = send(&app, "GET", "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}
