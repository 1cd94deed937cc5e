//! Integration tests for the HTTP API
//!
//! Tests the full request/response cycle through the router with the mock repository

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    routing::get as get_route,
    Router,
};
use http_body_util::BodyExt;
use mocks::{
    max_length_title, oversized_title, MockItemRepository, MockOperation, SCENARIO_TITLES,
    SCENARIO_UPDATED_TITLE,
};
use serde_json::{json, Value};
use std::{sync::Arc, time::Duration};
use todo_core::TodoError;
use todo_http_api::{
    with_middleware, ErrorBody, GetResponse, ItemEnvelope, PutResponse, TodoServer, REQUEST_ID_HEADER,
};
use tower::ServiceExt;

fn app(repo: &MockItemRepository) -> Router {
    TodoServer::new(Arc::new(repo.clone())).router()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn raw_request(method: &str, uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn error_message(body: Value) -> String {
    serde_json::from_value::<ErrorBody>(body).unwrap().message
}

#[tokio::test]
async fn test_end_to_end_scenario() {
    let repo = MockItemRepository::new();
    let app = app(&repo);

    for (index, title) in SCENARIO_TITLES.iter().enumerate() {
        let (status, body) = send(&app, json_request("POST", "/api/todo", json!({"title": title}))).await;
        assert_eq!(status, StatusCode::OK);
        let created: ItemEnvelope = serde_json::from_value(body).unwrap();
        assert_eq!(created.item.id, index as i64 + 1);
        assert_eq!(created.item.title, *title);
    }

    let (status, body) = send(&app, get("/api/todo")).await;
    assert_eq!(status, StatusCode::OK);
    let listed: GetResponse = serde_json::from_value(body).unwrap();
    let pairs: Vec<(i64, &str)> = listed.items.iter().map(|i| (i.id, i.title.as_str())).collect();
    assert_eq!(pairs, vec![(1, "first todo"), (2, "second todo")]);

    let (status, body) = send(
        &app,
        json_request("PUT", "/api/todo/1", json!({"title": SCENARIO_UPDATED_TITLE})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated: PutResponse = serde_json::from_value(body).unwrap();
    assert_eq!(updated.item.id, 1);
    assert_eq!(updated.item.title, SCENARIO_UPDATED_TITLE);
    assert!(updated.item.updated_at >= listed.items[0].updated_at);

    let (_, body) = send(&app, get("/api/todo")).await;
    let listed: GetResponse = serde_json::from_value(body).unwrap();
    let pairs: Vec<(i64, &str)> = listed.items.iter().map(|i| (i.id, i.title.as_str())).collect();
    assert_eq!(pairs, vec![(1, "updated first todo"), (2, "second todo")]);
}

#[tokio::test]
async fn test_list_empty_returns_empty_array() {
    let repo = MockItemRepository::new();
    let (status, body) = send(&app(&repo), get("/api/todo")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"items": []}));
}

#[tokio::test]
async fn test_title_length_boundaries() {
    let repo = MockItemRepository::new();
    let app = app(&repo);

    let (status, _) = send(&app, json_request("POST", "/api/todo", json!({"title": max_length_title()}))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, json_request("POST", "/api/todo", json!({"title": oversized_title()}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["title"], "the length must be no more than 200");
    assert_eq!(repo.items().len(), 1);
}

#[tokio::test]
async fn test_validation_failures_never_touch_storage() {
    let repo = MockItemRepository::new();
    let app = app(&repo);

    let (status, body) = send(&app, json_request("POST", "/api/todo", json!({"title": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(body), "title: cannot be blank.");

    let (status, body) = send(&app, json_request("POST", "/api/todo", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["title"], "cannot be blank");

    let (status, body) = send(&app, json_request("PUT", "/api/todo/0", json!({"title": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(body), "id: cannot be blank; title: cannot be blank.");

    repo.assert_untouched();
}

#[tokio::test]
async fn test_bind_failures_are_bad_request() {
    let repo = MockItemRepository::new();
    let app = app(&repo);

    let cases = [
        raw_request("POST", "/api/todo", "{not json"),
        raw_request("POST", "/api/todo", r#"{"title": 5}"#),
        raw_request("PUT", "/api/todo/abc", r#"{"title": "x"}"#),
        Request::post("/api/todo")
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::from("title=x"))
            .unwrap(),
    ];

    for request in cases {
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"message": "bad request"}));
    }

    repo.assert_untouched();
}

#[tokio::test]
async fn test_body_id_is_ignored_on_update() {
    let repo = MockItemRepository::with_items(mocks::create_test_items(2));
    let app = app(&repo);

    let (status, body) = send(&app, json_request("PUT", "/api/todo/2", json!({"id": 1, "title": "second renamed"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["item"]["id"], 2);
    assert_eq!(repo.items()[1].title, "second renamed");
}

#[tokio::test]
async fn test_commit_failure_leaves_table_unchanged() {
    let repo = MockItemRepository::with_items(mocks::create_test_items(1));
    let before = repo.items();
    let app = app(&repo);

    repo.inject_error(MockOperation::Commit, TodoError::Database("disk full".to_string()));
    let (status, body) = send(&app, json_request("POST", "/api/todo", json!({"title": "lost"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"message": "internal server error"}));

    assert_eq!(repo.items(), before);
    let stats = repo.transaction_stats();
    assert_eq!(stats.committed, 0);
    assert_eq!(stats.rolled_back, 1);
}

#[tokio::test]
async fn test_storage_failures_hide_their_cause() {
    let repo = MockItemRepository::new();
    let app = app(&repo);

    repo.inject_error(MockOperation::List, TodoError::Database("secret table name".to_string()));
    let (status, body) = send(&app, get("/api/todo")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_message(body), "internal server error");

    repo.inject_error(MockOperation::Begin, TodoError::Database("pool timed out".to_string()));
    let (status, _) = send(&app, json_request("POST", "/api/todo", json!({"title": "x"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    repo.assert_not_called("create_item");
}

// Current behavior: a missing id is reported as a server error, not 404
#[tokio::test]
async fn test_update_missing_item_is_internal_error() {
    let repo = MockItemRepository::new();
    let app = app(&repo);

    let (status, body) = send(&app, json_request("PUT", "/api/todo/99", json!({"title": "ghost"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_message(body), "internal server error");
    assert!(repo.items().is_empty());
    assert_eq!(repo.transaction_stats().rolled_back, 1);
}

#[tokio::test]
async fn test_health_endpoint() {
    let repo = MockItemRepository::new();
    let app = app(&repo);

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    repo.inject_error(MockOperation::HealthCheck, TodoError::Database("down".to_string()));
    let (status, _) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test(start_paused = true)]
async fn test_deadline_rolls_back_open_transaction() {
    let repo = MockItemRepository::new();
    repo.set_latency(Duration::from_millis(600));
    let app = TodoServer::new(Arc::new(repo.clone()))
        .with_request_timeout(Duration::from_secs(1))
        .router();

    // begin finishes at 600ms, create would finish at 1200ms
    let (status, body) = send(&app, json_request("POST", "/api/todo", json!({"title": "slow"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_message(body), "internal server error");

    assert!(repo.items().is_empty());
    let stats = repo.transaction_stats();
    assert_eq!(stats.begun, 1);
    assert_eq!(stats.rolled_back, 1);
    assert_eq!(stats.open(), 0);
}

#[tokio::test]
async fn test_concurrent_creates_get_distinct_ids() {
    let repo = MockItemRepository::new();
    let app = app(&repo);

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                send(&app, json_request("POST", "/api/todo", json!({"title": format!("todo {i}")}))).await
            })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        let (status, body) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        ids.push(body["item"]["id"].as_i64().unwrap());
    }
    ids.sort();
    assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    assert_eq!(repo.transaction_stats().committed, 10);
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let repo = MockItemRepository::new();
    let app = app(&repo);

    let response = app.clone().oneshot(get("/api/todo")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let generated = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .expect("response should carry a request id")
        .to_str()
        .unwrap()
        .to_string();
    assert!(!generated.is_empty());

    // A second request gets its own id
    let response = app.clone().oneshot(get("/api/todo")).await.unwrap();
    assert_ne!(response.headers()[REQUEST_ID_HEADER], generated.as_str());

    // Caller-supplied ids are kept
    let request = Request::get("/api/todo")
        .header(REQUEST_ID_HEADER, "client-chosen-id")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.headers()[REQUEST_ID_HEADER], "client-chosen-id");
}

#[tokio::test]
async fn test_error_responses_carry_request_id() {
    let repo = MockItemRepository::new();
    let response = app(&repo)
        .oneshot(json_request("POST", "/api/todo", json!({"title": ""})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
}

async fn exploding_handler() -> &'static str {
    panic!("handler bug")
}

#[tokio::test]
async fn test_handler_panic_answers_generic_500() {
    let app = with_middleware(
        Router::new().route("/explode", get_route(exploding_handler)),
        Duration::from_secs(5),
    );

    let response = app.clone().oneshot(get("/explode")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"message": "internal server error"}));

    // The service keeps answering after a panic
    let response = app.oneshot(get("/explode")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
