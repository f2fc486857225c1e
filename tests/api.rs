use std::{sync::Arc, time::Duration};

use anchor_demo::{create_router, AppState};
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use futures::StreamExt;
use serde_json::Value;
use tokio::time::sleep;
use tower::ServiceExt;

fn app() -> (Arc<AppState>, Router) {
    let state = Arc::new(AppState::new(20554, "127.0.0.1".to_string(), Duration::from_secs(1)));
    let router = create_router(Arc::clone(&state));
    (state, router)
}

async fn call(router: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test(start_paused = true)]
async fn start_pause_reset_over_http() {
    let (_state, router) = app();

    let (status, body) = call(&router, Method::POST, "/start").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["view"]["timer"]["is_running"], true);

    sleep(Duration::from_millis(5500)).await;

    let (_, body) = call(&router, Method::POST, "/pause").await;
    assert_eq!(body["status"], "paused");
    assert_eq!(body["view"]["timer"]["elapsed_seconds"], 5);
    assert_eq!(body["view"]["display"], "00:05");

    let (_, body) = call(&router, Method::POST, "/reset").await;
    assert_eq!(body["view"]["timer"]["elapsed_seconds"], 0);
    assert_eq!(body["view"]["timer"]["is_running"], false);
    assert_eq!(body["view"]["display"], "00:00");
}

#[tokio::test(start_paused = true)]
async fn toggle_flips_running() {
    let (state, router) = app();

    let (_, body) = call(&router, Method::POST, "/toggle").await;
    assert_eq!(body["status"], "running");
    assert!(state.is_ticking());

    let (_, body) = call(&router, Method::POST, "/toggle").await;
    assert_eq!(body["status"], "paused");
    assert!(!state.is_ticking());
}

#[tokio::test]
async fn select_toggles_feature() {
    let (_state, router) = app();

    let (status, body) = call(&router, Method::POST, "/select/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"]["selection"]["selected_id"], 2);

    let (_, body) = call(&router, Method::POST, "/select/3").await;
    assert_eq!(body["view"]["selection"]["selected_id"], 3);

    let (_, body) = call(&router, Method::POST, "/select/3").await;
    assert_eq!(body["view"]["selection"]["selected_id"], Value::Null);
    assert_eq!(body["message"], "Feature 3 deselected");
}

#[tokio::test]
async fn select_rejects_non_numeric_id() {
    let (_state, router) = app();
    let (status, _) = call(&router, Method::POST, "/select/focus-mode").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn status_reports_view_and_last_action() {
    let (_state, router) = app();
    call(&router, Method::POST, "/select/1").await;

    let (status, body) = call(&router, Method::GET, "/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"]["selection"]["selected_id"], 1);
    assert_eq!(body["view"]["display"], "00:00");
    assert_eq!(body["tick_period_ms"], 1000);
    assert_eq!(body["port"], 20554);
    assert_eq!(body["last_action"], "select");
}

#[tokio::test]
async fn health_is_ok() {
    let (_state, router) = app();
    let (status, body) = call(&router, Method::GET, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn events_stream_sends_current_view_then_updates() {
    let (state, router) = app();
    state.select(4).unwrap();

    let request = Request::builder().uri("/events").body(Body::empty()).unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let mut frames = response.into_body().into_data_stream();

    let first = frames.next().await.unwrap().unwrap();
    let first = String::from_utf8(first.to_vec()).unwrap();
    assert!(first.contains("event: view"), "{first}");
    assert!(first.contains("\"selected_id\":4"), "{first}");

    state.select(4).unwrap();
    let second = frames.next().await.unwrap().unwrap();
    let second = String::from_utf8(second.to_vec()).unwrap();
    assert!(second.contains("\"selected_id\":null"), "{second}");
}
