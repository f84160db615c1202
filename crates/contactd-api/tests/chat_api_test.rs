//! Chat-notification endpoint and outbox inspection.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::{json, Value};

use common::TestApp;

fn post_message(authorization: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/api/chat.postMessage")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn test_post_message_is_recorded() {
    let app = TestApp::new();
    let first = json!({ "channel": "#signups", "text": "New contact: test@example.com" });
    let second = json!({ "channel": "#signups", "text": "Another one" });

    let (status, body) = app.send(post_message(Some("Bearer 123"), &first)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "result": "OK" }));
    app.send(post_message(Some("Bearer 123"), &second)).await;

    let request = Request::builder()
        .uri("/test/slack/payloads")
        .body(Body::empty())
        .unwrap();
    let (status, payloads) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payloads, json!([first, second]));
}

#[tokio::test]
async fn test_post_message_requires_matching_bearer() {
    let app = TestApp::new();
    let payload = json!({ "text": "hi" });

    for authorization in [None, Some("Bearer 456"), Some("123"), Some("bearer 123")] {
        let (status, body) = app.send(post_message(authorization, &payload)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{:?}", authorization);
        assert_eq!(body["error"], "unauthorized");
    }
    assert!(app.state.backend.outbox.is_empty());
}

#[tokio::test]
async fn test_post_message_ignores_fault_switch() {
    let app = TestApp::new();
    app.post_empty("/test/break").await;

    let (status, _) = app
        .send(post_message(Some("Bearer 123"), &json!({ "text": "hi" })))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_reset_clears_payloads() {
    let app = TestApp::new();
    app.send(post_message(Some("Bearer 123"), &json!({ "text": "hi" })))
        .await;

    app.post_empty("/test/reset").await;
    let request = Request::builder()
        .uri("/test/slack/payloads")
        .body(Body::empty())
        .unwrap();
    let (_, payloads) = app.send(request).await;
    assert_eq!(payloads, json!([]));
}

#[tokio::test]
async fn test_configured_bearer_token() {
    let config = contactd_api::Config {
        chat_bearer_token: "xoxb-test".to_string(),
        ..Default::default()
    };
    let app = TestApp::with_config(config);

    let (status, _) = app
        .send(post_message(Some("Bearer 123"), &json!({ "text": "hi" })))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = app
        .send(post_message(Some("Bearer xoxb-test"), &json!({ "text": "hi" })))
        .await;
    assert_eq!(status, StatusCode::OK);
}
