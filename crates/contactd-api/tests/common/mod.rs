//! Shared helpers for driving the router in-process.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use contactd_api::{build_router, AppState, Config};
use contactd_core::MockBackend;

pub const TEST_EMAIL: &str = "test@example.com";
pub const API_KEY: &str = "123";

pub struct TestApp {
    pub state: AppState,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let state = AppState::new(MockBackend::new(), config);
        let router = build_router(state.clone());
        Self { state, router }
    }

    /// Send a request and return the status and the JSON body (`Null` when
    /// the body is empty).
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn create_contact(&self, body: Value) -> (StatusCode, Value) {
        self.send(json_request(Method::POST, "/api/contacts", &body, true))
            .await
    }

    pub async fn patch_contact(&self, id: u64, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::PATCH)
            .uri(format!("/api/contacts/{}", id))
            .header("X-API-Key", API_KEY)
            .header(header::CONTENT_TYPE, "application/merge-patch+json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn assign_tag(&self, contact_id: u64, body: Value) -> (StatusCode, Value) {
        self.send(json_request(
            Method::POST,
            &format!("/api/contacts/{}/tags", contact_id),
            &body,
            true,
        ))
        .await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(uri)
            .header("X-API-Key", API_KEY)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post_empty(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }
}

pub fn json_request(method: Method, uri: &str, body: &Value, with_key: bool) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if with_key {
        builder = builder.header("X-API-Key", API_KEY);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}
