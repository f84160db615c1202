//! contactd-api - HTTP mock of a CRM contact API and a chat-notification API.
//!
//! [`build_router`] assembles the full application so it can be served by
//! `main` or driven in-process by tests.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

use contactd_core::MockBackend;

pub use config::Config;
pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub backend: MockBackend,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(backend: MockBackend, config: Config) -> Self {
        Self {
            backend,
            config: Arc::new(config),
        }
    }
}

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "not found" })),
    )
}

pub fn build_router(state: AppState) -> Router {
    use handlers::{chat, contacts, tags, test_support};

    let mut app = Router::new()
        // Readiness probe
        .route("/", get(handlers::root))
        // Test support
        .route("/test/reset", post(test_support::reset))
        .route("/test/break", post(test_support::break_backend))
        .route("/test/slack/payloads", get(test_support::chat_payloads))
        // CRM
        .route(
            "/api/contacts",
            get(contacts::list_contacts).post(contacts::create_contact),
        )
        .route("/api/contacts/:id", patch(contacts::patch_contact))
        .route("/api/contacts/:id/tags", post(contacts::assign_tag))
        .route("/api/tags", get(tags::list_tags))
        // Chat
        .route("/api/chat.postMessage", post(chat::post_message))
        .fallback(not_found);

    if state.config.request_log.is_some() {
        app = app.layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::exchange_journal,
        ));
    }

    app.layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(RequestBodyLimitLayer::new(state.config.max_body_bytes))
        .with_state(state)
}
