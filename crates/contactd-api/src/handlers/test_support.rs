//! Endpoints test suites use to prepare and inspect the mock.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::AppState;

/// Wipe contacts, the id counter, chat payloads and the fault switch.
pub async fn reset(State(state): State<AppState>) -> impl IntoResponse {
    state.backend.reset();
    tracing::info!("Mock state reset");
    StatusCode::NO_CONTENT
}

/// Make every CRM endpoint fail until the next reset.
pub async fn break_backend(State(state): State<AppState>) -> impl IntoResponse {
    state.backend.fault.trip();
    StatusCode::NO_CONTENT
}

pub async fn chat_payloads(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.backend.outbox.payloads())
}
