//! Chat-notification endpoint (`chat.postMessage`).

use axum::{body::Bytes, extract::State, response::IntoResponse, Json};
use serde_json::Value as JsonValue;

use super::parse_json;
use crate::auth::ChatBearer;
use crate::error::ApiError;
use crate::AppState;

/// Record the posted message so tests can inspect it later.
pub async fn post_message(
    _bearer: ChatBearer,
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let payload: JsonValue = parse_json(&body)?;
    state.backend.outbox.record(payload);
    Ok(Json(serde_json::json!({ "result": "OK" })))
}
