//! Route handlers, grouped by the API they emulate.

pub mod chat;
pub mod contacts;
pub mod tags;
pub mod test_support;

use axum::body::Bytes;
use axum::response::IntoResponse;
use axum::Json;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// List envelope used by the emulated CRM. Nothing is paginated, so
/// `hasMore` is always false.
#[derive(Serialize, Deserialize, Debug)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    #[serde(rename = "hasMore")]
    pub has_more: bool,
}

impl<T: Serialize> ListResponse<T> {
    pub fn complete(items: Vec<T>) -> Self {
        Self {
            items,
            has_more: false,
        }
    }
}

/// Parse a JSON request body. Bodies are read raw so that the content type
/// and resource checks can run first and malformed JSON is a 400 like any
/// other bad input.
pub(crate) fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("invalid JSON body: {}", e)))
}

/// Contact ids in paths must be non-negative integers; anything else names
/// a resource that cannot exist.
pub(crate) fn parse_contact_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::NotFound("contact not found".to_string()))
}

/// Readiness probe.
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({ "result": "OK" }))
}
