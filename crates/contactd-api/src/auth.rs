//! Request guards for the CRM and chat endpoints.

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::error::ApiError;
use crate::AppState;

/// Guard for every CRM endpoint.
///
/// Rejects with a server error while the fault switch is tripped, then
/// requires a non-empty API key header. The key's value is not checked.
///
/// Usage:
/// ```ignore
/// async fn handler(_access: CrmAccess, State(state): State<AppState>) { ... }
/// ```
#[derive(Debug, Clone)]
pub struct CrmAccess;

#[axum::async_trait]
impl FromRequestParts<AppState> for CrmAccess {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if state.backend.fault.is_tripped() {
            return Err(ApiError::BackendFault);
        }

        let has_key = parts
            .headers
            .get(&state.config.api_key_header)
            .is_some_and(|v| !v.is_empty());
        if !has_key {
            return Err(ApiError::Unauthorized("unauthorized".to_string()));
        }

        Ok(CrmAccess)
    }
}

/// Guard for the chat endpoint: `Authorization: Bearer <token>` must match
/// the configured token exactly.
#[derive(Debug, Clone)]
pub struct ChatBearer;

#[axum::async_trait]
impl FromRequestParts<AppState> for ChatBearer {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));

        match token {
            Some(token) if token == state.config.chat_bearer_token => Ok(ChatBearer),
            _ => Err(ApiError::Unauthorized("unauthorized".to_string())),
        }
    }
}
