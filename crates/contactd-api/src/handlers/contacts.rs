//! Contact endpoints of the emulated CRM.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use contactd_core::{parse_tag_id, ContactPatch, NewContact};

use super::{parse_contact_id, parse_json, ListResponse};
use crate::auth::CrmAccess;
use crate::error::ApiError;
use crate::AppState;

pub const MERGE_PATCH_CONTENT_TYPE: &str = "application/merge-patch+json";

pub async fn create_contact(
    _access: CrmAccess,
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let new: NewContact = parse_json(&body)?;
    let contact = state.backend.directory.create_contact(new)?;
    Ok((StatusCode::CREATED, Json(contact)))
}

/// True when the header names the merge-patch media type. Parameters such as
/// `charset` are ignored.
fn is_merge_patch(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case(MERGE_PATCH_CONTENT_TYPE))
        .unwrap_or(false)
}

pub async fn patch_contact(
    _access: CrmAccess,
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_contact_id(&id)?;
    // Unknown ids are reported before a wrong content type.
    state.backend.directory.get_contact(id)?;

    if !is_merge_patch(&headers) {
        return Err(ApiError::UnsupportedMediaType(format!(
            "Content-Type must be {}",
            MERGE_PATCH_CONTENT_TYPE
        )));
    }

    let patch: ContactPatch = parse_json(&body)?;
    let contact = state.backend.directory.patch_contact(id, patch)?;
    Ok(Json(contact))
}

pub async fn assign_tag(
    _access: CrmAccess,
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let contact_id = parse_contact_id(&id)?;
    let body: JsonValue = parse_json(&body)?;
    let tag_id = parse_tag_id(body.get("tagId"))?;

    state.backend.directory.assign_tag(contact_id, tag_id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct ListContactsQuery {
    email: Option<String>,
}

pub async fn list_contacts(
    _access: CrmAccess,
    State(state): State<AppState>,
    Query(query): Query<ListContactsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let contacts = state
        .backend
        .directory
        .list_contacts(query.email.as_deref());
    tracing::debug!(
        email_filter = query.email.as_deref(),
        result_count = contacts.len(),
        "Listed contacts"
    );
    Ok(Json(ListResponse::complete(contacts)))
}
