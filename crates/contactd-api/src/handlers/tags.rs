//! Tag catalog endpoint of the emulated CRM.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use super::ListResponse;
use crate::auth::CrmAccess;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListTagsQuery {
    query: Option<String>,
}

pub async fn list_tags(
    _access: CrmAccess,
    State(state): State<AppState>,
    Query(params): Query<ListTagsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let tags = state.backend.directory.list_tags(params.query.as_deref());
    Ok(Json(ListResponse::complete(tags)))
}
