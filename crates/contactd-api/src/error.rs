//! HTTP error mapping. Every failure is rendered as `{"error": <message>}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Message the CRM endpoints answer with while the fault switch is tripped.
pub const BROKEN_BACKEND_MESSAGE: &str = "emulating broken backend";

#[derive(Debug)]
pub enum ApiError {
    Unauthorized(String),
    BadRequest(String),
    NotFound(String),
    /// Duplicate email. Rendered as 422, the status the emulated CRM uses.
    Conflict(String),
    UnsupportedMediaType(String),
    /// Fault switch tripped.
    BackendFault,
    PayloadTooLarge(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::BackendFault | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BackendFault => BROKEN_BACKEND_MESSAGE,
            ApiError::Unauthorized(msg)
            | ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::UnsupportedMediaType(msg)
            | ApiError::PayloadTooLarge(msg)
            | ApiError::Internal(msg) => msg,
        }
    }
}

impl From<contactd_core::Error> for ApiError {
    fn from(err: contactd_core::Error) -> Self {
        use contactd_core::Error;

        match err {
            Error::Validation(e) => ApiError::BadRequest(e.to_string()),
            Error::Conflict(_) => ApiError::Conflict("duplicate".to_string()),
            Error::ContactNotFound(_) => ApiError::NotFound("contact not found".to_string()),
            Error::TagNotFound(_) => ApiError::NotFound("tag not found".to_string()),
        }
    }
}

impl From<contactd_core::ValidationError> for ApiError {
    fn from(err: contactd_core::ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = self.message(), "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = self.message(), "Request rejected");
        }

        let body = Json(serde_json::json!({
            "error": self.message(),
        }));

        (status, body).into_response()
    }
}
