//! Request/response journal.
//!
//! Buffers each request and response body and writes both, together with
//! method, URI, headers and status, as events under the
//! [`EXCHANGE_TARGET`] tracing target. `main` routes that target to the
//! `REQUEST_LOG` file, so test authors can read exactly what the application
//! under test sent and what it got back.

use std::time::Instant;

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use contactd_core::logging::EXCHANGE_TARGET;
use tracing::Subscriber;
use tracing_subscriber::{filter, fmt::MakeWriter, registry::LookupSpan, Layer};

use crate::error::ApiError;
use crate::AppState;

/// Formatting layer that writes only journal events to `make_writer`.
///
/// It carries its own filter, so it records every exchange regardless of
/// the filter applied to the other outputs.
pub fn journal_layer<S, W>(make_writer: W) -> impl Layer<S> + Send + Sync + 'static
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .with_writer(make_writer)
        .with_ansi(false)
        .with_filter(filter::filter_fn(|meta| meta.target() == EXCHANGE_TARGET))
}

pub async fn exchange_journal(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let (parts, body) = request.into_parts();
    let body = match to_bytes(body, state.config.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return ApiError::PayloadTooLarge(format!("request body rejected: {}", e))
                .into_response()
        }
    };

    let request_id = parts
        .headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    tracing::info!(
        target: EXCHANGE_TARGET,
        request_id = %request_id,
        method = %parts.method,
        uri = %parts.uri,
        headers = ?parts.headers,
        body = %String::from_utf8_lossy(&body),
        "request"
    );

    let started = Instant::now();
    let response = next
        .run(Request::from_parts(parts, Body::from(body)))
        .await;

    let (parts, body) = response.into_parts();
    let body = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return ApiError::Internal(format!("response body unreadable: {}", e)).into_response()
        }
    };

    tracing::info!(
        target: EXCHANGE_TARGET,
        request_id = %request_id,
        status = parts.status.as_u16(),
        duration_ms = started.elapsed().as_millis() as u64,
        body = %String::from_utf8_lossy(&body),
        "response"
    );

    Response::from_parts(parts, Body::from(body))
}
