//! Request middleware for the HTTP server
//!
//! Logs one structured line per request, enforces the per-request deadline,
//! and turns handler panics into the generic 500.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::any::Any;
use std::time::{Duration, Instant};

use crate::error::ApiError;

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request logging middleware
///
/// Emits `request_id`, `method`, `path`, `status` and `latency_ms` once the
/// response is ready. Server errors log at warn, everything else at info.
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let response = next.run(request).await;
    let latency_ms = start_time.elapsed().as_millis() as u64;
    let status = response.status();

    if status.is_server_error() {
        tracing::warn!(%request_id, %method, %path, status = status.as_u16(), latency_ms, "request");
    } else {
        tracing::info!(%request_id, %method, %path, status = status.as_u16(), latency_ms, "request");
    }

    response
}

/// Deadline middleware
///
/// Drops the handler future when `timeout` elapses, which rolls back any
/// open transaction, and answers with the generic 500.
pub async fn request_deadline_middleware(
    State(timeout): State<Duration>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    match tokio::time::timeout(timeout, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::error!(%path, timeout_ms = timeout.as_millis() as u64, "Request deadline exceeded");
            ApiError::Internal.into_response()
        }
    }
}

/// Panic handler for `CatchPanicLayer`
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(panic = %detail, "Handler panicked");
    ApiError::Internal.into_response()
}
