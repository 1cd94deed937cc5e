//! Error handling for the HTTP boundary
//!
//! Maps internal todo errors to status codes and JSON bodies. Only
//! client-caused failures describe themselves; anything else is answered
//! with a fixed message and the cause goes to the log.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use todo_core::{TodoError, ValidationErrors};

/// Message for requests that could not be decoded
pub const MSG_BAD_REQUEST: &str = "bad request";

/// Message for every 5xx response
pub const MSG_INTERNAL: &str = "internal server error";

/// Errors returned by the HTTP handlers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Body or path could not be bound to the parameter type
    #[error("bad request")]
    BadRequest,

    /// Parameters bound but violated field rules
    #[error("{0}")]
    Validation(ValidationErrors),

    /// Storage, transaction, or deadline failure
    #[error("internal server error")]
    Internal,
}

/// JSON body of every error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}

impl ApiError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Response body for this error
    pub fn to_body(&self) -> ErrorBody {
        match self {
            ApiError::BadRequest => ErrorBody {
                message: MSG_BAD_REQUEST.to_string(),
                errors: None,
            },
            ApiError::Validation(errors) => ErrorBody {
                message: errors.to_string(),
                errors: Some(
                    errors
                        .fields()
                        .filter_map(|field| {
                            errors
                                .get(field)
                                .map(|message| (field.to_string(), message.to_string()))
                        })
                        .collect(),
                ),
            },
            ApiError::Internal => ErrorBody {
                message: MSG_INTERNAL.to_string(),
                errors: None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_body())).into_response()
    }
}

/// Convert from TodoError to ApiError
///
/// NotFound collapses into Internal along with storage failures.
impl From<TodoError> for ApiError {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::Validation(errors) => {
                tracing::debug!(%errors, "Request failed validation");
                ApiError::Validation(errors)
            }
            other => {
                tracing::error!(error = %other, "Request failed");
                ApiError::Internal
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Could not bind request body");
        ApiError::BadRequest
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection, "Could not bind request path");
        ApiError::BadRequest
    }
}
