//! Error types for the todo service and their HTTP mapping.
//!
//! # Design
//! A missing record is not an error: by-id operations return `Ok(None)` and
//! the route layer answers 404. Everything else is a `TodoError`, and the
//! HTTP boundary collapses every kind to a 500 carrying the error message.
//! Bad input and an unavailable store are deliberately not distinguished.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::model::ValidationError;

/// Failures returned by stores and by the service.
#[derive(Debug, thiserror::Error)]
pub enum TodoError {
    /// A required field was missing or empty.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The id is not syntactically valid for the active store.
    #[error("Cast to ObjectId failed for value \"{value}\" (type string) at path \"_id\" for model \"Todo\"")]
    InvalidId { value: String },

    /// The backing store failed.
    #[error("{0}")]
    Store(String),
}

impl TodoError {
    pub fn invalid_id(value: impl Into<String>) -> Self {
        Self::InvalidId {
            value: value.into(),
        }
    }
}

#[cfg(feature = "mongodb")]
impl From<mongodb::error::Error> for TodoError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::Store(err.to_string())
    }
}

/// JSON body of every failure response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Generic failure handler at the HTTP boundary. Always 500.
#[derive(Debug)]
pub struct ApiError {
    message: String,
}

impl ApiError {
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<TodoError> for ApiError {
    fn from(err: TodoError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(message = %self.message, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                message: self.message,
            }),
        )
            .into_response()
    }
}
