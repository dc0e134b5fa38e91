//! Error responses for the posts API.

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use crate::post::{ErrorBody, ValidationError};
use crate::query::QueryError;

/// Error type for API handlers. Every variant renders as `{code, message}`.
#[derive(Debug)]
pub enum ServerError {
    /// No post under the requested id.
    NotFound,
    /// Request body is not valid JSON of the expected shape.
    BadRequest(String),
    /// Title or body rejected.
    Validation(ValidationError),
    /// Store failure or a crashed blocking task. Details are logged, not sent.
    Internal(String),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::NotFound => write!(f, "post not found"),
            ServerError::BadRequest(msg) => write!(f, "invalid request body: {}", msg),
            ServerError::Validation(e) => write!(f, "{}", e),
            ServerError::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for ServerError {}

impl From<QueryError> for ServerError {
    fn from(err: QueryError) -> Self {
        ServerError::Internal(err.to_string())
    }
}

impl From<ValidationError> for ServerError {
    fn from(err: ValidationError) -> Self {
        ServerError::Validation(err)
    }
}

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Validation(_) => StatusCode::BAD_REQUEST,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            ServerError::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let ServerError::Internal(detail) = &self {
            error!(error = %detail, "request failed");
        }
        let body = ErrorBody {
            code: status.as_u16(),
            message: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}
