//! Error types for the REST API client.

use std::error::Error;
use std::fmt;

use reqwest::StatusCode;

use super::ClientProfile;
use crate::post::{ErrorBody, ValidationError};

/// Error type for API client operations.
#[derive(Debug)]
pub enum ApiError {
    /// The post does not exist (HTTP 404, server profile only).
    NotFound(String),
    /// Any other non-2xx response. `code` is set when the body carried one.
    Status {
        status: u16,
        code: Option<u16>,
        message: String,
    },
    /// Input rejected before a request was sent.
    Validation(ValidationError),
    /// Connection, timeout or other transport failure.
    Transport(String),
    /// A 2xx response whose body is not the expected shape.
    Decode(String),
    /// The configured origin is not a usable base URL.
    InvalidOrigin(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(_) => write!(f, "NOT_FOUND"),
            ApiError::Status { message, .. } => write!(f, "API Error: {}", message),
            ApiError::Validation(e) => write!(f, "validation failed: {}", e),
            ApiError::Transport(msg) => write!(f, "transport error: {}", msg),
            ApiError::Decode(msg) => write!(f, "decode error: {}", msg),
            ApiError::InvalidOrigin(origin) => write!(f, "invalid API origin: {}", origin),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl ApiError {
    /// True for the dedicated not-found signal pages route on.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }

    /// HTTP status for `Status` and `NotFound` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound(_) => Some(404),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Map a non-2xx response to an error.
    ///
    /// The body is read as `{code, message}`; anything else falls back to
    /// `HTTP <status>`.
    pub(super) fn from_response(
        profile: ClientProfile,
        status: StatusCode,
        path: &str,
        body: &[u8],
    ) -> Self {
        if status == StatusCode::NOT_FOUND && profile == ClientProfile::Server {
            return ApiError::NotFound(path.to_string());
        }

        match serde_json::from_slice::<ErrorBody>(body) {
            Ok(error) => ApiError::Status {
                status: status.as_u16(),
                code: Some(error.code),
                message: error.message,
            },
            Err(_) => ApiError::Status {
                status: status.as_u16(),
                code: None,
                message: format!("HTTP {}", status.as_u16()),
            },
        }
    }
}
