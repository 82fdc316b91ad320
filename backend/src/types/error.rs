//! Universal error handling for the API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::link_issuer::IssuerError;

/// JSON error envelope returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message, safe to expose
    pub error: String,
}

/// Application error type carrying the status and client-facing message
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: &'static str,
}

impl AppError {
    /// Create a new application error
    #[must_use]
    pub const fn new(status: StatusCode, message: &'static str) -> Self {
        Self { status, message }
    }

    /// The link issuer failed to initialize at startup
    #[must_use]
    pub const fn unavailable() -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, "S3 service not available")
    }

    /// HTTP status of this error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Message sent to the client
    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.message
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error based on status code
        match self.status.as_u16() {
            400..=499 => tracing::warn!("Client error: {} - {}", self.status, self.message),
            500..=599 => tracing::error!("Server error: {} - {}", self.status, self.message),
            _ => {}
        }

        let body = ErrorResponse {
            error: self.message.to_string(),
        };
        (self.status, Json(body)).into_response()
    }
}

/// Convert issuer errors to application errors
///
/// The underlying error is logged here and never forwarded to the client.
impl From<IssuerError> for AppError {
    fn from(err: IssuerError) -> Self {
        match &err {
            IssuerError::ConfigError(msg) => {
                tracing::error!("Link issuer configuration error: {msg}");
            }
            IssuerError::InvalidKey(_) | IssuerError::SigningFailure(_) => {
                tracing::error!("Failed to generate signed URL: {err}");
            }
        }

        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "failed to generate signed URL",
        )
    }
}
