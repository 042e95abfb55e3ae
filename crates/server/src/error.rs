//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. All route handlers return
//! `Result<T, AppError>`. Bodies are JSON `{"message": ...}` and never carry
//! internal details.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tiffin_core::EmailError;

use crate::export::ExportError;
use crate::services::ServiceError;
use crate::store::StoreError;

/// Application-level error type for the HTTP surface.
#[derive(Debug, Error)]
pub enum AppError {
    /// Collection storage failed (I/O or corrupt document).
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Signup email already registered.
    #[error("Duplicate email")]
    DuplicateEmail,

    /// Signup email malformed.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Wrong admin password.
    #[error("Unauthorized")]
    Unauthorized,

    /// Request body could not be decoded.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Store(e) => Self::Store(e),
            ServiceError::DuplicateEmail => Self::DuplicateEmail,
            ServiceError::InvalidEmail(e) => Self::InvalidEmail(e),
            ServiceError::Unauthorized => Self::Unauthorized,
            ServiceError::InvalidMenu => Self::BadRequest("menu must be an array".to_owned()),
            ServiceError::Encode(e) => Self::Internal(e.to_string()),
        }
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::DuplicateEmail | Self::InvalidEmail(_) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }

    /// Message sent to the client.
    #[must_use]
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::Store(_) | Self::Internal(_) => "Internal server error",
            Self::DuplicateEmail => "Email already registered",
            Self::InvalidEmail(_) => "Invalid email address",
            Self::Unauthorized => "Unauthorized",
            Self::BadRequest(_) => "Invalid request body",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        (status, Json(json!({ "message": self.public_message() }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
