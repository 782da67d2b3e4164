//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server faults to Sentry
//! before responding to the client. All route handlers return
//! `Result<T, AppError>`; every error body is `{"error": "<message>"}`.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::ALLOW},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use meal_planner_core::api::ErrorResponse;

use crate::db::RepositoryError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// A repository operation failed. `message` is what the client sees.
    #[error("{message}: {source}")]
    Database {
        message: &'static str,
        #[source]
        source: RepositoryError,
    },

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// Bad request from client (missing or malformed field).
    #[error("{0}")]
    BadRequest(String),

    /// The endpoint does not support the request method.
    #[error("{message}")]
    MethodNotAllowed {
        message: String,
        allow: &'static str,
    },

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Database { .. } | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Database { .. } | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();

        // Don't expose internal error details to clients
        let (message, allow) = match self {
            Self::Database { message, .. } => (message.to_string(), None),
            Self::Internal(_) => ("Internal server error".to_string(), None),
            Self::MethodNotAllowed { message, allow } => (message, Some(allow)),
            Self::NotFound(message) | Self::BadRequest(message) => (message, None),
        };

        let mut response = (status, Json(ErrorResponse::new(message))).into_response();
        if let Some(allow) = allow {
            response
                .headers_mut()
                .insert(ALLOW, HeaderValue::from_static(allow));
        }
        response
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Attach the client-facing message to a repository failure.
pub trait DatabaseContext<T> {
    /// Convert a `RepositoryError` into [`AppError::Database`] with `message`.
    ///
    /// # Errors
    ///
    /// Returns the wrapped error if `self` is an error.
    fn context(self, message: &'static str) -> Result<T>;
}

impl<T> DatabaseContext<T> for std::result::Result<T, RepositoryError> {
    fn context(self, message: &'static str) -> Result<T> {
        self.map_err(|source| AppError::Database { message, source })
    }
}
