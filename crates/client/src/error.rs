//! Client error types.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when calling the API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or the body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Status { status: StatusCode, message: String },

    /// The body did not have the expected shape.
    #[error("Unexpected payload: {0}")]
    UnexpectedPayload(String),

    /// The base URL or an endpoint URL is invalid.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ClientError {
    /// HTTP status of a [`ClientError::Status`] error.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
