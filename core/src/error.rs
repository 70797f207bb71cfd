//! Error types for the todo API client.
//!
//! # Design
//! Transport failures and non-2xx responses share one error type so the
//! HTTP layer can hand either to its caller through a single `Result`. The
//! HTTP variant keeps the numeric status and the reason phrase; everything
//! else carries the underlying message as text.

use thiserror::Error;

/// Errors returned by the HTTP layer and the todo service client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, I/O).
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a status outside `[200, 300)`.
    #[error("HTTP {status}: {reason}")]
    Http { status: u16, reason: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A locally built todo violates the data model.
    #[error("invalid todo: {0}")]
    InvalidTodo(String),
}

impl ApiError {
    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
