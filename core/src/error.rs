//! Error types for the backend client.
//!
//! # Design
//! Failures are never recovered inside the client. `Status` is the only
//! variant the client produces itself; the rest wrap the underlying crate's
//! error so callers can still inspect it.

use thiserror::Error;

/// Errors returned by `BackendClient` and `ApiClient`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a status outside 200..=299.
    #[error("HTTP error! status: {status}")]
    Status { status: u16, body: String },

    /// The request could not be completed (DNS, refused connection, reset,
    /// malformed header, unreadable body).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body is not valid JSON.
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Endpoint paths must start with `/`.
    #[error("invalid endpoint {0:?}: must start with '/'")]
    InvalidEndpoint(String),

    /// Reading a file to upload failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// HTTP status carried by a `Status` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
