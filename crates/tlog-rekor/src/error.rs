//! Error types for tlog-rekor

use thiserror::Error;

/// Errors that can occur in Rekor operations
#[derive(Error, Debug)]
pub enum Error {
    /// The request never produced a response (connection, TLS, timeout)
    #[error("HTTP error: {0}")]
    Http(String),

    /// The log answered with a non-success status
    #[error("API error: {status}: {message}")]
    Api { status: u16, message: String },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The response decoded but does not have the expected shape
    #[error("Malformed response envelope: {0}")]
    MalformedEnvelope(String),

    /// Entry body is not a kind this crate understands
    #[error("Unsupported entry kind: {kind} (apiVersion {api_version})")]
    UnsupportedEntryKind { kind: String, api_version: String },

    /// Request parameters rejected before sending
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Encoding error in a response field
    #[error(transparent)]
    Types(#[from] tlog_types::Error),
}

/// Result type for Rekor operations
pub type Result<T> = std::result::Result<T, Error>;
