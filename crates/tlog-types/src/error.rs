//! Error types for tlog-types

use thiserror::Error;

/// Errors that can occur in tlog-types
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid base64 or hex encoding, or wrong decoded length
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// Invalid checkpoint format
    #[error("Invalid checkpoint format: {0}")]
    InvalidCheckpoint(String),
}

/// Result type for tlog-types operations
pub type Result<T> = std::result::Result<T, Error>;
