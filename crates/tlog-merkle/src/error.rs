//! Error types for tlog-merkle

use thiserror::Error;

/// Ways a Merkle proof can be rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Index or size preconditions violated; no hashing was attempted
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// The proof has a length or encoding inconsistent with the tree shape
    #[error("Malformed proof: {0}")]
    MalformedProof(String),

    /// The recomputed root does not equal the claimed root
    #[error("{which} root mismatch: expected {expected}, calculated {actual}")]
    RootMismatch {
        /// Which root failed ("tree", "old" or "new")
        which: &'static str,
        expected: String,
        actual: String,
    },
}

/// Result type for Merkle tree operations
pub type Result<T> = std::result::Result<T, Error>;
