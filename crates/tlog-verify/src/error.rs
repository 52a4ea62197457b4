//! Error types for tlog-verify

use thiserror::Error;

/// Errors that can occur during verification
#[derive(Error, Debug)]
pub enum Error {
    /// Merkle proof verification failed
    #[error(transparent)]
    Merkle(#[from] tlog_merkle::Error),

    /// Key extraction or signature verification failed
    #[error(transparent)]
    Crypto(#[from] tlog_crypto::Error),

    /// The entry could not be decoded
    #[error(transparent)]
    Rekor(#[from] tlog_rekor::Error),

    /// Encoding error
    #[error(transparent)]
    Types(#[from] tlog_types::Error),

    /// The entry carries no inclusion proof
    #[error("Log entry {0} has no inclusion proof")]
    MissingInclusionProof(u64),

    /// The artifact is not the one the entry records
    #[error("Artifact digest mismatch: entry records {expected}, artifact hashes to {actual}")]
    ArtifactDigestMismatch { expected: String, actual: String },

    /// A checkpoint disagrees with the values it is published alongside
    #[error("Checkpoint mismatch: {0}")]
    CheckpointMismatch(String),

    /// Invalid input to a verification call
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for verification operations
pub type Result<T> = std::result::Result<T, Error>;
