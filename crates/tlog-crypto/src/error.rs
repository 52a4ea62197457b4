//! Error types for tlog-crypto

use thiserror::Error;

/// Errors that can occur in signature verification
#[derive(Error, Debug)]
pub enum Error {
    /// The signature does not verify (including truncated or garbage bytes)
    #[error("Signature invalid: {0}")]
    SignatureInvalid(String),

    /// The key material could not be parsed
    #[error("Malformed key: {0}")]
    MalformedKey(String),

    /// The certificate could not be parsed
    #[error("Malformed certificate: {0}")]
    MalformedCertificate(String),

    /// The declared key algorithm is not one we verify
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Key generation or signing error
    #[error("Signing error: {0}")]
    Signing(String),

    /// Reading the artifact failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<aws_lc_rs::error::Unspecified> for Error {
    fn from(_: aws_lc_rs::error::Unspecified) -> Self {
        Error::Signing("unspecified error".to_string())
    }
}

impl From<aws_lc_rs::error::KeyRejected> for Error {
    fn from(e: aws_lc_rs::error::KeyRejected) -> Self {
        Error::MalformedKey(e.to_string())
    }
}

/// Result type for cryptographic operations
pub type Result<T> = std::result::Result<T, Error>;
