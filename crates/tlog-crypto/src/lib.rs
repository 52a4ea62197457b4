//! Cryptographic primitives for transparency log verification
//!
//! This crate extracts a public key from certificate or key material and
//! verifies detached artifact signatures with it, using aws-lc-rs as the
//! cryptographic backend. The set of signature algorithms is closed: material
//! declaring anything else is rejected up front.

pub mod encoding;
pub mod error;
pub mod hash;
#[cfg(test)]
mod signing;
pub mod verification;
pub mod x509;

pub use encoding::{CertificateDer, KeyMaterial, PublicKeySpki};
pub use error::{Error, Result};
pub use hash::sha256;
pub use verification::{verify_artifact_file, verify_artifact_signature};
pub use x509::{extract_public_key, PublicKey, SignatureAlgorithm};
