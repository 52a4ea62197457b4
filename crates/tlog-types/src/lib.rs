//! Core types for transparency log verification
//!
//! This crate provides the value types shared by the verifier crates: fixed-size
//! hash digests, encoding wrappers for the string forms a log returns, and the
//! signed checkpoint (signed tree head) note format.

pub mod checkpoint;
pub mod encoding;
pub mod error;

pub use checkpoint::{Checkpoint, CheckpointSignature};
pub use encoding::{Base64, Hex, Sha256Hash};
pub use error::{Error, Result};
