//! Verification of Rekor log entries and checkpoints
//!
//! Glue between the typed Rekor responses in `tlog-rekor` and the pure
//! verifiers in `tlog-merkle` and `tlog-crypto`. Every function here is
//! offline: callers fetch entries and proofs, this crate only checks them.

pub mod consistency;
pub mod error;
pub mod verify;
pub mod verify_impl;

pub use consistency::{verify_checkpoint_consistency, Checkpoint};
pub use error::{Error, Result};
pub use verify::{verify_entry, verify_entry_with_policy, VerificationPolicy, VerifiedEntry};
pub use verify_impl::hashedrekord::{verify_artifact_digest, verify_entry_signature};
pub use verify_impl::tlog::{verify_entry_inclusion, verify_signed_checkpoint};
