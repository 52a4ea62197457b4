//! Rekor transparency log client
//!
//! This crate fetches entries, checkpoints and consistency proofs from a
//! Rekor v1 instance and decodes them into typed values. It performs no
//! verification itself; see `tlog-verify` for that.

pub mod body;
pub mod client;
pub mod entry;
pub mod error;

pub use body::HashedRekordBody;
pub use client::{RekorClient, DEFAULT_REKOR_URL};
pub use entry::{
    parse_log_entry_response, single_entry, ConsistencyProofResponse, InactiveShard, LogEntry,
    LogEntryResponse, LogInfo, RekorInclusionProof, Verification,
};
pub use error::{Error, Result};
