//! High-level verification API
//!
//! This module provides the entry point for verifying that an artifact was
//! signed and recorded in a transparency log.

use crate::error::Result;
use crate::verify_impl::{hashedrekord, tlog};
use tlog_crypto::SignatureAlgorithm;
use tlog_rekor::LogEntry;
use tlog_types::Sha256Hash;

/// Policy for verifying log entries
#[derive(Debug, Clone)]
pub struct VerificationPolicy {
    /// Require the artifact to match the digest recorded in the entry
    pub verify_artifact_digest: bool,
    /// Require the checkpoint attached to the inclusion proof, when present,
    /// to commit to the proof's tree size and root
    pub verify_checkpoint: bool,
}

impl Default for VerificationPolicy {
    fn default() -> Self {
        Self {
            verify_artifact_digest: true,
            verify_checkpoint: true,
        }
    }
}

impl VerificationPolicy {
    /// Skip the recorded-digest comparison
    pub fn skip_artifact_digest(mut self) -> Self {
        self.verify_artifact_digest = false;
        self
    }

    /// Skip the attached checkpoint comparison
    pub fn skip_checkpoint(mut self) -> Self {
        self.verify_checkpoint = false;
        self
    }
}

/// What a successful verification established
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedEntry {
    /// Index of the entry in the log
    pub log_index: u64,
    /// Algorithm the artifact signature verified under
    pub algorithm: SignatureAlgorithm,
    /// Size of the tree the inclusion proof is for
    pub tree_size: u64,
    /// Root the entry was proven to be included under
    pub root_hash: Sha256Hash,
}

/// Verify an artifact's log entry with the default policy
///
/// See [`verify_entry_with_policy`].
pub fn verify_entry(entry: &LogEntry, artifact: &[u8]) -> Result<VerifiedEntry> {
    verify_entry_with_policy(entry, artifact, &VerificationPolicy::default())
}

/// Verify an artifact's log entry
///
/// 1. Decode the entry body and, if the policy asks, compare the artifact
///    with the digest it records.
/// 2. Verify the recorded signature over the artifact with the recorded key.
/// 3. Verify the inclusion proof of the body under the proof's root.
/// 4. If the policy asks and the proof carries a checkpoint, check that the
///    checkpoint commits to the same tree size and root.
///
/// The first failing step's error is returned.
pub fn verify_entry_with_policy(
    entry: &LogEntry,
    artifact: &[u8],
    policy: &VerificationPolicy,
) -> Result<VerifiedEntry> {
    let body = entry.decode_body()?;

    if policy.verify_artifact_digest {
        hashedrekord::verify_artifact_digest(&body, artifact)?;
    }

    let public_key = hashedrekord::verify_body_signature(&body, artifact)?;
    tracing::info!(
        log_index = entry.log_index,
        algorithm = public_key.algorithm.name(),
        "artifact signature verified"
    );

    let proof = tlog::verify_entry_inclusion(entry)?;
    let root_hash = proof.root_hash.to_sha256()?;

    if policy.verify_checkpoint {
        if let Some(note) = &proof.checkpoint {
            tlog::verify_signed_checkpoint(note, proof.tree_size, &root_hash)?;
        }
    }

    Ok(VerifiedEntry {
        log_index: entry.log_index,
        algorithm: public_key.algorithm,
        tree_size: proof.tree_size,
        root_hash,
    })
}
