//! Transparency log verification
//!
//! Inclusion of an entry under the root its proof names, and agreement
//! between a signed checkpoint and the tree size and root it is served with.

use crate::error::{Error, Result};
use tlog_merkle::verify_inclusion_proof_hex;
use tlog_rekor::{LogEntry, RekorInclusionProof};
use tlog_types::{Checkpoint as SignedCheckpoint, Sha256Hash};

/// Verify the entry's inclusion proof against the root it carries
///
/// The leaf is the base64-decoded entry body, hashed as an RFC 6962 leaf.
pub fn verify_entry_inclusion(entry: &LogEntry) -> Result<&RekorInclusionProof> {
    let proof = entry
        .inclusion_proof()
        .ok_or(Error::MissingInclusionProof(entry.log_index))?;

    let leaf_data = entry.body_bytes()?;
    verify_inclusion_proof_hex(
        &leaf_data,
        proof.log_index,
        proof.tree_size,
        &proof.hashes,
        &proof.root_hash,
    )?;

    tracing::debug!(
        log_index = entry.log_index,
        proof_index = proof.log_index,
        tree_size = proof.tree_size,
        "inclusion proof verified"
    );
    Ok(proof)
}

/// Parse a signed checkpoint and check it commits to `tree_size` and `root_hash`
///
/// The note signature itself is not checked: that needs the log's public
/// key, which this verifier is not configured with.
pub fn verify_signed_checkpoint(
    note: &str,
    tree_size: u64,
    root_hash: &Sha256Hash,
) -> Result<SignedCheckpoint> {
    let checkpoint = SignedCheckpoint::from_text(note)?;

    if checkpoint.tree_size != tree_size {
        return Err(Error::CheckpointMismatch(format!(
            "checkpoint tree size {} differs from {}",
            checkpoint.tree_size, tree_size
        )));
    }

    if checkpoint.root_hash != *root_hash {
        return Err(Error::CheckpointMismatch(format!(
            "checkpoint root {} differs from {}",
            checkpoint.root_hash, root_hash
        )));
    }

    Ok(checkpoint)
}
