//! Consistency between a previously trusted checkpoint and the log's latest

use crate::error::{Error, Result};
use crate::verify_impl::tlog::verify_signed_checkpoint;
use tlog_merkle::verify_consistency_proof;
use tlog_rekor::{ConsistencyProofResponse, LogInfo};
use tlog_types::Sha256Hash;

/// A checkpoint the caller already trusts, typically saved from an earlier run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    /// Tree the checkpoint belongs to
    pub tree_id: String,
    /// Number of leaves
    pub tree_size: u64,
    /// Root hash at `tree_size`
    pub root_hash: Sha256Hash,
}

impl Checkpoint {
    /// Build a checkpoint from user-supplied values
    pub fn new(tree_id: impl Into<String>, tree_size: u64, root_hash_hex: &str) -> Result<Self> {
        let tree_id = tree_id.into();
        if tree_id.is_empty() {
            return Err(Error::InvalidInput("tree id is empty".to_string()));
        }
        if tree_size == 0 {
            return Err(Error::InvalidInput("tree size must be positive".to_string()));
        }

        Ok(Self {
            tree_id,
            tree_size,
            root_hash: Sha256Hash::from_hex(root_hash_hex)?,
        })
    }

    /// The checkpoint a log info response describes
    pub fn from_log_info(info: &LogInfo) -> Result<Self> {
        Self::new(
            info.tree_id.clone(),
            info.tree_size,
            info.root_hash.as_str(),
        )
    }
}

/// Verify that the log's latest state extends a previously trusted checkpoint
///
/// Checks that `latest` belongs to the same tree, that its signed tree head
/// commits to its size and root, that the proof was computed for that root,
/// and finally the consistency proof itself.
pub fn verify_checkpoint_consistency(
    previous: &Checkpoint,
    latest: &LogInfo,
    proof: &ConsistencyProofResponse,
) -> Result<()> {
    if previous.tree_id != latest.tree_id {
        return Err(Error::CheckpointMismatch(format!(
            "previous checkpoint is for tree {}, latest is for tree {}",
            previous.tree_id, latest.tree_id
        )));
    }

    let latest_root = latest.root_hash.to_sha256()?;
    verify_signed_checkpoint(&latest.signed_tree_head, latest.tree_size, &latest_root)?;

    let proof_root = proof.root_hash.to_sha256()?;
    if proof_root != latest_root {
        return Err(Error::CheckpointMismatch(format!(
            "consistency proof is for root {}, latest checkpoint has {}",
            proof_root, latest_root
        )));
    }

    let hashes = proof
        .hashes
        .iter()
        .map(|h| h.to_sha256())
        .collect::<tlog_types::Result<Vec<_>>>()?;

    verify_consistency_proof(
        previous.tree_size,
        latest.tree_size,
        &hashes,
        &previous.root_hash,
        &latest_root,
    )?;

    tracing::info!(
        old_size = previous.tree_size,
        new_size = latest.tree_size,
        "checkpoint consistency verified"
    );
    Ok(())
}
