//! The monitor's operations, one per command-line mode

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tlog_rekor::{LogInfo, RekorClient};
use tlog_verify::{verify_checkpoint_consistency, verify_entry, Checkpoint, VerifiedEntry};

/// Fetch the log's latest stable checkpoint
pub async fn fetch_checkpoint(client: &RekorClient) -> Result<LogInfo> {
    client
        .get_log_info(true)
        .await
        .with_context(|| format!("failed to fetch checkpoint from {}", client.url()))
}

/// Write a checkpoint as pretty-printed JSON
pub fn save_checkpoint(info: &LogInfo, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(info)?;
    fs::write(path, json)
        .with_context(|| format!("failed to write checkpoint to {}", path.display()))?;
    tracing::debug!(path = %path.display(), "checkpoint saved");
    Ok(())
}

/// Fetch the entry at `log_index` and verify it against the artifact at `artifact_path`
pub async fn verify_inclusion(
    client: &RekorClient,
    log_index: u64,
    artifact_path: &Path,
) -> Result<VerifiedEntry> {
    let artifact = fs::read(artifact_path)
        .with_context(|| format!("failed to read artifact {}", artifact_path.display()))?;

    let entry = client
        .get_entry_by_index(log_index)
        .await
        .with_context(|| format!("failed to fetch log entry {log_index}"))?;
    tracing::debug!(uuid = %entry.uuid, integrated_time = entry.integrated_time, "fetched entry");

    let verified = verify_entry(&entry, &artifact)
        .with_context(|| format!("log entry {log_index} failed verification"))?;
    Ok(verified)
}

/// Verify that the log's latest checkpoint extends `previous`
///
/// Returns the latest checkpoint so the caller can keep it for the next run.
pub async fn verify_consistency(client: &RekorClient, previous: &Checkpoint) -> Result<LogInfo> {
    let latest = fetch_checkpoint(client).await?;

    // Rekor only serves proofs within one tree; asking across shards is an API error
    if latest.tree_id != previous.tree_id {
        bail!(
            "previous checkpoint is for tree {}, the log is now serving tree {}",
            previous.tree_id,
            latest.tree_id
        );
    }

    let proof = client
        .get_consistency_proof(
            previous.tree_size,
            latest.tree_size,
            Some(&previous.tree_id),
        )
        .await
        .with_context(|| {
            format!(
                "failed to fetch consistency proof from size {} to {}",
                previous.tree_size, latest.tree_size
            )
        })?;

    verify_checkpoint_consistency(previous, &latest, &proof).with_context(|| {
        format!(
            "log at size {} is not consistent with checkpoint at size {}",
            latest.tree_size, previous.tree_size
        )
    })?;
    Ok(latest)
}
