//! Command-line interface

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tlog_rekor::{RekorClient, DEFAULT_REKOR_URL};
use tlog_verify::Checkpoint;

use crate::commands;

/// File the checkpoint is written to in debug mode
pub const CHECKPOINT_FILE: &str = "checkpoint.json";

#[derive(Debug, Parser)]
#[command(
    name = "tlog-monitor",
    version,
    about = "Verify inclusion and consistency against a Rekor transparency log"
)]
pub struct Cli {
    /// Enable debug logging and save the fetched checkpoint
    #[arg(short, long)]
    pub debug: bool,

    /// Fetch and print the log's latest checkpoint
    #[arg(short, long)]
    pub checkpoint: bool,

    /// Verify inclusion and signature of the entry at this log index
    #[arg(long, value_name = "LOG_INDEX", requires = "artifact")]
    pub inclusion: Option<u64>,

    /// Artifact the entry passed to --inclusion signs
    #[arg(long, value_name = "PATH")]
    pub artifact: Option<PathBuf>,

    /// Verify the log's latest checkpoint is consistent with a previous one
    #[arg(long)]
    pub consistency: bool,

    /// Tree id of the previous checkpoint
    #[arg(long)]
    pub tree_id: Option<String>,

    /// Tree size of the previous checkpoint
    #[arg(long)]
    pub tree_size: Option<u64>,

    /// Root hash (hex) of the previous checkpoint
    #[arg(long)]
    pub root_hash: Option<String>,

    /// Base URL of the Rekor instance
    #[arg(long, env = "REKOR_URL", default_value = DEFAULT_REKOR_URL)]
    pub rekor_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}

impl Cli {
    /// Build the Rekor client described by the flags
    pub fn client(&self) -> Result<RekorClient> {
        RekorClient::with_timeout(&self.rekor_url, Duration::from_secs(self.timeout_secs))
            .context("failed to create Rekor client")
    }

    /// The previous checkpoint given with --consistency
    pub fn previous_checkpoint(&self) -> Result<Checkpoint> {
        let tree_id = self
            .tree_id
            .as_deref()
            .context("please specify the tree id of the previous checkpoint (--tree-id)")?;
        let tree_size = self
            .tree_size
            .context("please specify the tree size of the previous checkpoint (--tree-size)")?;
        let root_hash = self
            .root_hash
            .as_deref()
            .context("please specify the root hash of the previous checkpoint (--root-hash)")?;

        Ok(Checkpoint::new(tree_id, tree_size, root_hash)?)
    }

    /// Run every mode the flags select, in the order checkpoint, inclusion, consistency
    pub async fn run(&self) -> Result<()> {
        self.run_with_checkpoint_file(Path::new(CHECKPOINT_FILE)).await
    }

    /// Like [`Cli::run`], saving the debug-mode checkpoint to `checkpoint_file`
    pub async fn run_with_checkpoint_file(&self, checkpoint_file: &Path) -> Result<()> {
        // Reject bad previous checkpoints before any network traffic
        let previous = if self.consistency {
            Some(self.previous_checkpoint()?)
        } else {
            None
        };

        let client = self.client()?;

        if self.checkpoint {
            let info = commands::fetch_checkpoint(&client).await?;
            println!("{}", serde_json::to_string_pretty(&info)?);
            if self.debug {
                commands::save_checkpoint(&info, checkpoint_file)?;
            }
        }

        if let (Some(log_index), Some(artifact)) = (self.inclusion, &self.artifact) {
            let verified = commands::verify_inclusion(&client, log_index, artifact).await?;
            tracing::debug!(
                tree_size = verified.tree_size,
                root_hash = %verified.root_hash,
                "entry included"
            );
            println!("Offline root hash calculation for inclusion verified.");
        }

        if let Some(previous) = previous {
            let latest = commands::verify_consistency(&client, &previous).await?;
            tracing::debug!(
                tree_size = latest.tree_size,
                root_hash = %latest.root_hash,
                "latest checkpoint"
            );
            println!("Consistency verification successful.");
        }

        Ok(())
    }
}
