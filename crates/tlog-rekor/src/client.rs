//! Rekor client for transparency log operations

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::entry::{single_entry, ConsistencyProofResponse, LogEntry, LogEntryResponse, LogInfo};
use crate::error::{Error, Result};

/// Public Sigstore Rekor instance
pub const DEFAULT_REKOR_URL: &str = "https://rekor.sigstore.dev";

/// A client for interacting with Rekor
#[derive(Debug, Clone)]
pub struct RekorClient {
    /// Base URL of the Rekor instance
    url: String,
    /// HTTP client
    client: reqwest::Client,
}

impl RekorClient {
    /// Create a new Rekor client
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a client whose requests give up after `timeout`
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Http(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            url: url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Base URL this client talks to
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T> {
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), %url, "request rejected by log");
            return Err(Error::Api {
                status: status.as_u16(),
                message: format!("failed to get {}: {}", what, body.trim()),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Get log info (tree size, root hash, signed tree head)
    ///
    /// With `stable`, the log returns its most recent published checkpoint
    /// rather than the live tree head.
    pub async fn get_log_info(&self, stable: bool) -> Result<LogInfo> {
        let mut url = format!("{}/api/v1/log", self.url);
        if stable {
            url.push_str("?stable=true");
        }
        self.get_json(&url, "log info").await
    }

    /// Get a log entry by index
    pub async fn get_entry_by_index(&self, index: u64) -> Result<LogEntry> {
        let url = format!("{}/api/v1/log/entries?logIndex={}", self.url, index);
        let entries: LogEntryResponse = self
            .get_json(&url, &format!("entry at index {}", index))
            .await?;
        let entry = single_entry(entries)?;

        if entry.log_index != index {
            return Err(Error::MalformedEnvelope(format!(
                "requested index {}, log returned index {}",
                index, entry.log_index
            )));
        }
        Ok(entry)
    }

    /// Get a consistency proof between two tree sizes
    ///
    /// `tree_id` selects a specific shard; without it the active tree is used.
    pub async fn get_consistency_proof(
        &self,
        first_size: u64,
        last_size: u64,
        tree_id: Option<&str>,
    ) -> Result<ConsistencyProofResponse> {
        if first_size > last_size {
            return Err(Error::InvalidRequest(format!(
                "first size {} must not exceed last size {}",
                first_size, last_size
            )));
        }

        let mut url = format!(
            "{}/api/v1/log/proof?firstSize={}&lastSize={}",
            self.url, first_size, last_size
        );
        if let Some(tree_id) = tree_id {
            url.push_str(&format!("&treeID={}", tree_id));
        }
        self.get_json(&url, "consistency proof").await
    }
}

/// A client for the public Sigstore Rekor instance
impl Default for RekorClient {
    fn default() -> Self {
        Self::new(DEFAULT_REKOR_URL)
    }
}
