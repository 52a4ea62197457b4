//! Rekor log entry types

use crate::body::HashedRekordBody;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tlog_types::{Base64, Hex};

/// A log entry from Rekor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// UUID of the entry (the key in the response map)
    #[serde(skip)]
    pub uuid: String,
    /// Body of the entry (base64 encoded canonicalized body)
    pub body: Base64,
    /// Integrated time (Unix timestamp)
    pub integrated_time: i64,
    /// Log ID (hex-encoded SHA-256 of the log's public key)
    #[serde(rename = "logID")]
    pub log_id: String,
    /// Log index
    pub log_index: u64,
    /// Verification data
    #[serde(default)]
    pub verification: Option<Verification>,
}

impl LogEntry {
    /// The canonicalized body bytes, which are also the Merkle leaf data
    pub fn body_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.body.decode()?)
    }

    /// Decode the body as a `hashedrekord` entry
    pub fn decode_body(&self) -> Result<HashedRekordBody> {
        HashedRekordBody::from_canonical_bytes(&self.body_bytes()?)
    }

    /// The inclusion proof, when the log attached one
    pub fn inclusion_proof(&self) -> Option<&RekorInclusionProof> {
        self.verification
            .as_ref()
            .and_then(|v| v.inclusion_proof.as_ref())
    }
}

/// Verification data for a log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    /// Inclusion proof
    #[serde(default)]
    pub inclusion_proof: Option<RekorInclusionProof>,
    /// Signed entry timestamp (SET)
    #[serde(default)]
    pub signed_entry_timestamp: Option<Base64>,
}

/// Inclusion proof from the Rekor V1 API (hex-encoded hashes)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RekorInclusionProof {
    /// Checkpoint (signed tree head) for `tree_size`
    #[serde(default)]
    pub checkpoint: Option<String>,
    /// Hashes in the proof path, leaf to root
    pub hashes: Vec<Hex>,
    /// Log index
    pub log_index: u64,
    /// Root hash
    pub root_hash: Hex,
    /// Tree size
    pub tree_size: u64,
}

/// Log info response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogInfo {
    /// Root hash of the tree
    pub root_hash: Hex,
    /// Signed tree head (checkpoint)
    pub signed_tree_head: String,
    /// Tree ID
    #[serde(rename = "treeID")]
    pub tree_id: String,
    /// Tree size
    pub tree_size: u64,
    /// Shards frozen before the active tree
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inactive_shards: Vec<InactiveShard>,
}

/// Inactive shard info
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InactiveShard {
    pub root_hash: Hex,
    pub signed_tree_head: String,
    #[serde(rename = "treeID")]
    pub tree_id: String,
    pub tree_size: u64,
}

/// Consistency proof between two tree sizes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyProofResponse {
    /// Proof hashes
    pub hashes: Vec<Hex>,
    /// Root hash at the later size
    pub root_hash: Hex,
}

/// Entry lookup response (map of UUID to LogEntry)
pub type LogEntryResponse = HashMap<String, LogEntry>;

/// Take the single entry out of an entry lookup response
///
/// A lookup by index names exactly one entry. An empty map or several
/// entries mean the response cannot be attributed to the request.
pub fn single_entry(entries: LogEntryResponse) -> Result<LogEntry> {
    if entries.len() != 1 {
        return Err(Error::MalformedEnvelope(format!(
            "expected exactly one entry, found {}",
            entries.len()
        )));
    }

    let mut iter = entries.into_iter();
    let Some((uuid, mut entry)) = iter.next() else {
        return Err(Error::MalformedEnvelope("no entry in response".to_string()));
    };
    entry.uuid = uuid;
    Ok(entry)
}

/// Parse an entry lookup response body
pub fn parse_log_entry_response(json: &str) -> Result<LogEntry> {
    let entries: LogEntryResponse = serde_json::from_str(json)?;
    single_entry(entries)
}
