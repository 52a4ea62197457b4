//! Strongly-typed Rekor entry body structures
//!
//! The `body` of a log entry is the base64 encoding of the canonicalized
//! entry JSON. Its raw bytes are also the Merkle leaf data.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tlog_types::{Base64, Sha256Hash};

/// Entry kind this crate decodes
pub const HASHED_REKORD_KIND: &str = "hashedrekord";

/// Only the fields shared by every entry kind
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BodyHeader {
    api_version: String,
    kind: String,
}

/// Decoded `hashedrekord` v0.0.1 body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashedRekordBody {
    pub api_version: String,
    pub kind: String,
    pub spec: HashedRekordSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashedRekordSpec {
    pub data: HashedRekordData,
    pub signature: HashedRekordSignature,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashedRekordData {
    #[serde(default)]
    pub hash: Option<HashValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashValue {
    pub algorithm: String,
    /// Hex-encoded digest
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashedRekordSignature {
    /// Base64-encoded signature
    pub content: Base64,
    pub public_key: PublicKeyContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeyContent {
    /// Base64-encoded PEM certificate or public key
    pub content: Base64,
}

impl HashedRekordBody {
    /// Decode the canonicalized body bytes
    ///
    /// Bodies of any other kind are rejected with
    /// [`Error::UnsupportedEntryKind`] rather than a generic JSON error.
    pub fn from_canonical_bytes(bytes: &[u8]) -> Result<Self> {
        let header: BodyHeader = serde_json::from_slice(bytes)?;
        if header.kind != HASHED_REKORD_KIND {
            return Err(Error::UnsupportedEntryKind {
                kind: header.kind,
                api_version: header.api_version,
            });
        }
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Raw signature bytes
    pub fn signature_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.spec.signature.content.decode()?)
    }

    /// Certificate or public key material, as recorded (usually PEM)
    pub fn public_key_material(&self) -> Result<Vec<u8>> {
        Ok(self.spec.signature.public_key.content.decode()?)
    }

    /// SHA-256 digest of the artifact, if the entry records one
    pub fn artifact_sha256(&self) -> Result<Option<Sha256Hash>> {
        match &self.spec.data.hash {
            Some(hash) if hash.algorithm.eq_ignore_ascii_case("sha256") => {
                Ok(Some(Sha256Hash::from_hex(&hash.value)?))
            }
            _ => Ok(None),
        }
    }
}
