//! Checkpoint (signed tree head) types
//!
//! A checkpoint is a signed note committing to a log's size and root hash.
//! Format: https://github.com/transparency-dev/formats/blob/main/log/README.md

use crate::encoding::Sha256Hash;
use crate::error::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine};

/// Prefix of a signature line in a signed note (em dash followed by a space)
const SIGNATURE_LINE_PREFIX: &str = "\u{2014} ";

/// A checkpoint (signed tree head) from a transparency log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    /// The origin string identifying the log
    pub origin: String,
    /// Tree size (number of leaves)
    pub tree_size: u64,
    /// Root hash of the Merkle tree
    pub root_hash: Sha256Hash,
    /// Extension lines between the root hash and the blank line
    pub other_content: Vec<String>,
    /// Signatures over the note body
    pub signatures: Vec<CheckpointSignature>,
}

/// A signature line on a checkpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckpointSignature {
    /// Name of the signer
    pub name: String,
    /// Key hint (first 4 bytes of the SHA-256 of the signer's key)
    pub key_id: [u8; 4],
    /// Signature bytes
    pub signature: Vec<u8>,
}

impl Checkpoint {
    /// Parse a checkpoint from its text representation
    ///
    /// ```text
    /// <origin>
    /// <tree_size>
    /// <root_hash_base64>
    /// [other_content...]
    ///
    /// — <name> <base64(key_id || signature)>
    /// ```
    pub fn from_text(text: &str) -> Result<Self> {
        let (body, sigs) = text
            .split_once("\n\n")
            .ok_or_else(|| Error::InvalidCheckpoint("missing blank line".to_string()))?;

        let mut lines = body.lines();

        let origin = lines
            .next()
            .filter(|l| !l.is_empty())
            .ok_or_else(|| Error::InvalidCheckpoint("missing origin".to_string()))?
            .to_string();

        let tree_size = lines
            .next()
            .ok_or_else(|| Error::InvalidCheckpoint("missing tree size".to_string()))?
            .parse()
            .map_err(|_| Error::InvalidCheckpoint("invalid tree size".to_string()))?;

        let root_hash_b64 = lines
            .next()
            .ok_or_else(|| Error::InvalidCheckpoint("missing root hash".to_string()))?;
        let root_hash = Sha256Hash::from_base64(root_hash_b64)
            .map_err(|e| Error::InvalidCheckpoint(format!("invalid root hash: {}", e)))?;

        let other_content = lines.map(str::to_string).collect();

        let mut signatures = Vec::new();
        for line in sigs.lines().filter(|l| !l.is_empty()) {
            let content = line.strip_prefix(SIGNATURE_LINE_PREFIX).ok_or_else(|| {
                Error::InvalidCheckpoint(format!("unexpected line after note body: {}", line))
            })?;

            let (name, key_and_sig) = content.split_once(' ').ok_or_else(|| {
                Error::InvalidCheckpoint("invalid signature line format".to_string())
            })?;

            let decoded = STANDARD
                .decode(key_and_sig)
                .map_err(|_| Error::InvalidCheckpoint("invalid signature base64".to_string()))?;

            if decoded.len() <= 4 {
                return Err(Error::InvalidCheckpoint(
                    "signature too short for key id".to_string(),
                ));
            }

            let mut key_id = [0u8; 4];
            key_id.copy_from_slice(&decoded[..4]);

            signatures.push(CheckpointSignature {
                name: name.to_string(),
                key_id,
                signature: decoded[4..].to_vec(),
            });
        }

        Ok(Checkpoint {
            origin,
            tree_size,
            root_hash,
            other_content,
            signatures,
        })
    }

    /// Encode the note body (the signed portion, without signature lines)
    pub fn to_signed_note_body(&self) -> String {
        let mut result = format!(
            "{}\n{}\n{}\n",
            self.origin,
            self.tree_size,
            self.root_hash.to_base64()
        );

        for line in &self.other_content {
            result.push_str(line);
            result.push('\n');
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REKOR_CHECKPOINT: &str = "rekor.sigstore.dev - 1193050959916656506
44238955
TiowMOu0x46fW4pXrRyW7TeVb6f1/VDnDZWcP1xL/HU=

\u{2014} rekor.sigstore.dev wNI9ajBEAiBF3lyT0Jg0paKCvqJQ0t97+hcneAqZHeiRuLinOba/YQIgG65ZKAhE+byLy+VQ4/14FwvJG0FMhq4CNoDONpzvOMc=
";

    #[test]
    fn test_parse_checkpoint() {
        let checkpoint = Checkpoint::from_text(REKOR_CHECKPOINT).unwrap();
        assert_eq!(
            checkpoint.origin,
            "rekor.sigstore.dev - 1193050959916656506"
        );
        assert_eq!(checkpoint.tree_size, 44238955);
        assert_eq!(
            checkpoint.root_hash.to_base64(),
            "TiowMOu0x46fW4pXrRyW7TeVb6f1/VDnDZWcP1xL/HU="
        );
        assert!(checkpoint.other_content.is_empty());
        assert_eq!(checkpoint.signatures.len(), 1);
        assert_eq!(checkpoint.signatures[0].name, "rekor.sigstore.dev");
        assert_eq!(checkpoint.signatures[0].key_id, [0xc0, 0xd2, 0x3d, 0x6a]);
    }

    #[test]
    fn test_signed_note_body() {
        let checkpoint = Checkpoint::from_text(REKOR_CHECKPOINT).unwrap();
        let body = checkpoint.to_signed_note_body();
        assert!(REKOR_CHECKPOINT.starts_with(&body));
    }

    #[test]
    fn test_missing_blank_line() {
        let err = Checkpoint::from_text("origin\n1\nAAAA\n").unwrap_err();
        assert!(matches!(err, Error::InvalidCheckpoint(_)));
    }

    #[test]
    fn test_invalid_tree_size() {
        let text = "origin\nnot-a-number\nTiowMOu0x46fW4pXrRyW7TeVb6f1/VDnDZWcP1xL/HU=\n\n";
        assert!(Checkpoint::from_text(text).is_err());
    }

    #[test]
    fn test_short_root_hash() {
        let text = "origin\n1\nAAAA\n\n";
        let err = Checkpoint::from_text(text).unwrap_err();
        assert!(err.to_string().contains("root hash"));
    }
}
