//! HashedRekord entry validation
//!
//! Checks that the signature recorded in a `hashedrekord` entry was made over
//! the artifact by the key the entry carries.

use crate::error::{Error, Result};
use tlog_crypto::{extract_public_key, verify_artifact_signature, PublicKey};
use tlog_rekor::{HashedRekordBody, LogEntry};
use tlog_types::Sha256Hash;

/// Verify the entry's detached signature over `artifact`
///
/// Returns the public key the signature verified under.
pub fn verify_entry_signature(entry: &LogEntry, artifact: &[u8]) -> Result<PublicKey> {
    let body = entry.decode_body()?;
    verify_body_signature(&body, artifact)
}

pub(crate) fn verify_body_signature(body: &HashedRekordBody, artifact: &[u8]) -> Result<PublicKey> {
    let signature = body.signature_bytes()?;
    let material = body.public_key_material()?;

    let public_key = extract_public_key(&material)?;
    verify_artifact_signature(&signature, &public_key, artifact)?;

    Ok(public_key)
}

/// Check the artifact against the digest the entry records
///
/// Entries without a SHA-256 digest pass; the signature check still binds
/// the artifact to the entry.
pub fn verify_artifact_digest(body: &HashedRekordBody, artifact: &[u8]) -> Result<()> {
    let Some(expected) = body.artifact_sha256()? else {
        tracing::debug!("entry records no sha256 artifact digest");
        return Ok(());
    };

    let actual = Sha256Hash::from_bytes(tlog_crypto::sha256(artifact));
    if actual != expected {
        return Err(Error::ArtifactDigestMismatch {
            expected: expected.to_hex(),
            actual: actual.to_hex(),
        });
    }
    Ok(())
}
