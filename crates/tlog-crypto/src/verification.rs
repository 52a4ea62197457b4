//! Detached artifact signature verification using aws-lc-rs

use crate::error::{Error, Result};
use crate::x509::{PublicKey, SignatureAlgorithm};
use aws_lc_rs::signature::{
    UnparsedPublicKey, VerificationAlgorithm, ECDSA_P256_SHA256_ASN1, ECDSA_P384_SHA384_ASN1,
    ED25519, RSA_PKCS1_2048_8192_SHA256,
};
use std::path::Path;

fn verification_algorithm(algorithm: SignatureAlgorithm) -> &'static dyn VerificationAlgorithm {
    match algorithm {
        SignatureAlgorithm::EcdsaP256Sha256 => &ECDSA_P256_SHA256_ASN1,
        SignatureAlgorithm::EcdsaP384Sha384 => &ECDSA_P384_SHA384_ASN1,
        SignatureAlgorithm::Ed25519 => &ED25519,
        SignatureAlgorithm::RsaPkcs1Sha256 => &RSA_PKCS1_2048_8192_SHA256,
    }
}

/// Verify a detached signature over an artifact
///
/// The artifact is hashed as part of verification (ECDSA and RSA) or signed
/// directly (Ed25519). Any failure, including a truncated or garbage
/// signature, is reported as [`Error::SignatureInvalid`].
pub fn verify_artifact_signature(
    signature: &[u8],
    public_key: &PublicKey,
    artifact: &[u8],
) -> Result<()> {
    let key = UnparsedPublicKey::new(
        verification_algorithm(public_key.algorithm),
        &public_key.key_bytes,
    );

    key.verify(artifact, signature).map_err(|_| {
        Error::SignatureInvalid(format!(
            "{} signature does not verify",
            public_key.algorithm
        ))
    })?;

    tracing::debug!(
        algorithm = public_key.algorithm.name(),
        artifact_len = artifact.len(),
        "artifact signature verified"
    );
    Ok(())
}

/// Verify a detached signature over the contents of a file
///
/// The file is read in full and closed before verification.
pub fn verify_artifact_file(
    signature: &[u8],
    public_key: &PublicKey,
    path: impl AsRef<Path>,
) -> Result<()> {
    let artifact = std::fs::read(path.as_ref())?;
    verify_artifact_signature(signature, public_key, &artifact)
}
