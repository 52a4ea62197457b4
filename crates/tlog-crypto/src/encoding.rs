//! Type-safe wrappers for encoded key material
//!
//! A log entry may carry either an X.509 certificate or a bare public key, in
//! PEM or DER form. These wrappers make the distinction explicit before any
//! ASN.1 parsing happens.

use crate::error::{Error, Result};

const PEM_CERTIFICATE: &str = "CERTIFICATE";
const PEM_PUBLIC_KEY: &str = "PUBLIC KEY";

/// A DER-encoded X.509 certificate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateDer(Vec<u8>);

impl CertificateDer {
    /// Create from DER bytes
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Get the underlying DER bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for CertificateDer {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A DER-encoded SubjectPublicKeyInfo (SPKI)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeySpki(Vec<u8>);

impl PublicKeySpki {
    /// Create from DER bytes
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Get the underlying DER bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for PublicKeySpki {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Key material as found in a log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyMaterial {
    /// An X.509 certificate wrapping the signer's key
    Certificate(CertificateDer),
    /// A bare SubjectPublicKeyInfo
    PublicKey(PublicKeySpki),
}

impl KeyMaterial {
    /// Classify raw bytes as PEM (certificate or public key) or DER certificate
    ///
    /// Bytes that do not look like PEM are taken to be a DER certificate; the
    /// certificate parser reports whether they really are one.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let Some(text) = std::str::from_utf8(bytes)
            .ok()
            .filter(|s| s.trim_start().starts_with("-----BEGIN"))
        else {
            return Ok(KeyMaterial::Certificate(CertificateDer::new(bytes.to_vec())));
        };

        let parsed = pem::parse(text)
            .map_err(|e| Error::MalformedCertificate(format!("failed to parse PEM: {}", e)))?;

        match parsed.tag() {
            PEM_CERTIFICATE => Ok(KeyMaterial::Certificate(CertificateDer::new(
                parsed.into_contents(),
            ))),
            PEM_PUBLIC_KEY => Ok(KeyMaterial::PublicKey(PublicKeySpki::new(
                parsed.into_contents(),
            ))),
            other => Err(Error::MalformedCertificate(format!(
                "expected CERTIFICATE or PUBLIC KEY PEM block, got {}",
                other
            ))),
        }
    }
}
