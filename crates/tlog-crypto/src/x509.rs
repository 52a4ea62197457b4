//! Public key extraction from certificates and SubjectPublicKeyInfo
//!
//! Only the SubjectPublicKeyInfo of a certificate is consulted. Validity
//! periods, extensions and chains are out of scope here.

use crate::encoding::KeyMaterial;
use crate::error::{Error, Result};
use const_oid::db::rfc5912::{ID_EC_PUBLIC_KEY, RSA_ENCRYPTION, SECP_256_R_1, SECP_384_R_1};
use const_oid::db::rfc8410::ID_ED_25519;
use const_oid::ObjectIdentifier;
use spki::SubjectPublicKeyInfoRef;
use x509_cert::der::Decode;
use x509_cert::Certificate;

/// Signature algorithms accepted for artifact signatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureAlgorithm {
    /// ECDSA P-256 with SHA-256, ASN.1 DER signatures
    EcdsaP256Sha256,
    /// ECDSA P-384 with SHA-384, ASN.1 DER signatures
    EcdsaP384Sha384,
    /// Ed25519
    Ed25519,
    /// RSA PKCS#1 v1.5 with SHA-256
    RsaPkcs1Sha256,
}

impl SignatureAlgorithm {
    /// Get the name of this algorithm
    pub fn name(&self) -> &'static str {
        match self {
            SignatureAlgorithm::EcdsaP256Sha256 => "ECDSA_P256_SHA256",
            SignatureAlgorithm::EcdsaP384Sha384 => "ECDSA_P384_SHA384",
            SignatureAlgorithm::Ed25519 => "ED25519",
            SignatureAlgorithm::RsaPkcs1Sha256 => "RSA_PKCS1_SHA256",
        }
    }
}

impl std::fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A public key together with the algorithm it verifies under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    /// Algorithm selected from the key's SubjectPublicKeyInfo
    pub algorithm: SignatureAlgorithm,
    /// Contents of the subjectPublicKey BIT STRING
    ///
    /// An uncompressed EC point, a raw Ed25519 key, or a PKCS#1
    /// RSAPublicKey, depending on `algorithm`.
    pub key_bytes: Vec<u8>,
}

/// Extract the public key from certificate or public key material
///
/// Accepts a PEM `CERTIFICATE` block, a PEM `PUBLIC KEY` block, or a DER
/// certificate.
pub fn extract_public_key(material: &[u8]) -> Result<PublicKey> {
    match KeyMaterial::parse(material)? {
        KeyMaterial::Certificate(cert_der) => {
            let cert = Certificate::from_der(cert_der.as_bytes()).map_err(|e| {
                Error::MalformedCertificate(format!("failed to parse certificate: {}", e))
            })?;
            let spki = &cert.tbs_certificate.subject_public_key_info;
            let params = spki.algorithm.parameters.as_ref().map(|p| p.value());
            let key_bytes = spki.subject_public_key.as_bytes().ok_or_else(|| {
                Error::MalformedKey("subjectPublicKey has unused bits".to_string())
            })?;
            public_key_from_parts(spki.algorithm.oid, params, key_bytes)
        }
        KeyMaterial::PublicKey(spki_der) => {
            let spki = SubjectPublicKeyInfoRef::try_from(spki_der.as_bytes()).map_err(|e| {
                Error::MalformedKey(format!("failed to parse SubjectPublicKeyInfo: {}", e))
            })?;
            let params = spki.algorithm.parameters.as_ref().map(|p| p.value());
            let key_bytes = spki.subject_public_key.as_bytes().ok_or_else(|| {
                Error::MalformedKey("subjectPublicKey has unused bits".to_string())
            })?;
            public_key_from_parts(spki.algorithm.oid, params, key_bytes)
        }
    }
}

fn public_key_from_parts(
    alg_oid: ObjectIdentifier,
    params: Option<&[u8]>,
    key_bytes: &[u8],
) -> Result<PublicKey> {
    let algorithm = algorithm_from_oids(alg_oid, params)?;

    if key_bytes.is_empty() {
        return Err(Error::MalformedKey("empty public key".to_string()));
    }
    if algorithm == SignatureAlgorithm::Ed25519 && key_bytes.len() != 32 {
        return Err(Error::MalformedKey(format!(
            "Ed25519 public key must be 32 bytes, got {}",
            key_bytes.len()
        )));
    }

    tracing::debug!(algorithm = algorithm.name(), "extracted public key");

    Ok(PublicKey {
        algorithm,
        key_bytes: key_bytes.to_vec(),
    })
}

/// Map the SPKI algorithm OID (and EC curve OID) to a signature algorithm
fn algorithm_from_oids(
    alg_oid: ObjectIdentifier,
    params: Option<&[u8]>,
) -> Result<SignatureAlgorithm> {
    if alg_oid == ID_EC_PUBLIC_KEY {
        let params = params.ok_or_else(|| {
            Error::MalformedKey("EC key missing curve parameters".to_string())
        })?;
        // params is the raw OID content (without tag/length)
        let curve_oid = ObjectIdentifier::from_bytes(params)
            .map_err(|e| Error::MalformedKey(format!("failed to parse EC curve OID: {}", e)))?;

        if curve_oid == SECP_256_R_1 {
            Ok(SignatureAlgorithm::EcdsaP256Sha256)
        } else if curve_oid == SECP_384_R_1 {
            Ok(SignatureAlgorithm::EcdsaP384Sha384)
        } else {
            Err(Error::UnsupportedAlgorithm(format!(
                "EC curve {}",
                curve_oid
            )))
        }
    } else if alg_oid == RSA_ENCRYPTION {
        Ok(SignatureAlgorithm::RsaPkcs1Sha256)
    } else if alg_oid == ID_ED_25519 {
        Ok(SignatureAlgorithm::Ed25519)
    } else {
        Err(Error::UnsupportedAlgorithm(format!(
            "public key algorithm {}",
            alg_oid
        )))
    }
}
