//! Key generation and signing using aws-lc-rs
//!
//! Only compiled for tests, which use it to produce signatures and key
//! material in the formats a log entry carries.

use crate::error::{Error, Result};
use crate::x509::SignatureAlgorithm;
use aws_lc_rs::{
    rand::SystemRandom,
    signature::{
        EcdsaKeyPair, Ed25519KeyPair, KeyPair as AwsKeyPair, ECDSA_P256_SHA256_ASN1_SIGNING,
        ECDSA_P384_SHA384_ASN1_SIGNING,
    },
};
use const_oid::db::rfc5912::{ID_EC_PUBLIC_KEY, SECP_256_R_1, SECP_384_R_1};
use const_oid::db::rfc8410::ID_ED_25519;
use der::asn1::BitString;
use der::Encode;
use spki::{AlgorithmIdentifierOwned, SubjectPublicKeyInfoOwned};

/// A detached signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature(Vec<u8>);

impl Signature {
    /// Create a new Signature from raw bytes
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Get the raw signature bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// A key pair for signing
pub enum KeyPair {
    /// ECDSA P-256 key pair
    EcdsaP256(EcdsaKeyPair),
    /// ECDSA P-384 key pair
    EcdsaP384(EcdsaKeyPair),
    /// Ed25519 key pair
    Ed25519(Ed25519KeyPair),
}

impl KeyPair {
    /// Generate a new ECDSA P-256 key pair
    pub fn generate_ecdsa_p256() -> Result<Self> {
        let rng = SystemRandom::new();
        let pkcs8 = EcdsaKeyPair::generate_pkcs8(&ECDSA_P256_SHA256_ASN1_SIGNING, &rng)
            .map_err(|_| Error::Signing("failed to generate ECDSA P-256 key".to_string()))?;
        let key_pair = EcdsaKeyPair::from_pkcs8(&ECDSA_P256_SHA256_ASN1_SIGNING, pkcs8.as_ref())?;
        Ok(KeyPair::EcdsaP256(key_pair))
    }

    /// Generate a new ECDSA P-384 key pair
    pub fn generate_ecdsa_p384() -> Result<Self> {
        let rng = SystemRandom::new();
        let pkcs8 = EcdsaKeyPair::generate_pkcs8(&ECDSA_P384_SHA384_ASN1_SIGNING, &rng)
            .map_err(|_| Error::Signing("failed to generate ECDSA P-384 key".to_string()))?;
        let key_pair = EcdsaKeyPair::from_pkcs8(&ECDSA_P384_SHA384_ASN1_SIGNING, pkcs8.as_ref())?;
        Ok(KeyPair::EcdsaP384(key_pair))
    }

    /// Generate a new Ed25519 key pair
    pub fn generate_ed25519() -> Result<Self> {
        let rng = SystemRandom::new();
        let pkcs8 = Ed25519KeyPair::generate_pkcs8(&rng)
            .map_err(|_| Error::Signing("failed to generate Ed25519 key".to_string()))?;
        let key_pair = Ed25519KeyPair::from_pkcs8(pkcs8.as_ref())?;
        Ok(KeyPair::Ed25519(key_pair))
    }

    /// The algorithm signatures from this key verify under
    pub fn algorithm(&self) -> SignatureAlgorithm {
        match self {
            KeyPair::EcdsaP256(_) => SignatureAlgorithm::EcdsaP256Sha256,
            KeyPair::EcdsaP384(_) => SignatureAlgorithm::EcdsaP384Sha384,
            KeyPair::Ed25519(_) => SignatureAlgorithm::Ed25519,
        }
    }

    /// Get the public key bytes (the subjectPublicKey content)
    pub fn public_key_bytes(&self) -> &[u8] {
        match self {
            KeyPair::EcdsaP256(kp) => kp.public_key().as_ref(),
            KeyPair::EcdsaP384(kp) => kp.public_key().as_ref(),
            KeyPair::Ed25519(kp) => kp.public_key().as_ref(),
        }
    }

    /// Sign data with this key pair
    pub fn sign(&self, data: &[u8]) -> Result<Signature> {
        let rng = SystemRandom::new();
        let sig = match self {
            KeyPair::EcdsaP256(kp) | KeyPair::EcdsaP384(kp) => {
                kp.sign(&rng, data)?.as_ref().to_vec()
            }
            KeyPair::Ed25519(kp) => kp.sign(data).as_ref().to_vec(),
        };
        Ok(Signature::new(sig))
    }

    /// Get the public key in DER-encoded SubjectPublicKeyInfo format
    pub fn public_key_to_der(&self) -> Result<Vec<u8>> {
        let algorithm = match self {
            KeyPair::EcdsaP256(_) => ec_algorithm_identifier(SECP_256_R_1)?,
            KeyPair::EcdsaP384(_) => ec_algorithm_identifier(SECP_384_R_1)?,
            KeyPair::Ed25519(_) => AlgorithmIdentifierOwned {
                oid: ID_ED_25519,
                parameters: None,
            },
        };

        let spki = SubjectPublicKeyInfoOwned {
            algorithm,
            subject_public_key: BitString::from_bytes(self.public_key_bytes())
                .map_err(|e| Error::MalformedKey(e.to_string()))?,
        };

        spki.to_der().map_err(|e| Error::MalformedKey(e.to_string()))
    }

    /// Get the public key as a PEM `PUBLIC KEY` block
    pub fn public_key_to_pem(&self) -> Result<String> {
        let der = self.public_key_to_der()?;
        Ok(pem::encode(&pem::Pem::new("PUBLIC KEY", der)))
    }
}

fn ec_algorithm_identifier(
    curve: const_oid::ObjectIdentifier,
) -> Result<AlgorithmIdentifierOwned> {
    let parameters =
        der::Any::encode_from(&curve).map_err(|e| Error::MalformedKey(e.to_string()))?;
    Ok(AlgorithmIdentifierOwned {
        oid: ID_EC_PUBLIC_KEY,
        parameters: Some(parameters),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_generate_ed25519() {
        let kp = KeyPair::generate_ed25519().unwrap();
        assert_eq!(kp.public_key_bytes().len(), 32);
        assert_eq!(kp.sign(b"test data to sign").unwrap().len(), 64);
    }

    #[test]
    fn test_ecdsa_p256_public_key_len() {
        let kp = KeyPair::generate_ecdsa_p256().unwrap();
        let bytes = kp.public_key_bytes();
        // Uncompressed P-256 point: 0x04 || X || Y
        assert_eq!(bytes.len(), 65);
        assert_eq!(bytes[0], 0x04);
    }

    #[rstest]
    #[case::p256(KeyPair::generate_ecdsa_p256().unwrap())]
    #[case::p384(KeyPair::generate_ecdsa_p384().unwrap())]
    #[case::ed25519(KeyPair::generate_ed25519().unwrap())]
    fn test_public_key_pem_round_trips_through_extraction(#[case] kp: KeyPair) {
        let pem = kp.public_key_to_pem().unwrap();
        assert!(pem.starts_with("-----BEGIN PUBLIC KEY-----"));

        let key = crate::extract_public_key(pem.as_bytes()).unwrap();
        assert_eq!(key.algorithm, kp.algorithm());
        assert_eq!(key.key_bytes, kp.public_key_bytes());
    }
}
