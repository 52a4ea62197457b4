//! RFC 6962 Merkle tree verification for transparency logs
//!
//! This crate implements the pure verification core: domain-separated leaf and
//! node hashing, inclusion proof verification and consistency proof
//! verification. Nothing here performs I/O or keeps state between calls.

pub mod error;
pub mod proof;
pub mod tree;

pub use error::{Error, Result};
pub use proof::{
    verify_consistency_proof, verify_inclusion_proof, verify_inclusion_proof_hex,
    ConsistencyProof, InclusionProof,
};
pub use tree::{hash_children, hash_leaf, LEAF_HASH_PREFIX, NODE_HASH_PREFIX};
