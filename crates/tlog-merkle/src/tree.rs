//! Merkle tree hashing utilities
//!
//! Implements RFC 6962 compliant Merkle tree hashing with:
//! - Domain separation via prefixes (0x00 for leaf, 0x01 for node)
//! - SHA-256 hash function

use sha2::{Digest, Sha256};
use tlog_types::Sha256Hash;

/// Prefix for leaf nodes in RFC 6962 Merkle tree
pub const LEAF_HASH_PREFIX: u8 = 0x00;

/// Prefix for internal nodes in RFC 6962 Merkle tree
pub const NODE_HASH_PREFIX: u8 = 0x01;

/// Hash a leaf node
///
/// Returns: SHA256(0x00 || leaf_data)
pub fn hash_leaf(data: &[u8]) -> Sha256Hash {
    let mut hasher = Sha256::new();
    hasher.update([LEAF_HASH_PREFIX]);
    hasher.update(data);
    Sha256Hash::from_bytes(hasher.finalize().into())
}

/// Hash two child nodes to create a parent node
///
/// Returns: SHA256(0x01 || left || right)
pub fn hash_children(left: &Sha256Hash, right: &Sha256Hash) -> Sha256Hash {
    let mut hasher = Sha256::new();
    hasher.update([NODE_HASH_PREFIX]);
    hasher.update(left.as_bytes());
    hasher.update(right.as_bytes());
    Sha256Hash::from_bytes(hasher.finalize().into())
}

/// Number of bits needed to represent `n`
pub(crate) fn bit_length(n: u64) -> u32 {
    64 - n.leading_zeros()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_sha256(data: &[u8]) -> [u8; 32] {
        Sha256::digest(data).into()
    }

    #[test]
    fn test_hash_leaf_uses_leaf_prefix() {
        let data = b"test data";
        let mut prefixed = vec![0x00];
        prefixed.extend_from_slice(data);

        assert_eq!(hash_leaf(data).as_bytes(), &raw_sha256(&prefixed));
        assert_ne!(hash_leaf(data).as_bytes(), &raw_sha256(data));
    }

    #[test]
    fn test_hash_leaf_empty() {
        // RFC 6962 hash of the empty leaf
        assert_eq!(
            hash_leaf(b"").to_hex(),
            "6e340b9cffb37a989ca544e6bb780a2c78901d3fb33738768511a30617afa01d"
        );
    }

    #[test]
    fn test_hash_children_order_matters() {
        let left = Sha256Hash::from_bytes([0u8; 32]);
        let right = Sha256Hash::from_bytes([1u8; 32]);

        let mut prefixed = vec![0x01];
        prefixed.extend_from_slice(left.as_slice());
        prefixed.extend_from_slice(right.as_slice());

        assert_eq!(hash_children(&left, &right).as_bytes(), &raw_sha256(&prefixed));
        assert_ne!(hash_children(&left, &right), hash_children(&right, &left));
    }

    #[test]
    fn test_leaf_and_node_domains_differ() {
        // A two-leaf subtree hash replayed as leaf data must not collide
        let left = hash_leaf(b"a");
        let right = hash_leaf(b"b");
        let mut concatenated = left.as_slice().to_vec();
        concatenated.extend_from_slice(right.as_slice());

        assert_ne!(hash_leaf(&concatenated), hash_children(&left, &right));
    }

    #[test]
    fn test_bit_length() {
        assert_eq!(bit_length(0), 0);
        assert_eq!(bit_length(1), 1);
        assert_eq!(bit_length(2), 2);
        assert_eq!(bit_length(3), 2);
        assert_eq!(bit_length(4), 3);
        assert_eq!(bit_length(255), 8);
        assert_eq!(bit_length(256), 9);
    }
}
