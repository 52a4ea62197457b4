//! Merkle proof verification
//!
//! Inclusion and consistency proof verification as specified in RFC 6962 and
//! restated in RFC 9162 sections 2.1.3.2 and 2.1.4.2. The proof length is
//! validated against the tree shape before any hashing happens, so a wrong
//! length is reported as a malformed proof rather than a root mismatch.

use crate::error::{Error, Result};
use crate::tree::{bit_length, hash_children, hash_leaf};
use tlog_types::{Hex, Sha256Hash};

/// An audit path for one leaf, bundled with the root it claims to lead to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InclusionProof {
    pub leaf_index: u64,
    pub tree_size: u64,
    pub leaf_hash: Sha256Hash,
    pub hashes: Vec<Sha256Hash>,
    pub root: Sha256Hash,
}

impl InclusionProof {
    /// Verify this proof; see [`verify_inclusion_proof`]
    pub fn verify(&self) -> Result<()> {
        verify_inclusion_proof(
            &self.leaf_hash,
            self.leaf_index,
            self.tree_size,
            &self.hashes,
            &self.root,
        )
    }
}

/// A consistency path between two tree sizes, bundled with both claimed roots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsistencyProof {
    pub old_size: u64,
    pub new_size: u64,
    pub hashes: Vec<Sha256Hash>,
    pub old_root: Sha256Hash,
    pub new_root: Sha256Hash,
}

impl ConsistencyProof {
    /// Verify this proof; see [`verify_consistency_proof`]
    pub fn verify(&self) -> Result<()> {
        verify_consistency_proof(
            self.old_size,
            self.new_size,
            &self.hashes,
            &self.old_root,
            &self.new_root,
        )
    }
}

/// Verify an inclusion proof for a leaf in a Merkle tree
///
/// # Arguments
/// * `leaf_hash` - The hash of the leaf entry (see [`hash_leaf`])
/// * `leaf_index` - Index of the leaf in the tree (0-based)
/// * `tree_size` - Total number of leaves in the tree
/// * `proof_hashes` - The audit path, closest-to-leaf first
/// * `expected_root` - The root hash the proof claims
///
/// # Errors
/// * [`Error::InvalidRange`] if `tree_size == 0` or `leaf_index >= tree_size`
/// * [`Error::MalformedProof`] if the path length does not match the tree shape
/// * [`Error::RootMismatch`] if the recomputed root differs from `expected_root`
pub fn verify_inclusion_proof(
    leaf_hash: &Sha256Hash,
    leaf_index: u64,
    tree_size: u64,
    proof_hashes: &[Sha256Hash],
    expected_root: &Sha256Hash,
) -> Result<()> {
    if tree_size == 0 {
        return Err(Error::InvalidRange("tree size cannot be zero".to_string()));
    }

    if leaf_index >= tree_size {
        return Err(Error::InvalidRange(format!(
            "leaf index {} >= tree size {}",
            leaf_index, tree_size
        )));
    }

    let (inner, border) = decompose_inclusion_proof(leaf_index, tree_size);
    let expected_len = inner + border;
    if proof_hashes.len() != expected_len {
        return Err(Error::MalformedProof(format!(
            "expected {} proof hashes for leaf {} in tree of size {}, got {}",
            expected_len,
            leaf_index,
            tree_size,
            proof_hashes.len()
        )));
    }

    let calculated = root_from_inclusion_proof(leaf_hash, leaf_index, tree_size, proof_hashes)?;

    if &calculated != expected_root {
        return Err(Error::RootMismatch {
            which: "tree",
            expected: expected_root.to_hex(),
            actual: calculated.to_hex(),
        });
    }

    tracing::debug!(leaf_index, tree_size, root = %calculated, "inclusion proof verified");
    Ok(())
}

/// Recompose the root from a leaf hash and its audit path
fn root_from_inclusion_proof(
    leaf_hash: &Sha256Hash,
    leaf_index: u64,
    tree_size: u64,
    proof_hashes: &[Sha256Hash],
) -> Result<Sha256Hash> {
    let mut hash = *leaf_hash;
    let mut node = leaf_index;
    let mut last = tree_size - 1;

    for sibling in proof_hashes {
        if last == 0 {
            return Err(Error::MalformedProof(
                "audit path is longer than the tree is tall".to_string(),
            ));
        }

        if node & 1 == 1 || node == last {
            // Right child, or the complete rightmost subtree at this level:
            // the sibling sits to the left.
            hash = hash_children(sibling, &hash);
            if node & 1 == 0 {
                while node & 1 == 0 && node != 0 {
                    node >>= 1;
                    last >>= 1;
                }
            }
        } else {
            hash = hash_children(&hash, sibling);
        }

        node >>= 1;
        last >>= 1;
    }

    if last != 0 {
        return Err(Error::MalformedProof(
            "audit path exhausted before reaching the root".to_string(),
        ));
    }

    Ok(hash)
}

/// Verify a consistency proof between two tree states
///
/// # Arguments
/// * `old_size` - Size of the older tree (at least 1)
/// * `new_size` - Size of the newer tree
/// * `proof_hashes` - The hashes in the consistency proof
/// * `old_root` - Root hash of the older tree
/// * `new_root` - Root hash of the newer tree
///
/// # Errors
/// * [`Error::InvalidRange`] if `old_size == 0` or `old_size > new_size`
/// * [`Error::MalformedProof`] if the proof length does not match the sizes
/// * [`Error::RootMismatch`] if either recomputed root differs
pub fn verify_consistency_proof(
    old_size: u64,
    new_size: u64,
    proof_hashes: &[Sha256Hash],
    old_root: &Sha256Hash,
    new_root: &Sha256Hash,
) -> Result<()> {
    if old_size == 0 {
        return Err(Error::InvalidRange("old tree size cannot be zero".to_string()));
    }

    if old_size > new_size {
        return Err(Error::InvalidRange(format!(
            "old size {} > new size {}",
            old_size, new_size
        )));
    }

    if old_size == new_size {
        if !proof_hashes.is_empty() {
            return Err(Error::MalformedProof(
                "proof should be empty for same-size trees".to_string(),
            ));
        }
        if old_root != new_root {
            return Err(Error::RootMismatch {
                which: "new",
                expected: new_root.to_hex(),
                actual: old_root.to_hex(),
            });
        }
        return Ok(());
    }

    if proof_hashes.is_empty() {
        return Err(Error::MalformedProof(
            "proof cannot be empty for different-size trees".to_string(),
        ));
    }

    // A power-of-two old tree is a complete subtree of the new one, so its
    // root is the implicit first hash of the decomposition.
    let shift = old_size.trailing_zeros() as usize;
    let (inner, border) = decompose_inclusion_proof(old_size - 1, new_size);
    let inner = inner - shift;
    let start = if old_size == 1 << shift { 0 } else { 1 };

    let expected_len = start + inner + border;
    if proof_hashes.len() != expected_len {
        return Err(Error::MalformedProof(format!(
            "expected {} proof hashes from size {} to {}, got {}",
            expected_len,
            old_size,
            new_size,
            proof_hashes.len()
        )));
    }

    let mut path = Vec::with_capacity(proof_hashes.len() + 1);
    if start == 0 {
        path.push(*old_root);
    }
    path.extend_from_slice(proof_hashes);

    let mut node = old_size - 1;
    let mut last = new_size - 1;
    while node & 1 == 1 {
        node >>= 1;
        last >>= 1;
    }

    let mut old_hash = path[0];
    let mut new_hash = path[0];

    for c in &path[1..] {
        if last == 0 {
            return Err(Error::MalformedProof(
                "consistency path is longer than the tree is tall".to_string(),
            ));
        }

        if node & 1 == 1 || node == last {
            old_hash = hash_children(c, &old_hash);
            new_hash = hash_children(c, &new_hash);
            if node & 1 == 0 {
                while node & 1 == 0 && node != 0 {
                    node >>= 1;
                    last >>= 1;
                }
            }
        } else {
            // Past the old tree's right edge: only the new root grows.
            new_hash = hash_children(&new_hash, c);
        }

        node >>= 1;
        last >>= 1;
    }

    if last != 0 {
        return Err(Error::MalformedProof(
            "consistency path exhausted before reaching the new root".to_string(),
        ));
    }

    if &old_hash != old_root {
        return Err(Error::RootMismatch {
            which: "old",
            expected: old_root.to_hex(),
            actual: old_hash.to_hex(),
        });
    }

    if &new_hash != new_root {
        return Err(Error::RootMismatch {
            which: "new",
            expected: new_root.to_hex(),
            actual: new_hash.to_hex(),
        });
    }

    tracing::debug!(old_size, new_size, "consistency proof verified");
    Ok(())
}

/// Split an audit path length into its inner and border parts
///
/// The inner part covers the levels where the leaf's path and the path of the
/// last leaf diverge; the border part covers the right edge above that, where
/// only the set bits of the remaining index need a sibling.
fn decompose_inclusion_proof(index: u64, tree_size: u64) -> (usize, usize) {
    let inner = bit_length(index ^ (tree_size - 1));
    // inner reaches 64 when the paths diverge at the top bit
    let border = index.checked_shr(inner).unwrap_or(0).count_ones() as usize;
    (inner as usize, border)
}

/// Verify an inclusion proof whose hashes arrive hex-encoded (Rekor v1 API)
///
/// `leaf_data` is the raw (decoded) entry body; it is hashed with
/// [`hash_leaf`] before verification.
pub fn verify_inclusion_proof_hex(
    leaf_data: &[u8],
    leaf_index: u64,
    tree_size: u64,
    proof_hashes_hex: &[Hex],
    expected_root_hex: &Hex,
) -> Result<()> {
    let leaf_hash = hash_leaf(leaf_data);

    let proof_hashes = proof_hashes_hex
        .iter()
        .map(|h| h.to_sha256().map_err(|e| Error::MalformedProof(e.to_string())))
        .collect::<Result<Vec<_>>>()?;

    let expected_root = expected_root_hex
        .to_sha256()
        .map_err(|e| Error::MalformedProof(format!("root hash: {}", e)))?;

    verify_inclusion_proof(
        &leaf_hash,
        leaf_index,
        tree_size,
        &proof_hashes,
        &expected_root,
    )
}
