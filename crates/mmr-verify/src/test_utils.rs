//! Canonical forest construction for tests and benchmarks.
//!
//! Verification never needs a tree, but checking a verifier does.  This
//! builds every node hash of a forest by explicit appends and derives the
//! genuine proofs that a log operator would hand out.

use sha2::{Digest, Sha256};

use crate::Sha256PosHasher;
use crate::hasher::{MerkleHash, PosHasher};
use crate::index::{index_height, is_complete, peaks};

/// Canonical leaf hash for leaf index `v`: SHA-256 of its big endian bytes.
pub fn hash_num64(v: u64) -> [u8; 32] {
    Sha256::digest(v.to_be_bytes()).into()
}

/// Returns the indices of the siblings needed to prove node `i` up to its
/// peak in `MMR(mmr_index)`, bottom-up.
///
/// # Panics
///
/// If `mmr_index` is not complete or `i` is past it.
pub fn inclusion_path(i: u64, mmr_index: u64) -> Vec<u64> {
    assert!(i <= mmr_index, "test_utils: index {i} past mmr {mmr_index}");
    let mmr_peaks = peaks(mmr_index).expect("test_utils: incomplete mmr");

    let mut path = Vec::new();
    let mut i = i;
    let mut g = index_height(i);
    while !mmr_peaks.contains(&i) {
        if index_height(i + 1) > g {
            // right child, sibling is to the left
            path.push(i + 1 - (2u64 << g));
            i += 1;
        } else {
            // left child, sibling is to the right
            path.push(i + (2u64 << g) - 1);
            i += 2u64 << g;
        }
        g += 1;
    }

    path
}

/// Returns the complete last indices below `num_nodes`.
pub fn complete_indices(num_nodes: u64) -> Vec<u64> {
    (0..num_nodes).filter(|i| is_complete(*i)).collect()
}

/// Every node hash of a forest, indexed by flat index.
#[derive(Clone, Debug)]
pub struct CanonicalMmr<H: MerkleHash> {
    nodes: Vec<H>,
}

impl CanonicalMmr<[u8; 32]> {
    /// Builds the SHA-256 reference forest, with leaf `i` hashed from `i`.
    pub fn sha256(num_nodes: u64) -> Self {
        Self::build::<Sha256PosHasher>(num_nodes, hash_num64)
    }
}

impl<H: MerkleHash> CanonicalMmr<H> {
    /// Builds `num_nodes` nodes, taking leaf hashes from `leaf` and hashing
    /// interior nodes with `PH`.
    pub fn build<PH: PosHasher<Hash = H>>(num_nodes: u64, mut leaf: impl FnMut(u64) -> H) -> Self {
        let mut nodes: Vec<H> = Vec::with_capacity(num_nodes as usize);
        for i in 0..num_nodes {
            let h = index_height(i);
            let hash = if h == 0 {
                leaf(i)
            } else {
                // The left subtree has 2^h - 1 nodes and ends just before the
                // right subtree starts.
                let left = (i - (1u64 << h)) as usize;
                let right = (i - 1) as usize;
                PH::hash_pos_pair(i + 1, &nodes[left], &nodes[right])
            };
            nodes.push(hash);
        }

        Self { nodes }
    }

    /// Returns the number of nodes built.
    pub fn num_nodes(&self) -> u64 {
        self.nodes.len() as u64
    }

    /// Returns the hash of node `i`.
    pub fn node(&self, i: u64) -> H {
        self.nodes[i as usize]
    }

    /// Returns the peak hashes of `MMR(mmr_index)`, tallest first.
    pub fn accumulator(&self, mmr_index: u64) -> Vec<H> {
        peaks(mmr_index)
            .expect("test_utils: incomplete mmr")
            .into_iter()
            .map(|p| self.node(p))
            .collect()
    }

    /// Returns the genuine inclusion proof of node `i` in `MMR(mmr_index)`.
    pub fn inclusion_proof(&self, i: u64, mmr_index: u64) -> Vec<H> {
        inclusion_path(i, mmr_index)
            .into_iter()
            .map(|s| self.node(s))
            .collect()
    }

    /// Returns one inclusion proof per peak of `MMR(ifrom)`, each against
    /// `MMR(ito)`.
    pub fn consistency_proofs(&self, ifrom: u64, ito: u64) -> Vec<Vec<H>> {
        peaks(ifrom)
            .expect("test_utils: incomplete mmr")
            .into_iter()
            .map(|p| self.inclusion_proof(p, ito))
            .collect()
    }
}
