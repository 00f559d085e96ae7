//! Owned proof types, for carrying proofs around alongside receipts.

use crate::consistency::{consistent_roots, verify_consistent};
use crate::error::MmrVerifyResult;
use crate::hasher::{MerkleHash, PosHasher};
use crate::inclusion::{included_root, verify_included, verify_included_in_accumulator};
use crate::index::CompleteMmrIndex;

/// Proof that some node is included under one of the peaks of an MMR.
///
/// The path runs from the node's sibling up to just below the peak.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "borsh", derive(borsh::BorshSerialize, borsh::BorshDeserialize))]
pub struct InclusionProof<H>
where
    H: MerkleHash,
{
    /// Flat index of the node being proven.
    index: u64,

    /// Sibling hashes, closest first.
    path: Vec<H>,
}

impl<H: MerkleHash> InclusionProof<H> {
    /// Constructs a new instance from a node index and its sibling path.
    pub fn new(index: u64, path: Vec<H>) -> Self {
        Self { index, path }
    }

    /// Returns the index this proof is for.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Returns the sibling path.
    pub fn path(&self) -> &[H] {
        &self.path
    }

    /// Discards the index and returns the sibling path.
    pub fn into_path(self) -> Vec<H> {
        self.path
    }

    /// Computes the root obtained by applying this proof to `node`.
    pub fn compute_root<PH>(&self, node: &H) -> MmrVerifyResult<H>
    where
        PH: PosHasher<Hash = H>,
    {
        included_root::<PH>(self.index, node, &self.path)
    }

    /// Verifies this proof for `node` against the expected `root`.
    pub fn verify_with_root<PH>(&self, root: &H, node: &H) -> MmrVerifyResult<bool>
    where
        PH: PosHasher<Hash = H>,
    {
        verify_included::<PH>(self.index, node, &self.path, root)
    }

    /// Verifies this proof for `node` against the accumulator of `mmr`.
    pub fn verify_with_accumulator<PH>(
        &self,
        mmr: CompleteMmrIndex,
        accumulator: &[H],
        node: &H,
    ) -> MmrVerifyResult<bool>
    where
        PH: PosHasher<Hash = H>,
    {
        verify_included_in_accumulator::<PH>(mmr, accumulator, self.index, node, &self.path)
    }
}

/// Proof that one MMR state extends another.
///
/// Holds one inclusion path per peak of the older state, tallest peak first,
/// each reaching a peak of the newer state.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "borsh", derive(borsh::BorshSerialize, borsh::BorshDeserialize))]
pub struct ConsistencyProof<H>
where
    H: MerkleHash,
{
    /// Last index of the older state.
    from: u64,

    /// Last index of the newer state.
    to: u64,

    /// Inclusion path of each old peak.
    paths: Vec<Vec<H>>,
}

impl<H: MerkleHash> ConsistencyProof<H> {
    /// Constructs a new instance.  Nothing is checked until it's verified.
    pub fn new(from: u64, to: u64, paths: Vec<Vec<H>>) -> Self {
        Self { from, to, paths }
    }

    /// Returns the last index of the older state.
    pub fn from_index(&self) -> u64 {
        self.from
    }

    /// Returns the last index of the newer state.
    pub fn to_index(&self) -> u64 {
        self.to
    }

    /// Returns the per-peak inclusion paths.
    pub fn paths(&self) -> &[Vec<H>] {
        &self.paths
    }

    /// Returns the newer state's roots implied by the older `accumulator`.
    pub fn consistent_roots<PH>(&self, accumulator: &[H]) -> MmrVerifyResult<Vec<H>>
    where
        PH: PosHasher<Hash = H>,
    {
        consistent_roots::<PH, _>(self.from, accumulator, self.paths.as_slice())
    }

    /// Verifies that `accumulator_to` extends `accumulator_from`.
    pub fn verify<PH>(&self, accumulator_from: &[H], accumulator_to: &[H]) -> MmrVerifyResult<bool>
    where
        PH: PosHasher<Hash = H>,
    {
        verify_consistent::<PH, _>(
            self.from,
            accumulator_from,
            self.paths.as_slice(),
            self.to,
            accumulator_to,
        )
    }
}
