//! Flat-index arithmetic for MMRs.
//!
//! Every node of the forest, leaf or interior, gets the next index in append
//! order.  A node's height and the peaks of a forest follow from the index
//! alone, so nothing here ever looks at a tree.
//!
//! Positions are the 1-based form of an index.  They are computed in a
//! `u128` so that the last representable index still has a position.

use crate::error::{MmrVerifyError, MmrVerifyResult};

/// Height of a node, 0 for leaves.
pub type Height = u8;

/// Returns the value of the highest set bit of `pos`, which must be nonzero.
fn most_sig_bit(pos: u128) -> u128 {
    1 << (127 - pos.leading_zeros())
}

/// Returns the number of bits needed to represent `pos`.
fn bit_length(pos: u128) -> u32 {
    128 - pos.leading_zeros()
}

/// Returns if `pos` is of the form `2^k - 1`.
fn all_ones(pos: u128) -> bool {
    pos & (pos + 1) == 0
}

/// Height of the node at 1-based position `pos`.
fn pos_height(mut pos: u128) -> Height {
    // Strip off completed left subtrees until we land on the right edge of a
    // perfect tree.
    while !all_ones(pos) {
        pos = pos - most_sig_bit(pos) + 1;
    }

    (bit_length(pos) - 1) as Height
}

/// Returns the zero-based height of the node at flat index `i`.
pub fn index_height(i: u64) -> Height {
    pos_height(u128::from(i) + 1)
}

/// Returns `floor(log2(x))`, failing for zero.
pub fn log2floor(x: u64) -> MmrVerifyResult<u32> {
    x.checked_ilog2().ok_or(MmrVerifyError::ZeroLog2)
}

/// Returns if `i` is the last index of a complete forest, ie. one reachable
/// by appending leaves.
///
/// That is the case exactly when the next node to be created is a leaf.
pub fn is_complete(i: u64) -> bool {
    pos_height(u128::from(i) + 2) == 0
}

/// Returns the peaks of `MMR(i)` without checking that `i` is complete.
fn peaks_unchecked(i: u64) -> Vec<u64> {
    let mut peaks = Vec::new();
    let mut remaining = u128::from(i) + 1;
    let mut offset: u128 = 0;

    while remaining != 0 {
        // `remaining + 1 >= 2`, so the log is at least 1.
        let highest_size = (1u128 << (remaining + 1).ilog2()) - 1;
        offset += highest_size;
        peaks.push((offset - 1) as u64);
        remaining -= highest_size;
    }

    peaks
}

/// Returns the peak indices of `MMR(i)`, tallest first.
///
/// Fails if `i` does not end a complete forest.
pub fn peaks(i: u64) -> MmrVerifyResult<Vec<u64>> {
    CompleteMmrIndex::new(i).map(|mmr| mmr.peaks())
}

/// Last node index of a forest known to be complete.
///
/// Holding one of these is the proof that the forest it describes is one an
/// append sequence can actually produce, so peak queries on it are total.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct CompleteMmrIndex(u64);

impl CompleteMmrIndex {
    /// Checks that `i` ends a complete forest.
    pub fn new(i: u64) -> MmrVerifyResult<Self> {
        if !is_complete(i) {
            return Err(MmrVerifyError::IncompleteMmr(i));
        }
        Ok(Self(i))
    }

    /// Returns the forest holding `leaves` leaves, or `None` if it is empty or
    /// does not fit the index space.
    pub fn from_leaf_count(leaves: u64) -> Option<Self> {
        if leaves == 0 {
            return None;
        }

        // Each leaf adds itself plus one parent per trailing one bit it
        // carries over, which sums to `2n - popcount(n)` nodes.
        let nodes = 2 * u128::from(leaves) - u128::from(leaves.count_ones());
        u64::try_from(nodes - 1).ok().map(Self)
    }

    /// Returns the last node index.
    pub fn index(&self) -> u64 {
        self.0
    }

    /// Returns the number of nodes in the forest.
    ///
    /// This is `u128` because the forest ending at `u64::MAX` has 2^64 nodes.
    pub fn num_nodes(&self) -> u128 {
        u128::from(self.0) + 1
    }

    /// Returns the peak indices, tallest first.
    pub fn peaks(&self) -> Vec<u64> {
        peaks_unchecked(self.0)
    }

    /// Returns the number of peaks, which is also the accumulator length.
    pub fn peak_count(&self) -> usize {
        self.leaf_count().count_ones() as usize
    }

    /// Returns the number of leaves in the forest.
    pub fn leaf_count(&self) -> u64 {
        self.peaks().iter().map(|p| 1u64 << index_height(*p)).sum()
    }

    /// Returns the peak whose subtree contains node `i`, if `i` is in the
    /// forest at all.
    pub fn peak_containing(&self, i: u64) -> Option<u64> {
        if i > self.0 {
            return None;
        }

        // Peak subtrees are laid out left to right, so the first peak at or
        // after `i` is the one covering it.
        self.peaks().into_iter().find(|p| *p >= i)
    }
}

impl TryFrom<u64> for CompleteMmrIndex {
    type Error = MmrVerifyError;

    fn try_from(i: u64) -> Result<Self, Self::Error> {
        Self::new(i)
    }
}

impl From<CompleteMmrIndex> for u64 {
    fn from(mmr: CompleteMmrIndex) -> Self {
        mmr.0
    }
}
