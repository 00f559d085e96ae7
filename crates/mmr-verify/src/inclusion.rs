//! Inclusion proof verification.
//!
//! An inclusion proof is the list of sibling hashes from a node up to (but
//! not including) the peak that covers it, closest sibling first.  Folding
//! it yields the root it implies; whether that root is any good is decided
//! by comparing it against a trusted accumulator.

use tracing::*;

use crate::error::{MmrVerifyError, MmrVerifyResult, VerifierInput};
use crate::hasher::{MerkleHash, PosHasher};
use crate::index::{CompleteMmrIndex, index_height};

/// Applies `proof` to `nodehash`, the hash of node `i`, and returns the root
/// it implies.
///
/// An empty proof returns `nodehash` itself, which is right when `i` is a
/// peak.  A proof of the wrong length or content is not detected here, it
/// just implies a root nobody will recognize.
///
/// The only error is [`MmrVerifyError::PositionOverflow`], for a proof so long
/// that its parent positions would not fit in a `u64`.  No genuine proof can
/// get there.
pub fn included_root<PH: PosHasher>(
    i: u64,
    nodehash: &PH::Hash,
    proof: &[PH::Hash],
) -> MmrVerifyResult<PH::Hash> {
    let mut root = *nodehash;
    let mut i = i;
    let mut g = index_height(i);

    for sibling in proof {
        let overflow = MmrVerifyError::PositionOverflow {
            index: i,
            height: g,
        };

        // If the node after `i` is taller, `i` is a right child and that next
        // node is its parent.
        let next = i.checked_add(1).ok_or(overflow)?;
        if index_height(next) > g {
            i = next;
            let pos = i.checked_add(1).ok_or(overflow)?;
            root = PH::hash_pos_pair(pos, sibling, &root);
        } else {
            // Otherwise the parent comes after the whole right sibling
            // subtree.
            i = 1u64
                .checked_shl(u32::from(g) + 1)
                .and_then(|step| i.checked_add(step))
                .ok_or(overflow)?;
            let pos = i.checked_add(1).ok_or(overflow)?;
            root = PH::hash_pos_pair(pos, &root, sibling);
        }

        g += 1;
    }

    Ok(root)
}

/// Checks that `proof` takes `nodehash` at node `i` to the trusted `root`.
pub fn verify_included<PH: PosHasher>(
    i: u64,
    nodehash: &PH::Hash,
    proof: &[PH::Hash],
    root: &PH::Hash,
) -> MmrVerifyResult<bool> {
    let computed = included_root::<PH>(i, nodehash, proof)?;
    Ok(<PH::Hash as MerkleHash>::eq_ct(&computed, root))
}

/// Checks that `proof` takes `nodehash` at node `i` to the peak of `mmr`
/// covering `i`, given the forest's full accumulator.
pub fn verify_included_in_accumulator<PH: PosHasher>(
    mmr: CompleteMmrIndex,
    accumulator: &[PH::Hash],
    i: u64,
    nodehash: &PH::Hash,
    proof: &[PH::Hash],
) -> MmrVerifyResult<bool> {
    let peaks = mmr.peaks();
    if accumulator.len() != peaks.len() {
        debug!(
            mmr = mmr.index(),
            expected = peaks.len(),
            found = accumulator.len(),
            "accumulator does not match peaks"
        );
        return Err(MmrVerifyError::LengthMismatch {
            input: VerifierInput::Accumulator,
            expected: peaks.len(),
            found: accumulator.len(),
        });
    }

    let Some(k) = peaks.iter().position(|p| *p >= i) else {
        debug!(%i, mmr = mmr.index(), "node not in mmr");
        return Err(MmrVerifyError::IndexOutOfRange {
            index: i,
            last: mmr.index(),
        });
    };

    verify_included::<PH>(i, nodehash, proof, &accumulator[k])
}
