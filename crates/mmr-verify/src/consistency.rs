//! Consistency proof verification.
//!
//! A consistency proof from `MMR(ifrom)` to a later state is one inclusion
//! proof per old peak.  Folding each old peak up its path gives the new peaks
//! that cover it, which must be a prefix of the later accumulator.

use tracing::*;

use crate::error::{MmrVerifyError, MmrVerifyResult, VerifierInput};
use crate::hasher::{MerkleHash, PosHasher};
use crate::inclusion::included_root;
use crate::index::CompleteMmrIndex;

fn check_len(input: VerifierInput, expected: usize, found: usize) -> MmrVerifyResult<()> {
    if expected != found {
        debug!(%input, %expected, %found, "rejecting consistency input");
        return Err(MmrVerifyError::LengthMismatch {
            input,
            expected,
            found,
        });
    }
    Ok(())
}

/// Applies one inclusion proof per peak of `MMR(ifrom)` and returns the roots
/// they imply, tallest first.
///
/// Consecutive old peaks that have since merged under the same new peak fold
/// to the same root, so a root equal to the one before it is dropped.  Only
/// neighbours are compared.
///
/// Both `accumulatorfrom` and `proofs` must have exactly one entry per peak
/// of `MMR(ifrom)`, otherwise this fails before hashing anything.
pub fn consistent_roots<PH, P>(
    ifrom: u64,
    accumulatorfrom: &[PH::Hash],
    proofs: &[P],
) -> MmrVerifyResult<Vec<PH::Hash>>
where
    PH: PosHasher,
    P: AsRef<[PH::Hash]>,
{
    let from = CompleteMmrIndex::new(ifrom).inspect_err(|_| {
        debug!(%ifrom, "consistency from incomplete mmr");
    })?;
    let frompeaks = from.peaks();

    check_len(VerifierInput::Accumulator, frompeaks.len(), accumulatorfrom.len())?;
    check_len(VerifierInput::Proofs, frompeaks.len(), proofs.len())?;

    let mut roots: Vec<PH::Hash> = Vec::with_capacity(frompeaks.len());
    for ((peak, peakhash), proof) in frompeaks.iter().zip(accumulatorfrom).zip(proofs) {
        let root = included_root::<PH>(*peak, peakhash, proof.as_ref())?;

        if roots
            .last()
            .is_some_and(|prev| <PH::Hash as MerkleHash>::eq_ct(prev, &root))
        {
            trace!(%peak, "old peak merged into previous root");
            continue;
        }

        trace!(%peak, path_len = proof.as_ref().len(), "old peak folded");
        roots.push(root);
    }

    Ok(roots)
}

/// Checks that `proofs` show `MMR(ito)`, with peaks `accumulatorto`, is an
/// extension of `MMR(ifrom)`, with peaks `accumulatorfrom`.
///
/// Returns `Ok(false)` when the proofs are well formed but imply roots that
/// are not a prefix of `accumulatorto`.
pub fn verify_consistent<PH, P>(
    ifrom: u64,
    accumulatorfrom: &[PH::Hash],
    proofs: &[P],
    ito: u64,
    accumulatorto: &[PH::Hash],
) -> MmrVerifyResult<bool>
where
    PH: PosHasher,
    P: AsRef<[PH::Hash]>,
{
    if ito < ifrom {
        debug!(%ifrom, %ito, "consistency to smaller mmr");
        return Err(MmrVerifyError::SizeRegression {
            from: ifrom,
            to: ito,
        });
    }

    let to = CompleteMmrIndex::new(ito)?;
    check_len(
        VerifierInput::TargetAccumulator,
        to.peak_count(),
        accumulatorto.len(),
    )?;

    let roots = consistent_roots::<PH, P>(ifrom, accumulatorfrom, proofs)?;
    if roots.len() > accumulatorto.len() {
        return Ok(false);
    }

    Ok(roots
        .iter()
        .zip(accumulatorto)
        .all(|(a, b)| <PH::Hash as MerkleHash>::eq_ct(a, b)))
}
