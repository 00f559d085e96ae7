//! Position-prefixed node hashing.
//!
//! An interior node at 1-based position `pos` commits to
//! `H(be64(pos) || left || right)`.  The position prefix is the only thing
//! keeping two nodes with the same children but different positions apart,
//! so it must never be dropped.

use std::marker::PhantomData;

use digest::Digest;

/// Hash wrapper trait used by the verifiers.
pub trait MerkleHash: Copy + Clone + 'static {
    /// Length of the hash in bytes.
    const HASH_LEN: usize;

    /// Returns a zero hash.
    fn zero() -> Self;

    /// Checks if two hashes are equal, attempting to do it in constant time.
    fn eq_ct(a: &Self, b: &Self) -> bool;
}

impl<const LEN: usize> MerkleHash for [u8; LEN] {
    const HASH_LEN: usize = LEN;

    fn zero() -> Self {
        [0; LEN]
    }

    fn eq_ct(a: &Self, b: &Self) -> bool {
        // Fold every byte in so the loop can't exit at the first difference.
        // This only guards comparisons against roots the verifier already
        // trusts, so we don't pull in a dedicated crate for it.
        let mut acc: u8 = 0;
        for i in 0..LEN {
            acc |= a[i] ^ b[i];
        }

        acc == 0
    }
}

/// Strategy for combining two child hashes into their parent.
///
/// Implementations fix the hash algorithm for a whole forest.  Everything
/// that folds proofs is generic over this, so switching algorithms never
/// touches the folding logic.
pub trait PosHasher {
    /// Hash value.
    type Hash: MerkleHash;

    /// Computes the hash of the node at 1-based position `pos` from its left
    /// and right children.
    fn hash_pos_pair(pos: u64, left: &Self::Hash, right: &Self::Hash) -> Self::Hash;
}

/// Position-prefixed hasher over an arbitrary [`Digest`] impl with an `N`
/// byte output.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DigestPosHasher<D: Digest, const N: usize>(PhantomData<D>);

impl<D: Digest, const N: usize> PosHasher for DigestPosHasher<D, N> {
    type Hash = [u8; N];

    fn hash_pos_pair(pos: u64, left: &Self::Hash, right: &Self::Hash) -> Self::Hash {
        let mut context = D::new();
        context.update(pos.to_be_bytes());
        context.update(left);
        context.update(right);

        let result = context.finalize();
        result
            .as_slice()
            .try_into()
            .expect("mmr: digest output length mismatch")
    }
}

/// Computes `H(be64(pos) || a || b)` with the hasher `PH`.
pub fn hash_pospair64<PH: PosHasher>(pos: u64, a: &PH::Hash, b: &PH::Hash) -> PH::Hash {
    PH::hash_pos_pair(pos, a, b)
}
