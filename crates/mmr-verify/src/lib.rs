//! Verification of Merkle mountain range receipts.
//!
//! An MMR here is a forest of perfect binary trees addressed by a single flat
//! index, every node numbered in the order appends create it.  Its state is
//! the accumulator: the peak hashes, tallest first.  This crate never holds a
//! tree, it only checks claims against hashes the caller already has.
//!
//! # Modules
//!
//! - `index`: node heights and peak positions from index arithmetic
//! - `hasher`: position-prefixed node hashing, generic over the digest
//! - `inclusion`: folding an inclusion proof into the root it implies
//! - `consistency`: folding a consistency proof into the newer state's roots
//! - `proof`: owned proof containers
//!
//! ```rust
//! use strata_mmr_verify::{Sha256PosHasher, included_root};
//!
//! // A lone leaf is its own peak, so the empty proof implies itself.
//! let leaf = [7u8; 32];
//! let root = included_root::<Sha256PosHasher>(0, &leaf, &[]).unwrap();
//! assert_eq!(root, leaf);
//! ```
//!
//! # Feature flags
//!
//! - `serde`, `borsh`: serialization for [`InclusionProof`] and
//!   [`ConsistencyProof`]
//! - `test-utils`: exposes `test_utils`, which builds canonical forests and
//!   their genuine proofs

// Dev-dependencies only some targets use.
#[cfg(test)]
use criterion as _;
#[cfg(all(test, not(feature = "serde")))]
use serde_json as _;

pub mod consistency;
pub mod error;
pub mod hasher;
pub mod inclusion;
pub mod index;
pub mod proof;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use hasher::DigestPosHasher;
use sha2::Sha256;

/// Position hasher for SHA-256, the reference deployment.
pub type Sha256PosHasher = DigestPosHasher<Sha256, 32>;

// Common re-exports for ergonomic access at the crate root.
pub use consistency::{consistent_roots, verify_consistent};
pub use error::{MmrVerifyError, MmrVerifyResult, VerifierInput};
pub use hasher::{MerkleHash, PosHasher, hash_pospair64};
pub use inclusion::{included_root, verify_included, verify_included_in_accumulator};
pub use index::{CompleteMmrIndex, Height, index_height, is_complete, log2floor, peaks};
pub use proof::{ConsistencyProof, InclusionProof};
