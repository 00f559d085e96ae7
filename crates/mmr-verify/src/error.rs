//! Error types for MMR proof verification.
//!
//! Only violated preconditions are reported here.  A proof that is merely
//! wrong produces a root that does not match, which is for the caller to
//! compare.
use std::fmt;

use thiserror::Error;

/// Identifies which caller-supplied sequence failed a length check.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum VerifierInput {
    /// Peak digests of the older forest.
    Accumulator,

    /// One inclusion path per older peak.
    Proofs,

    /// Peak digests of the newer forest.
    TargetAccumulator,
}

impl fmt::Display for VerifierInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Accumulator => "accumulator",
            Self::Proofs => "proofs",
            Self::TargetAccumulator => "target accumulator",
        };
        f.write_str(s)
    }
}

/// Errors that can occur when verifying MMR proofs.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum MmrVerifyError {
    /// `log2floor` was asked for the logarithm of zero.
    #[error("log2 of zero is undefined")]
    ZeroLog2,

    /// The index does not name the last node of a complete forest.
    #[error("mmr index {0} does not end a complete mmr")]
    IncompleteMmr(u64),

    /// A sequence did not have one entry per peak.
    #[error("{input} length mismatch (expected {expected}, found {found})")]
    LengthMismatch {
        /// The offending input.
        input: VerifierInput,
        /// Number of peaks of the forest.
        expected: usize,
        /// Number of entries provided.
        found: usize,
    },

    /// A node index lies past the last node of the forest.
    #[error("index {index} is past the last mmr index {last}")]
    IndexOutOfRange {
        /// The requested node index.
        index: u64,
        /// The last node index of the forest.
        last: u64,
    },

    /// The newer forest is smaller than the older one.
    #[error("mmr cannot shrink (from {from}, to {to})")]
    SizeRegression {
        /// Last index of the older forest.
        from: u64,
        /// Last index of the newer forest.
        to: u64,
    },

    /// Folding a proof walked past the 64-bit position space.
    #[error("node position overflowed (index {index}, height {height})")]
    PositionOverflow {
        /// Index reached before the overflow.
        index: u64,
        /// Height reached before the overflow.
        height: u8,
    },
}

/// Wrapper result type.
pub type MmrVerifyResult<T> = Result<T, MmrVerifyError>;
