//! Error taxonomy shared by every aligner.
//!
//! Structural and parameter problems are reported before any matrix is
//! allocated. Reachability problems ([`AlignError::NoAlignmentPossible`]) can
//! only be known once a fill has completed.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AlignError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignError {
    /// An input symbol is not part of the scoring model's alphabet.
    #[error("symbol {symbol:?} at position {position} of sequence {sequence} is not in the scoring alphabet")]
    InvalidAlphabet {
        /// Index of the offending sequence (0 = first argument).
        sequence: usize,
        /// Offset of the symbol inside that sequence.
        position: usize,
        symbol: char,
    },

    /// A produced alignment contains a pair the scoring model has no entry for.
    #[error("no substitution score for the pair ({a:?}, {b:?})")]
    MissingSubstitutionEntry { a: char, b: char },

    /// Every path into the terminal cell uses a forbidden substitution.
    #[error("no alignment possible: the terminal cell is unreachable")]
    NoAlignmentPossible,

    /// Multi-sequence alignment was called with too few sequences.
    #[error("expected at least {expected_at_least} sequences, found {found}")]
    DimensionMismatch {
        expected_at_least: usize,
        found: usize,
    },

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

impl AlignError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        AlignError::InvalidParameters(msg.into())
    }
}
