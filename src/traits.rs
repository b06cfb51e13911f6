//! Scoring seams consumed by the aligners.
//!
//! Two traits separate *what a column is worth* from *how the recurrence is
//! evaluated*:
//! - [`SubstitutionMatrix`] is the external provider: a plain lookup from a
//!   pair of ordinary symbols to a score. It may be partial (a PAM-style table
//!   that simply lacks some pairs).
//! - [`Scoring`] is the pairwise linear-gap model used by the global, local
//!   and linear-space aligners. It scores every column kind, including a
//!   symbol against [`GAP`].
//!
//! A `None` score means the column is forbidden. The recurrences treat it as
//! negative infinity, so a missing table entry removes a path instead of
//! silently scoring zero.

use crate::error::Result;
use crate::utils::check_symbols;

/// Gap symbol used in alignment output. Never valid in an input sequence.
pub const GAP: u8 = b'-';

/// External substitution-score provider (e.g. an amino-acid table).
pub trait SubstitutionMatrix {
    /// Score for aligning `a` (first sequence) against `b` (second sequence),
    /// or `None` if the table has no entry for the pair.
    fn lookup(&self, a: u8, b: u8) -> Option<i32>;

    /// Whether `symbol` belongs to the table's alphabet.
    fn contains(&self, symbol: u8) -> bool;
}

impl<M: SubstitutionMatrix + ?Sized> SubstitutionMatrix for &M {
    #[inline]
    fn lookup(&self, a: u8, b: u8) -> Option<i32> {
        (**self).lookup(a, b)
    }

    #[inline]
    fn contains(&self, symbol: u8) -> bool {
        (**self).contains(symbol)
    }
}

/// Pairwise scoring model with a per-column gap cost.
///
/// Contract:
/// - `score(a, b)` for two ordinary symbols is the substitution score;
/// - `score(a, GAP)` / `score(GAP, b)` is the (negative) cost of a gap column;
/// - `score(GAP, GAP)` is never requested by the aligners.
pub trait Scoring {
    /// Score of one alignment column, `None` if the column is forbidden.
    fn score(&self, a: u8, b: u8) -> Option<i32>;

    /// Whether `symbol` may appear in an input sequence.
    fn contains(&self, symbol: u8) -> bool;

    /// Reject a sequence containing a symbol outside the alphabet.
    ///
    /// `sequence` is the argument index reported in the error.
    fn check(&self, seq: &[u8], sequence: usize) -> Result<()> {
        check_symbols(seq, sequence, |s| self.contains(s))
    }
}

impl<S: Scoring + ?Sized> Scoring for &S {
    #[inline]
    fn score(&self, a: u8, b: u8) -> Option<i32> {
        (**self).score(a, b)
    }

    #[inline]
    fn contains(&self, symbol: u8) -> bool {
        (**self).contains(symbol)
    }
}
