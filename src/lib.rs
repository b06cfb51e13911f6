//! Exact dynamic-programming sequence alignment.
//!
//! This crate computes optimal alignments of byte sequences under explicit
//! scoring models:
//! - global alignment with a linear gap model (Needleman–Wunsch),
//! - local alignment with a linear gap model (Smith–Waterman),
//! - global alignment with affine gap costs (Gotoh),
//! - global alignment in linear space (Hirschberg),
//! - simultaneous alignment of a few sequences under an entropy column score.
//!
//! ## Core idea
//! 1. Build a scoring model, usually with [`ScoringBuilder`], or wrap an
//!    external [`SubstitutionMatrix`] in [`LinearGap`] / [`AffineGap`].
//! 2. Call one of the `align_*` entry points. Inputs are checked against the
//!    model's alphabet before any matrix is allocated.
//! 3. Read the gapped rows and the score off the result.
//!
//! A substitution pair the model has no entry for is a forbidden column, not
//! a zero score: the aligners route around it, and report
//! [`AlignError::NoAlignmentPossible`] if nothing else is left.
//!
//! ## Quick start
//! ```
//! use align_dp::{align_global, align_linear_space, ScoringBuilder};
//!
//! let scoring = ScoringBuilder::new().linear().unwrap();
//! let aln = align_global(b"GATTACA", b"GCATGCT", &scoring).unwrap();
//! assert_eq!(aln.score, 0);
//! assert_eq!(aln.to_strings(), ("G-ATTACA".into(), "GCA-TGCT".into()));
//!
//! let lin = align_linear_space(b"GATTACA", b"GCATGCT", &scoring).unwrap();
//! assert_eq!(lin.score, aln.score);
//! ```
//!
//! ## Features
//! - `parallel`: the linear-space engine scores and recurses on both halves
//!   of each split with `rayon::join`. Results are identical.
//! - `tracing`: spans around each alignment call and recursion interval.

pub mod builder;
pub mod engine;
pub mod error;
pub mod matrix;
pub mod msa;
pub mod pairwise;
pub mod scoring;
pub mod traits;
pub mod utils;

pub use crate::builder::ScoringBuilder;
pub use crate::engine::{EngineScoring, HirschbergAligner};
pub use crate::error::{AlignError, Result};
pub use crate::matrix::{DpMatrix, Move, PairwiseAlignment};
pub use crate::msa::{MultiAligner, MultipleAlignment, MAX_SEQUENCES};
pub use crate::pairwise::affine::Gotoh;
pub use crate::pairwise::global::NeedlemanWunsch;
pub use crate::pairwise::local::SmithWaterman;
pub use crate::scoring::{
    AffineGap, Alphabet, EntropyScoring, FnMatrix, LinearGap, MatchMismatch, SubstitutionTable,
};
pub use crate::traits::{Scoring, SubstitutionMatrix, GAP};
pub use crate::utils::{rescore, rescore_affine, strip_gaps};

/// Optimal global alignment of `v` and `w`.
pub fn align_global<S: Scoring + ?Sized>(
    v: &[u8],
    w: &[u8],
    scoring: &S,
) -> Result<PairwiseAlignment> {
    pairwise::global::align(v, w, scoring)
}

/// Highest-scoring alignment between a substring of `v` and one of `w`.
///
/// The result's `first_range` and `second_range` locate the substrings.
pub fn align_local<S: Scoring + ?Sized>(
    v: &[u8],
    w: &[u8],
    scoring: &S,
) -> Result<PairwiseAlignment> {
    pairwise::local::align(v, w, scoring)
}

/// Global affine-gap alignment of two DNA sequences: +1 per match,
/// `-mismatch_penalty` per mismatch, `-(gap_open + (k - 1) * gap_extend)`
/// per gap run of length `k`.
///
/// ```
/// let aln = align_dp::align_affine(b"ACGTTTTACG", b"ACGACG", 1, 3, 1).unwrap();
/// assert_eq!(aln.score, 0);
/// assert_eq!(aln.second, b"ACG----ACG");
/// ```
pub fn align_affine(
    v: &[u8],
    w: &[u8],
    mismatch_penalty: i32,
    gap_open: i32,
    gap_extend: i32,
) -> Result<PairwiseAlignment> {
    let scoring = ScoringBuilder::new()
        .mismatch_penalty(mismatch_penalty)
        .affine(gap_open, gap_extend)?;
    pairwise::affine::align(v, w, &scoring)
}

/// Global affine-gap alignment under any substitution matrix.
pub fn align_affine_with<M: SubstitutionMatrix>(
    v: &[u8],
    w: &[u8],
    scoring: &AffineGap<M>,
) -> Result<PairwiseAlignment> {
    pairwise::affine::align(v, w, scoring)
}

/// Global alignment in O(n + m) working memory.
///
/// Scores equal [`align_global`]'s; among equally good alignments the one
/// returned may differ.
pub fn align_linear_space<S: EngineScoring + ?Sized>(
    v: &[u8],
    w: &[u8],
    scoring: &S,
) -> Result<PairwiseAlignment> {
    engine::align(v, w, scoring)
}

/// Simultaneous alignment of two or more sequences under the entropy column
/// score with gap penalty `p_gap`.
///
/// ```
/// let aln = align_dp::align_multi(&["ACGT", "AGT", "ACT"], 1.0).unwrap();
/// assert_eq!(aln.to_strings(), ["ACGT", "A-GT", "AC-T"]);
/// ```
pub fn align_multi<S: AsRef<[u8]>>(sequences: &[S], p_gap: f64) -> Result<MultipleAlignment> {
    let scoring = EntropyScoring::new(p_gap)?;
    msa::align(sequences, &scoring)
}
