//! Linear-space global alignment (Hirschberg).
//!
//! The engine works in two steps per interval:
//! 1. Two linear-space score passes over the halves of the row range, one
//!    forward from the top and one backward from the bottom, pick the column
//!    where an optimal path crosses the middle row.
//! 2. Recursion on the two sub-rectangles on either side of that crossing.
//!
//! Intervals are index ranges into the caller's buffers; nothing is copied
//! or reversed. Only single score rows are alive during a pass, and the
//! quadratic aligner runs only on intervals one row or one column wide.
//!
//! Rows are split along the longer input, so every score row spans the
//! shorter one. When `v` is the shorter input the engine runs on the
//! transposed problem and swaps the two output rows back.

use std::ops::Range;

use crate::error::{AlignError, Result};
use crate::matrix::{pad_with_gaps, PairwiseAlignment};
use crate::pairwise::global::{last_row, Direction, NeedlemanWunsch};
use crate::traits::Scoring;
use crate::utils::{check_score_range, rescore};
#[cfg(feature = "parallel")]
use rayon::join;

/// Scoring models the engine can drive.
///
/// The model must be `Sync` whether or not the `parallel` feature is on, so
/// enabling the feature never changes which models are accepted.
///
/// ```compile_fail
/// use std::rc::Rc;
/// use align_dp::{align_linear_space, Alphabet, FnMatrix, LinearGap};
///
/// let weight = Rc::new(1);
/// let matrix = FnMatrix::new(Alphabet::dna(), move |a, b| if a == b { *weight } else { -*weight });
/// let scoring = LinearGap::with_matrix(matrix, 1).unwrap();
/// align_linear_space(b"ACGT", b"AGT", &scoring).unwrap();
/// ```
pub trait EngineScoring: Scoring + Sync {}

impl<T: Scoring + Sync + ?Sized> EngineScoring for T {}

/// `scoring` with the roles of the two inputs exchanged.
struct Transposed<'a, S: ?Sized>(&'a S);

impl<S: Scoring + ?Sized> Scoring for Transposed<'_, S> {
    #[inline]
    fn score(&self, a: u8, b: u8) -> Option<i32> {
        self.0.score(b, a)
    }

    #[inline]
    fn contains(&self, symbol: u8) -> bool {
        self.0.contains(symbol)
    }
}

type Rows = (Vec<u8>, Vec<u8>);

/// Divide-and-conquer global aligner using O(n + m) working memory.
///
/// ```
/// use align_dp::{HirschbergAligner, ScoringBuilder};
///
/// let scoring = ScoringBuilder::new().linear().unwrap();
/// let aln = HirschbergAligner::new(b"GATTACA", b"GCATGCT", &scoring).run().unwrap();
/// assert_eq!(aln.score, 0);
/// assert_eq!(aln.first.len(), aln.second.len());
/// ```
pub struct HirschbergAligner<'a, S: ?Sized> {
    v: &'a [u8],
    w: &'a [u8],
    scoring: &'a S,
}

impl<'a, S: EngineScoring + ?Sized> HirschbergAligner<'a, S> {
    /// Inputs are assumed to be checked against the scoring alphabet and the
    /// `i32` score range.
    pub fn new(v: &'a [u8], w: &'a [u8], scoring: &'a S) -> Self {
        Self { v, w, scoring }
    }

    /// Optimal global alignment; the score is the sum of its column scores.
    pub fn run(&self) -> Result<PairwiseAlignment> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("hirschberg", n = self.v.len(), m = self.w.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let (first, second) = if self.v.len() < self.w.len() {
            let flipped = Transposed(self.scoring);
            let engine = HirschbergAligner::new(self.w, self.v, &flipped);
            let (second, first) = engine.solve(0..self.w.len(), 0..self.v.len())?;
            (first, second)
        } else {
            self.solve(0..self.v.len(), 0..self.w.len())?
        };
        // Only a top-level empty side can yield a gap run the model forbids.
        let score = rescore(&first, &second, self.scoring).map_err(|e| match e {
            AlignError::MissingSubstitutionEntry { .. } => AlignError::NoAlignmentPossible,
            other => other,
        })?;
        Ok(PairwiseAlignment {
            first,
            second,
            score,
            first_range: 0..self.v.len(),
            second_range: 0..self.w.len(),
        })
    }

    fn solve(&self, rows: Range<usize>, cols: Range<usize>) -> Result<Rows> {
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!(
            "interval",
            row_start = rows.start,
            row_end = rows.end,
            col_start = cols.start,
            col_end = cols.end
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let (v, w) = (&self.v[rows.clone()], &self.w[cols.clone()]);
        if v.is_empty() || w.is_empty() {
            return Ok(pad_with_gaps(v, w));
        }
        if v.len() == 1 || w.len() == 1 {
            let aln = NeedlemanWunsch::new(v, w, self.scoring).align()?;
            return Ok((aln.first, aln.second));
        }

        let mid = rows.start + rows.len() / 2;
        let split = self.split_column(rows.start..mid, mid..rows.end, cols.clone())?;

        #[cfg(feature = "tracing")]
        tracing::debug!(row = mid, col = split, "split");

        let ((mut first, mut second), (tail_first, tail_second)) =
            recurse_halves(self, rows.start..mid, mid..rows.end, cols.start..split, split..cols.end)?;
        first.extend(tail_first);
        second.extend(tail_second);
        Ok((first, second))
    }

    /// Column where an optimal path through `upper ++ lower` x `cols` crosses
    /// from the upper half into the lower one. First maximum wins.
    pub(crate) fn split_column(
        &self,
        upper: Range<usize>,
        lower: Range<usize>,
        cols: Range<usize>,
    ) -> Result<usize> {
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("choose_split", upper = ?upper, lower = ?lower);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let w = &self.w[cols.clone()];
        let (fwd, bwd) = score_rows_pair(&self.v[upper], &self.v[lower], w, self.scoring);

        let width = w.len();
        let mut best: Option<(i32, usize)> = None;
        for (j, head) in fwd.iter().enumerate() {
            let total = match (head, bwd[width - j]) {
                (Some(a), Some(b)) => a + b,
                _ => continue,
            };
            if best.map_or(true, |(score, _)| total > score) {
                best = Some((total, j));
            }
        }

        best.map(|(_, j)| cols.start + j)
            .ok_or(AlignError::NoAlignmentPossible)
    }
}

fn score_pass<S: Scoring + ?Sized>(
    v: &[u8],
    w: &[u8],
    scoring: &S,
    dir: Direction,
) -> Vec<Option<i32>> {
    #[cfg(feature = "tracing")]
    let span = tracing::trace_span!("score_pass", dir = ?dir, rows = v.len(), cols = w.len());
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    last_row(v, w, scoring, dir)
}

#[cfg(feature = "parallel")]
fn score_rows_pair<S: EngineScoring + ?Sized>(
    upper: &[u8],
    lower: &[u8],
    w: &[u8],
    scoring: &S,
) -> (Vec<Option<i32>>, Vec<Option<i32>>) {
    join(
        || score_pass(upper, w, scoring, Direction::Forward),
        || score_pass(lower, w, scoring, Direction::Reverse),
    )
}

#[cfg(not(feature = "parallel"))]
fn score_rows_pair<S: EngineScoring + ?Sized>(
    upper: &[u8],
    lower: &[u8],
    w: &[u8],
    scoring: &S,
) -> (Vec<Option<i32>>, Vec<Option<i32>>) {
    (
        score_pass(upper, w, scoring, Direction::Forward),
        score_pass(lower, w, scoring, Direction::Reverse),
    )
}

#[cfg(feature = "parallel")]
fn recurse_halves<S: EngineScoring + ?Sized>(
    engine: &HirschbergAligner<'_, S>,
    upper: Range<usize>,
    lower: Range<usize>,
    left: Range<usize>,
    right: Range<usize>,
) -> Result<(Rows, Rows)> {
    let (head, tail) = join(|| engine.solve(upper, left), || engine.solve(lower, right));
    Ok((head?, tail?))
}

#[cfg(not(feature = "parallel"))]
fn recurse_halves<S: EngineScoring + ?Sized>(
    engine: &HirschbergAligner<'_, S>,
    upper: Range<usize>,
    lower: Range<usize>,
    left: Range<usize>,
    right: Range<usize>,
) -> Result<(Rows, Rows)> {
    Ok((engine.solve(upper, left)?, engine.solve(lower, right)?))
}

/// Validate both inputs, then run [`HirschbergAligner`].
pub fn align<S: EngineScoring + ?Sized>(
    v: &[u8],
    w: &[u8],
    scoring: &S,
) -> Result<PairwiseAlignment> {
    scoring.check(v, 0)?;
    scoring.check(w, 1)?;
    check_score_range(v, w, |a, b| scoring.score(a, b))?;
    HirschbergAligner::new(v, w, scoring).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ScoringBuilder;
    use crate::pairwise::global;
    use crate::scoring::{FnMatrix, LinearGap, MatchMismatch, SubstitutionTable};
    use crate::utils::strip_gaps;

    fn accepts<S: EngineScoring + ?Sized>() {}

    #[test]
    fn matches_quadratic_score_on_reference_pair() {
        let s = ScoringBuilder::new().linear().unwrap();
        let v = b"GCCCAGTCTATGTCAGGGGGCACGAGCATGCACA";
        let w = b"GCCGCCGTCGTTTTCAGCAGTTATGTTCAGAT";
        let aln = align(v, w, &s).unwrap();
        assert_eq!(aln.score, 5);
        assert_eq!(aln.score, global::align(v, w, &s).unwrap().score);
        assert_eq!(strip_gaps(&aln.first), v);
        assert_eq!(strip_gaps(&aln.second), w);
    }

    #[test]
    fn base_cases() {
        let s = ScoringBuilder::new().linear().unwrap();

        let aln = align(b"", b"ACG", &s).unwrap();
        assert_eq!(aln.to_strings(), ("---".into(), "ACG".into()));
        assert_eq!(aln.score, -3);

        let aln = align(b"A", b"TTAT", &s).unwrap();
        assert_eq!(aln.score, global::align(b"A", b"TTAT", &s).unwrap().score);

        let aln = align(b"", b"", &s).unwrap();
        assert!(aln.is_empty());
        assert_eq!(aln.score, 0);
    }

    #[test]
    fn split_column_is_the_first_maximum() {
        let s = ScoringBuilder::new().linear().unwrap();
        // "AA" vs "AA": the only optimal path crosses row 1 at column 1.
        let engine = HirschbergAligner::new(b"AA", b"AA", &s);
        assert_eq!(engine.split_column(0..1, 1..2, 0..2).unwrap(), 1);

        // "AC" vs "CA" ties at columns 0 and 2 (score -1); 0 is taken first.
        let engine = HirschbergAligner::new(b"AC", b"CA", &s);
        assert_eq!(engine.split_column(0..1, 1..2, 0..2).unwrap(), 0);
    }

    #[test]
    fn split_column_respects_sub_ranges() {
        let s = ScoringBuilder::new().linear().unwrap();
        let engine = HirschbergAligner::new(b"GGACGT", b"TTACGTT", &s);
        let col = engine.split_column(2..4, 4..6, 2..6).unwrap();
        assert!((2..=6).contains(&col));
        assert_eq!(col, 4);
    }

    #[test]
    fn engine_bound_is_the_same_in_every_build() {
        accepts::<LinearGap<MatchMismatch>>();
        accepts::<LinearGap<FnMatrix<fn(u8, u8) -> i32>>>();
        accepts::<LinearGap<&SubstitutionTable>>();
        accepts::<dyn Scoring + Sync>();
    }

    #[test]
    fn shorter_first_input_is_transposed_back() {
        // Asymmetric table: (A, C) scores, (C, A) has no entry.
        let table = SubstitutionTable::from_entries([
            ((b'A', b'A'), 1),
            ((b'C', b'C'), 1),
            ((b'A', b'C'), 4),
        ])
        .unwrap();
        let s = LinearGap::with_matrix(table, 1).unwrap();
        for (v, w) in [
            (&b"AA"[..], &b"CCCCC"[..]),
            (&b"CA"[..], &b"ACCAC"[..]),
            (&b"ACA"[..], &b"CACCCA"[..]),
        ] {
            let aln = align(v, w, &s).unwrap();
            assert_eq!(strip_gaps(&aln.first), v);
            assert_eq!(strip_gaps(&aln.second), w);
            assert_eq!(aln.score, global::align(v, w, &s).unwrap().score);
            assert_eq!(rescore(&aln.first, &aln.second, &s), Ok(aln.score));
        }
    }

    #[test]
    fn transposed_score_rows_span_the_shorter_input() {
        let s = ScoringBuilder::new().linear().unwrap();
        let flipped = Transposed(&s);
        let engine = HirschbergAligner::new(b"TTACGTT", b"ACG", &flipped);
        assert_eq!(engine.split_column(0..3, 3..7, 0..3).unwrap(), 1);
        let (second, first) = engine.solve(0..7, 0..3).unwrap();
        assert_eq!(strip_gaps(&first), b"ACG");
        assert_eq!(strip_gaps(&second), b"TTACGTT");
        assert_eq!(rescore(&first, &second, &s), Ok(-1));
    }

    #[test]
    fn scores_beyond_i32_are_rejected_up_front() {
        let s = ScoringBuilder::new().gap_penalty(1_000_000).linear().unwrap();
        let long = vec![b'C'; 2200];
        assert!(matches!(
            align(b"", &long, &s),
            Err(AlignError::InvalidParameters(_))
        ));
        assert_eq!(align(b"", &long[..2000], &s).unwrap().score, -2_000_000_000);
    }
}
