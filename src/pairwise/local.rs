//! Smith–Waterman local alignment.
//!
//! Same recurrence as the global aligner with every cell floored at zero. A
//! zero cell is a traceback origin ([`Move::Stop`]). The best cell is carried
//! through the fill as explicit state; the first maximum in row-major order
//! wins, and the traceback stops at (and excludes) the first zero cell.

use crate::error::Result;
use crate::matrix::{best_move, extend, traceback, DpMatrix, Move, PairwiseAlignment};
use crate::traits::{Scoring, GAP};
use crate::utils::check_score_range;

/// Highest-scoring cell seen during a local fill.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BestCell {
    pub score: i32,
    pub row: usize,
    pub col: usize,
}

impl BestCell {
    #[inline]
    fn offer(&mut self, score: i32, row: usize, col: usize) {
        if score > self.score {
            *self = BestCell { score, row, col };
        }
    }
}

#[derive(Clone)]
pub struct SmithWaterman<'a, S: ?Sized> {
    pub v: &'a [u8],
    pub w: &'a [u8],
    pub scoring: &'a S,
}

impl<'a, S: Scoring + ?Sized> SmithWaterman<'a, S> {
    pub fn new(v: &'a [u8], w: &'a [u8], scoring: &'a S) -> Self {
        Self { v, w, scoring }
    }

    /// Score matrix, backtrack matrix and the best cell.
    pub fn fill(&self) -> (DpMatrix<i32>, DpMatrix<Move>, BestCell) {
        let (n, m) = (self.v.len(), self.w.len());
        let mut s = DpMatrix::new(n + 1, m + 1, 0i32);
        let mut moves = DpMatrix::new(n + 1, m + 1, Move::Stop);
        let mut best = BestCell::default();

        for i in 1..=n {
            let a = self.v[i - 1];
            let up_cost = self.scoring.score(a, GAP);
            for j in 1..=m {
                let b = self.w[j - 1];
                let diag = extend(Some(s[(i - 1, j - 1)]), self.scoring.score(a, b));
                let up = extend(Some(s[(i - 1, j)]), up_cost);
                let left = extend(Some(s[(i, j - 1)]), self.scoring.score(GAP, b));
                match best_move(diag, up, left) {
                    (Some(score), mv) if score > 0 => {
                        s[(i, j)] = score;
                        moves[(i, j)] = mv;
                        best.offer(score, i, j);
                    }
                    _ => {}
                }
            }
        }

        (s, moves, best)
    }

    pub fn align(&self) -> PairwiseAlignment {
        let (_, moves, best) = self.fill();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            score = best.score,
            row = best.row,
            col = best.col,
            "local alignment best cell"
        );

        let (first, second, (i0, j0)) = traceback(&moves, self.v, self.w, (best.row, best.col));
        PairwiseAlignment {
            first,
            second,
            score: best.score,
            first_range: i0..best.row,
            second_range: j0..best.col,
        }
    }
}

/// Validate both inputs, then run [`SmithWaterman`].
///
/// Never fails on reachability: the empty alignment with score 0 is always
/// available.
pub fn align<S: Scoring + ?Sized>(v: &[u8], w: &[u8], scoring: &S) -> Result<PairwiseAlignment> {
    scoring.check(v, 0)?;
    scoring.check(w, 1)?;
    check_score_range(v, w, |a, b| scoring.score(a, b))?;

    #[cfg(feature = "tracing")]
    let span = tracing::info_span!("align_local", n = v.len(), m = w.len());
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    Ok(SmithWaterman::new(v, w, scoring).align())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ScoringBuilder;

    #[test]
    fn finds_the_shared_core() {
        let s = ScoringBuilder::new().linear().unwrap();
        let aln = align(b"TTTACGTTT", b"GGACGGG", &s).unwrap();
        assert_eq!(aln.score, 3);
        assert_eq!(aln.first, b"ACG");
        assert_eq!(aln.second, b"ACG");
        assert_eq!(aln.first_range, 3..6);
        assert_eq!(aln.second_range, 2..5);
    }

    #[test]
    fn first_maximum_in_fill_order_wins() {
        // "A" occurs twice in w; both cells score 1, the earlier column wins.
        let s = ScoringBuilder::new().linear().unwrap();
        let aln = align(b"A", b"CACA", &s).unwrap();
        assert_eq!(aln.score, 1);
        assert_eq!(aln.second_range, 1..2);
    }

    #[test]
    fn dissimilar_or_empty_inputs_score_zero() {
        let s = ScoringBuilder::new().linear().unwrap();
        for (v, w) in [
            (&b"AAAA"[..], &b"CCCC"[..]),
            (&b""[..], &b"ACGT"[..]),
            (&b""[..], &b""[..]),
        ] {
            let aln = align(v, w, &s).unwrap();
            assert_eq!(aln.score, 0);
            assert!(aln.is_empty());
        }
    }

    #[test]
    fn zero_cells_are_stops() {
        let s = ScoringBuilder::new().linear().unwrap();
        let (scores, moves, _) = SmithWaterman::new(b"AC", b"GA", &s).fill();
        for i in 0..scores.rows() {
            for j in 0..scores.cols() {
                assert!(scores[(i, j)] >= 0);
                if scores[(i, j)] == 0 {
                    assert_eq!(moves[(i, j)], Move::Stop);
                }
            }
        }
    }
}
