//! Needleman–Wunsch global alignment with a linear gap model.
//!
//! `s[i][j]` is the best score of aligning `v[..i]` with `w[..j]`:
//!
//! ```text
//! s[i][j] = max(s[i-1][j-1] + score(v[i-1], w[j-1]),
//!               s[i-1][j]   + score(v[i-1], '-'),
//!               s[i][j-1]   + score('-',    w[j-1]))
//! ```
//!
//! Row and column 0 hold cumulative gap costs. Ties are broken Diagonal,
//! then Up, then Left, which fixes the returned alignment among equal-score
//! optima.

use crate::error::{AlignError, Result};
use crate::matrix::{best_move, extend, traceback, DpMatrix, Move, PairwiseAlignment};
use crate::traits::{Scoring, GAP};
use crate::utils::check_score_range;

#[derive(Clone)]
pub struct NeedlemanWunsch<'a, S: ?Sized> {
    pub v: &'a [u8],
    pub w: &'a [u8],
    pub scoring: &'a S,
}

impl<'a, S: Scoring + ?Sized> NeedlemanWunsch<'a, S> {
    pub fn new(v: &'a [u8], w: &'a [u8], scoring: &'a S) -> Self {
        Self { v, w, scoring }
    }

    fn n(&self) -> usize {
        self.v.len()
    }

    fn m(&self) -> usize {
        self.w.len()
    }

    /// Full score matrix and backtrack matrix.
    pub fn fill(&self) -> (DpMatrix<Option<i32>>, DpMatrix<Move>) {
        let (n, m) = (self.n(), self.m());
        let mut s = DpMatrix::new(n + 1, m + 1, None);
        let mut moves = DpMatrix::new(n + 1, m + 1, Move::Stop);

        s[(0, 0)] = Some(0);
        for i in 1..=n {
            s[(i, 0)] = extend(s[(i - 1, 0)], self.scoring.score(self.v[i - 1], GAP));
            moves[(i, 0)] = Move::Up;
        }
        for j in 1..=m {
            s[(0, j)] = extend(s[(0, j - 1)], self.scoring.score(GAP, self.w[j - 1]));
            moves[(0, j)] = Move::Left;
        }

        for i in 1..=n {
            let a = self.v[i - 1];
            let up_cost = self.scoring.score(a, GAP);
            for j in 1..=m {
                let b = self.w[j - 1];
                let diag = extend(s[(i - 1, j - 1)], self.scoring.score(a, b));
                let up = extend(s[(i - 1, j)], up_cost);
                let left = extend(s[(i, j - 1)], self.scoring.score(GAP, b));
                let (best, mv) = best_move(diag, up, left);
                s[(i, j)] = best;
                moves[(i, j)] = mv;
            }
        }

        (s, moves)
    }

    /// Optimal global alignment, assuming both inputs were already checked
    /// against the alphabet and the `i32` score range.
    pub fn align(&self) -> Result<PairwiseAlignment> {
        let (n, m) = (self.n(), self.m());
        let (s, moves) = self.fill();
        let score = s[(n, m)].ok_or(AlignError::NoAlignmentPossible)?;
        let (first, second, _) = traceback(&moves, self.v, self.w, (n, m));
        Ok(PairwiseAlignment {
            first,
            second,
            score,
            first_range: 0..n,
            second_range: 0..m,
        })
    }
}

/// Validate both inputs, then run [`NeedlemanWunsch`].
pub fn align<S: Scoring + ?Sized>(v: &[u8], w: &[u8], scoring: &S) -> Result<PairwiseAlignment> {
    scoring.check(v, 0)?;
    scoring.check(w, 1)?;
    check_score_range(v, w, |a, b| scoring.score(a, b))?;

    #[cfg(feature = "tracing")]
    let span = tracing::info_span!("align_global", n = v.len(), m = w.len());
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    NeedlemanWunsch::new(v, w, scoring).align()
}

/// Which end of the inputs a linear-space pass starts from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    Forward,
    /// Same recurrence over `v` and `w` read back to front.
    Reverse,
}

/// Last row of the global score matrix for `v` against `w`, in O(|w|) space.
///
/// Entry `j` is the best score of aligning all of `v` with the first `j`
/// symbols of `w` (the last `j` when `dir` is [`Direction::Reverse`]).
pub(crate) fn last_row<S: Scoring + ?Sized>(
    v: &[u8],
    w: &[u8],
    scoring: &S,
    dir: Direction,
) -> Vec<Option<i32>> {
    let at = |s: &[u8], k: usize| match dir {
        Direction::Forward => s[k],
        Direction::Reverse => s[s.len() - 1 - k],
    };
    let m = w.len();

    let mut prev = Vec::with_capacity(m + 1);
    prev.push(Some(0));
    for j in 1..=m {
        let cell = extend(prev[j - 1], scoring.score(GAP, at(w, j - 1)));
        prev.push(cell);
    }
    let mut curr = vec![None; m + 1];

    for i in 0..v.len() {
        let a = at(v, i);
        let up_cost = scoring.score(a, GAP);
        curr[0] = extend(prev[0], up_cost);
        for j in 1..=m {
            let b = at(w, j - 1);
            let diag = extend(prev[j - 1], scoring.score(a, b));
            let up = extend(prev[j], up_cost);
            let left = extend(curr[j - 1], scoring.score(GAP, b));
            curr[j] = diag.max(up).max(left);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev
}
