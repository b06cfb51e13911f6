//! DP storage, backtrack discriminators and the pairwise alignment result.
//!
//! Every matrix is indexed by prefix lengths `(i, j)` with `0 <= i <= n`,
//! `0 <= j <= m` and stored row-major in one flat buffer.

use std::ops::{Index, IndexMut, Range};

use crate::traits::GAP;

/// Dense `(n + 1) x (m + 1)` grid.
#[derive(Clone, Debug)]
pub struct DpMatrix<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T: Clone> DpMatrix<T> {
    pub fn new(rows: usize, cols: usize, fill: T) -> Self {
        Self {
            rows,
            cols,
            cells: vec![fill; rows * cols],
        }
    }
}

impl<T> DpMatrix<T> {
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }
}

impl<T> Index<(usize, usize)> for DpMatrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        debug_assert!(i < self.rows && j < self.cols);
        &self.cells[i * self.cols + j]
    }
}

impl<T> IndexMut<(usize, usize)> for DpMatrix<T> {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        debug_assert!(i < self.rows && j < self.cols);
        &mut self.cells[i * self.cols + j]
    }
}

/// Predecessor move recorded per cell of a pairwise backtrack matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Move {
    /// From `(i-1, j-1)`: `v[i-1]` against `w[j-1]`.
    Diagonal,
    /// From `(i-1, j)`: `v[i-1]` against a gap.
    Up,
    /// From `(i, j-1)`: a gap against `w[j-1]`.
    Left,
    /// Traceback origin: `(0, 0)` globally, any zero cell locally.
    Stop,
}

/// Pick the best of the three pairwise candidates.
///
/// Ties resolve Diagonal, then Up, then Left. `None` ranks below every score,
/// so an all-`None` cell stays unreachable.
#[inline]
pub(crate) fn best_move(
    diag: Option<i32>,
    up: Option<i32>,
    left: Option<i32>,
) -> (Option<i32>, Move) {
    if diag >= up && diag >= left {
        (diag, Move::Diagonal)
    } else if up >= left {
        (up, Move::Up)
    } else {
        (left, Move::Left)
    }
}

/// Add a column score to a cell value; unreachable stays unreachable.
///
/// The public aligners reject inputs whose path scores could leave `i32`
/// before any fill, so the sum cannot overflow.
#[inline]
pub(crate) fn extend(cell: Option<i32>, step: Option<i32>) -> Option<i32> {
    Some(cell? + step?)
}

/// Two gapped rows plus the score and the input ranges they cover.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PairwiseAlignment {
    /// First input with gaps inserted.
    pub first: Vec<u8>,
    /// Second input with gaps inserted.
    pub second: Vec<u8>,
    pub score: i32,
    /// Half-open range of the first input covered by the alignment.
    pub first_range: Range<usize>,
    /// Half-open range of the second input covered by the alignment.
    pub second_range: Range<usize>,
}

impl PairwiseAlignment {
    /// Number of alignment columns.
    pub fn len(&self) -> usize {
        self.first.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.first.iter().copied().zip(self.second.iter().copied())
    }

    /// Rows as text, lossy for non-UTF-8 symbols.
    pub fn to_strings(&self) -> (String, String) {
        (
            String::from_utf8_lossy(&self.first).into_owned(),
            String::from_utf8_lossy(&self.second).into_owned(),
        )
    }
}

/// Gapped rows for the case where one side is empty.
pub(crate) fn pad_with_gaps(v: &[u8], w: &[u8]) -> (Vec<u8>, Vec<u8>) {
    if v.is_empty() {
        (vec![GAP; w.len()], w.to_vec())
    } else {
        debug_assert!(w.is_empty());
        (v.to_vec(), vec![GAP; v.len()])
    }
}

/// Follow `moves` backwards from `end` until a [`Move::Stop`] cell.
///
/// Returns the gapped rows in forward order and the cell the walk stopped at.
pub(crate) fn traceback(
    moves: &DpMatrix<Move>,
    v: &[u8],
    w: &[u8],
    end: (usize, usize),
) -> (Vec<u8>, Vec<u8>, (usize, usize)) {
    let (mut i, mut j) = end;
    let mut first = Vec::with_capacity(i + j);
    let mut second = Vec::with_capacity(i + j);

    loop {
        match moves[(i, j)] {
            Move::Diagonal => {
                first.push(v[i - 1]);
                second.push(w[j - 1]);
                i -= 1;
                j -= 1;
            }
            Move::Up => {
                first.push(v[i - 1]);
                second.push(GAP);
                i -= 1;
            }
            Move::Left => {
                first.push(GAP);
                second.push(w[j - 1]);
                j -= 1;
            }
            Move::Stop => break,
        }
    }

    first.reverse();
    second.reverse();
    (first, second, (i, j))
}
