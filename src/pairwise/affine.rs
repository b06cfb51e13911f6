//! Global alignment with affine gaps (Gotoh), three matrices.
//!
//! - `M[i][j]`: best score ending with `v[i-1]` against `w[j-1]`.
//! - `Ix[i][j]`: best score ending in a horizontal gap run (consumes `w`).
//! - `Iy[i][j]`: best score ending in a vertical gap run (consumes `v`).
//!
//! ```text
//! M[i][j]  = max(M, Iy, Ix)[i-1][j-1] + sub(v[i-1], w[j-1])
//! Ix[i][j] = max(M[i][j-1] - open, Ix[i][j-1] - extend)
//! Iy[i][j] = max(M[i-1][j] - open, Iy[i-1][j] - extend)
//! ```
//!
//! Boundary: `Iy[i][0] = -open - (i-1)*extend = M[i][0]`, symmetric for
//! `Ix[0][j]` and `M[0][j]`, `M[0][0] = 0`. The final score is `M[n][m]`.
//!
//! Each gap matrix only ever transitions from `M` or from itself. The
//! traceback follows the matrix that produced each value, so the returned
//! alignment re-scores exactly to `M[n][m]`.

use crate::error::{AlignError, Result};
use crate::matrix::{extend, DpMatrix, PairwiseAlignment};
use crate::scoring::AffineGap;
use crate::traits::{SubstitutionMatrix, GAP};
use crate::utils::check_score_range;

/// Which of the three matrices a value came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    M,
    Ix,
    Iy,
}

/// The three score matrices of one affine fill.
#[derive(Clone, Debug)]
pub struct AffineState {
    pub m: DpMatrix<Option<i32>>,
    pub ix: DpMatrix<Option<i32>>,
    pub iy: DpMatrix<Option<i32>>,
}

/// Per-matrix predecessor layers.
#[derive(Clone, Debug)]
pub struct AffineTrace {
    /// Layer of the diagonal predecessor of `M[i][j]`.
    pub m_from: DpMatrix<Layer>,
    /// `Layer::M` when `Ix[i][j]` opened a gap, `Layer::Ix` when it extended one.
    pub ix_from: DpMatrix<Layer>,
    /// `Layer::M` when `Iy[i][j]` opened a gap, `Layer::Iy` when it extended one.
    pub iy_from: DpMatrix<Layer>,
}

/// Best of the three diagonal predecessors; ties favour M, then Iy, then Ix.
#[inline]
fn best_layer(m: Option<i32>, iy: Option<i32>, ix: Option<i32>) -> (Option<i32>, Layer) {
    if m >= iy && m >= ix {
        (m, Layer::M)
    } else if iy >= ix {
        (iy, Layer::Iy)
    } else {
        (ix, Layer::Ix)
    }
}

/// Open vs. extend for a gap matrix; ties favour opening.
#[inline]
fn open_or_extend(open: Option<i32>, ext: Option<i32>, own: Layer) -> (Option<i32>, Layer) {
    if open >= ext {
        (open, Layer::M)
    } else {
        (ext, own)
    }
}

#[derive(Clone)]
pub struct Gotoh<'a, M> {
    pub v: &'a [u8],
    pub w: &'a [u8],
    pub scoring: &'a AffineGap<M>,
}

impl<'a, M: SubstitutionMatrix> Gotoh<'a, M> {
    pub fn new(v: &'a [u8], w: &'a [u8], scoring: &'a AffineGap<M>) -> Self {
        Self { v, w, scoring }
    }

    pub fn fill(&self) -> (AffineState, AffineTrace) {
        let (n, m) = (self.v.len(), self.w.len());
        let open = Some(-self.scoring.gap_open());
        let ext = Some(-self.scoring.gap_extend());

        let mut st = AffineState {
            m: DpMatrix::new(n + 1, m + 1, None),
            ix: DpMatrix::new(n + 1, m + 1, None),
            iy: DpMatrix::new(n + 1, m + 1, None),
        };
        let mut tr = AffineTrace {
            m_from: DpMatrix::new(n + 1, m + 1, Layer::M),
            ix_from: DpMatrix::new(n + 1, m + 1, Layer::Ix),
            iy_from: DpMatrix::new(n + 1, m + 1, Layer::Iy),
        };

        st.m[(0, 0)] = Some(0);
        for i in 1..=n {
            st.iy[(i, 0)] = self.scoring.gap_run(i);
            st.m[(i, 0)] = st.iy[(i, 0)];
        }
        for j in 1..=m {
            st.ix[(0, j)] = self.scoring.gap_run(j);
            st.m[(0, j)] = st.ix[(0, j)];
        }

        for i in 1..=n {
            let a = self.v[i - 1];
            for j in 1..=m {
                let sub = self.scoring.substitution(a, self.w[j - 1]);
                let (prev, from) = best_layer(
                    st.m[(i - 1, j - 1)],
                    st.iy[(i - 1, j - 1)],
                    st.ix[(i - 1, j - 1)],
                );
                st.m[(i, j)] = extend(prev, sub);
                tr.m_from[(i, j)] = from;

                let (val, from) = open_or_extend(
                    extend(st.m[(i, j - 1)], open),
                    extend(st.ix[(i, j - 1)], ext),
                    Layer::Ix,
                );
                st.ix[(i, j)] = val;
                tr.ix_from[(i, j)] = from;

                let (val, from) = open_or_extend(
                    extend(st.m[(i - 1, j)], open),
                    extend(st.iy[(i - 1, j)], ext),
                    Layer::Iy,
                );
                st.iy[(i, j)] = val;
                tr.iy_from[(i, j)] = from;
            }
        }

        (st, tr)
    }

    pub fn align(&self) -> Result<PairwiseAlignment> {
        let (n, m) = (self.v.len(), self.w.len());
        let (st, tr) = self.fill();
        let score = st.m[(n, m)].ok_or(AlignError::NoAlignmentPossible)?;
        let (first, second) = self.traceback(&tr);
        Ok(PairwiseAlignment {
            first,
            second,
            score,
            first_range: 0..n,
            second_range: 0..m,
        })
    }

    fn traceback(&self, tr: &AffineTrace) -> (Vec<u8>, Vec<u8>) {
        let (mut i, mut j) = (self.v.len(), self.w.len());
        let mut first = Vec::with_capacity(i + j);
        let mut second = Vec::with_capacity(i + j);
        let mut layer = Layer::M;

        while i > 0 || j > 0 {
            // Row/column 0 is a single gap run whatever the layer says.
            if j == 0 {
                first.push(self.v[i - 1]);
                second.push(GAP);
                i -= 1;
                continue;
            }
            if i == 0 {
                first.push(GAP);
                second.push(self.w[j - 1]);
                j -= 1;
                continue;
            }
            match layer {
                Layer::M => {
                    first.push(self.v[i - 1]);
                    second.push(self.w[j - 1]);
                    layer = tr.m_from[(i, j)];
                    i -= 1;
                    j -= 1;
                }
                Layer::Ix => {
                    first.push(GAP);
                    second.push(self.w[j - 1]);
                    layer = tr.ix_from[(i, j)];
                    j -= 1;
                }
                Layer::Iy => {
                    first.push(self.v[i - 1]);
                    second.push(GAP);
                    layer = tr.iy_from[(i, j)];
                    i -= 1;
                }
            }
        }

        first.reverse();
        second.reverse();
        (first, second)
    }
}

/// Validate both inputs, then run [`Gotoh`].
pub fn align<M: SubstitutionMatrix>(
    v: &[u8],
    w: &[u8],
    scoring: &AffineGap<M>,
) -> Result<PairwiseAlignment> {
    scoring.check(v, 0)?;
    scoring.check(w, 1)?;
    let gap = scoring.gap_open().max(scoring.gap_extend());
    check_score_range(v, w, |a, b| {
        if a == GAP || b == GAP {
            Some(gap)
        } else {
            scoring.substitution(a, b)
        }
    })?;

    #[cfg(feature = "tracing")]
    let span = tracing::info_span!(
        "align_affine",
        n = v.len(),
        m = w.len(),
        gap_open = scoring.gap_open(),
        gap_extend = scoring.gap_extend()
    );
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    Gotoh::new(v, w, scoring).align()
}
