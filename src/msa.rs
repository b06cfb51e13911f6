//! Simultaneous alignment of `t >= 2` sequences over a `t`-dimensional
//! hypercube, maximising the sum of entropy column scores.
//!
//! Cell `(i_1, ..., i_t)` holds the best score of aligning the prefixes of
//! those lengths. A move is a non-zero bit-vector in `{0, 1}^t`: bit `k` set
//! means sequence `k` contributes its next symbol to the column, clear means
//! it contributes a gap. Moves are encoded as `u32` masks with sequence 0 in
//! the most significant of the `t` bits and are tried in ascending mask
//! order; the first strictly better move wins.
//!
//! The hypercube is a flat buffer with the last sequence varying fastest.
//! Both time and space are `O(2^t * prod(len_k + 1))`, so this is meant for a
//! handful of short sequences.

use crate::error::{AlignError, Result};
use crate::scoring::EntropyScoring;
use crate::traits::GAP;
use crate::utils::{check_symbols, hypercube_cells};

/// Largest `t` whose moves fit the `u32` mask encoding.
pub const MAX_SEQUENCES: usize = 31;

#[derive(Clone, Debug, PartialEq)]
pub struct MultipleAlignment {
    /// One gapped row per input sequence, all of equal length.
    pub rows: Vec<Vec<u8>>,
    pub score: f64,
}

impl MultipleAlignment {
    /// Number of alignment columns.
    pub fn len(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column(&self, c: usize) -> Vec<u8> {
        self.rows.iter().map(|row| row[c]).collect()
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| String::from_utf8_lossy(row).into_owned())
            .collect()
    }
}

/// Filled score and move hypercube.
#[derive(Clone, Debug)]
pub struct Hypercube {
    shape: Vec<usize>,
    strides: Vec<usize>,
    scores: Vec<Option<f64>>,
    /// Winning move mask per cell, 0 for the origin and unreached cells.
    moves: Vec<u32>,
}

impl Hypercube {
    fn new(lengths: &[usize], cells: usize) -> Self {
        let shape: Vec<usize> = lengths.iter().map(|&l| l + 1).collect();
        let mut strides = vec![1usize; shape.len()];
        for k in (0..shape.len().saturating_sub(1)).rev() {
            strides[k] = strides[k + 1] * shape[k + 1];
        }
        Self {
            shape,
            strides,
            scores: vec![None; cells],
            moves: vec![0; cells],
        }
    }

    /// Extent of each dimension (`len_k + 1`).
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Flat offset of `coords`, `None` if out of bounds.
    pub fn offset(&self, coords: &[usize]) -> Option<usize> {
        if coords.len() != self.shape.len() {
            return None;
        }
        coords
            .iter()
            .zip(&self.shape)
            .zip(&self.strides)
            .try_fold(0usize, |acc, ((&c, &extent), &stride)| {
                (c < extent).then_some(acc + c * stride)
            })
    }

    /// Best score at `coords`; `None` if unreached or out of bounds.
    pub fn score(&self, coords: &[usize]) -> Option<f64> {
        self.offset(coords).and_then(|o| self.scores[o])
    }
}

#[inline]
fn consumes(mask: u32, k: usize, t: usize) -> bool {
    (mask >> (t - 1 - k)) & 1 == 1
}

pub struct MultiAligner<'a, S> {
    sequences: &'a [S],
    scoring: &'a EntropyScoring,
}

impl<'a, S: AsRef<[u8]>> MultiAligner<'a, S> {
    /// Checks the sequence count, the symbols and the hypercube size.
    pub fn new(sequences: &'a [S], scoring: &'a EntropyScoring) -> Result<Self> {
        let t = sequences.len();
        if t < 2 {
            return Err(AlignError::DimensionMismatch {
                expected_at_least: 2,
                found: t,
            });
        }
        if t > MAX_SEQUENCES {
            return Err(AlignError::invalid(format!(
                "at most {MAX_SEQUENCES} sequences can be aligned at once, got {t}"
            )));
        }
        for (k, seq) in sequences.iter().enumerate() {
            check_symbols(seq.as_ref(), k, |_| true)?;
        }
        Ok(Self { sequences, scoring })
    }

    fn lengths(&self) -> Vec<usize> {
        self.sequences.iter().map(|s| s.as_ref().len()).collect()
    }

    pub fn fill(&self) -> Result<Hypercube> {
        let t = self.sequences.len();
        let lengths = self.lengths();
        let cells = hypercube_cells(&lengths)
            .ok_or_else(|| AlignError::invalid("hypercube size overflows usize"))?;

        #[cfg(feature = "tracing")]
        tracing::debug!(t, cells, moves = (1u64 << t) - 1, "hypercube");

        let mut cube = Hypercube::new(&lengths, cells);
        cube.scores[0] = Some(0.0);

        let mut coords = vec![0usize; t];
        let mut column = vec![GAP; t];
        let mut counts = Vec::with_capacity(t);
        let last_mask = 1u32 << t;

        for idx in 1..cells {
            // Odometer step: coordinates of `idx`, last dimension fastest.
            let mut k = t - 1;
            loop {
                coords[k] += 1;
                if coords[k] < cube.shape[k] {
                    break;
                }
                coords[k] = 0;
                k -= 1;
            }

            let mut best: Option<(f64, u32)> = None;
            'moves: for mask in 1..last_mask {
                let mut pred = idx;
                for k in 0..t {
                    if consumes(mask, k, t) {
                        if coords[k] == 0 {
                            continue 'moves;
                        }
                        pred -= cube.strides[k];
                        column[k] = self.sequences[k].as_ref()[coords[k] - 1];
                    } else {
                        column[k] = GAP;
                    }
                }
                let Some(base) = cube.scores[pred] else {
                    continue;
                };
                let candidate = base + self.scoring.column_score_with(&column, &mut counts);
                if best.map_or(true, |(score, _)| candidate > score) {
                    best = Some((candidate, mask));
                }
            }

            if let Some((score, mask)) = best {
                cube.scores[idx] = Some(score);
                cube.moves[idx] = mask;
            }
        }

        Ok(cube)
    }

    pub fn align(&self) -> Result<MultipleAlignment> {
        let t = self.sequences.len();
        let cube = self.fill()?;
        let mut idx = cube.len() - 1;
        let score = cube.scores[idx].ok_or(AlignError::NoAlignmentPossible)?;

        let mut coords = self.lengths();
        let width: usize = coords.iter().sum();
        let mut rows: Vec<Vec<u8>> = (0..t).map(|_| Vec::with_capacity(width)).collect();

        while idx != 0 {
            let mask = cube.moves[idx];
            if mask == 0 {
                return Err(AlignError::NoAlignmentPossible);
            }
            for (k, row) in rows.iter_mut().enumerate() {
                if consumes(mask, k, t) {
                    row.push(self.sequences[k].as_ref()[coords[k] - 1]);
                    coords[k] -= 1;
                    idx -= cube.strides[k];
                } else {
                    row.push(GAP);
                }
            }
        }

        for row in &mut rows {
            row.reverse();
        }
        Ok(MultipleAlignment { rows, score })
    }
}

/// Validate the inputs, then run [`MultiAligner`].
pub fn align<S: AsRef<[u8]>>(
    sequences: &[S],
    scoring: &EntropyScoring,
) -> Result<MultipleAlignment> {
    #[cfg(feature = "tracing")]
    let span = tracing::info_span!("align_multi", t = sequences.len(), p_gap = scoring.p_gap());
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    MultiAligner::new(sequences, scoring)?.align()
}
