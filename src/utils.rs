//! Assorted helpers: input validation, alignment re-scoring and size estimates.

use crate::error::{AlignError, Result};
use crate::scoring::AffineGap;
use crate::traits::{Scoring, SubstitutionMatrix, GAP};

/// Reject the first symbol of `seq` that is the gap or fails `contains`.
pub(crate) fn check_symbols(
    seq: &[u8],
    sequence: usize,
    contains: impl Fn(u8) -> bool,
) -> Result<()> {
    match seq.iter().position(|&s| s == GAP || !contains(s)) {
        None => Ok(()),
        Some(position) => Err(AlignError::InvalidAlphabet {
            sequence,
            position,
            symbol: seq[position] as char,
        }),
    }
}

/// Remove gap symbols from an aligned row.
#[inline]
pub fn strip_gaps(aligned: &[u8]) -> Vec<u8> {
    aligned.iter().copied().filter(|&s| s != GAP).collect()
}

fn check_rows(first: &[u8], second: &[u8]) -> Result<()> {
    if first.len() != second.len() {
        return Err(AlignError::invalid(format!(
            "aligned rows differ in length ({} vs {})",
            first.len(),
            second.len()
        )));
    }
    Ok(())
}

fn missing(a: u8, b: u8) -> AlignError {
    AlignError::MissingSubstitutionEntry {
        a: a as char,
        b: b as char,
    }
}

fn overflow() -> AlignError {
    AlignError::invalid("alignment score does not fit in i32")
}

/// Reject a pair of inputs whose path scores could leave the `i32` range.
///
/// A path through the grid has at most `n + m` columns and every cell of a
/// fill holds the score of a path prefix, so `(n + m) * max |column|` bounds
/// every value an aligner computes. `column` is asked for every pair of
/// symbols occurring in the inputs, gap columns included.
pub(crate) fn check_score_range(
    v: &[u8],
    w: &[u8],
    column: impl Fn(u8, u8) -> Option<i32>,
) -> Result<()> {
    let (left, right) = (distinct_with_gap(v), distinct_with_gap(w));
    let mut largest = 0u64;
    for &a in &left {
        for &b in &right {
            if a == GAP && b == GAP {
                continue;
            }
            if let Some(score) = column(a, b) {
                largest = largest.max(u64::from(score.unsigned_abs()));
            }
        }
    }

    let columns = v.len() as u64 + w.len() as u64;
    match columns.checked_mul(largest) {
        Some(bound) if bound <= i32::MAX as u64 => Ok(()),
        _ => Err(AlignError::invalid(format!(
            "{columns} columns scoring up to {largest} each overflow i32"
        ))),
    }
}

/// The gap followed by every distinct symbol of `seq`.
fn distinct_with_gap(seq: &[u8]) -> Vec<u8> {
    let mut seen = [false; 256];
    seen[GAP as usize] = true;
    let mut out = vec![GAP];
    for &s in seq {
        if !seen[s as usize] {
            seen[s as usize] = true;
            out.push(s);
        }
    }
    out
}

/// Sum of the per-column scores of an alignment under a linear-gap model.
pub fn rescore<S: Scoring + ?Sized>(first: &[u8], second: &[u8], scoring: &S) -> Result<i32> {
    check_rows(first, second)?;
    first.iter().zip(second).try_fold(0i32, |acc, (&a, &b)| {
        let column = scoring.score(a, b).ok_or_else(|| missing(a, b))?;
        acc.checked_add(column).ok_or_else(overflow)
    })
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum GapRun {
    None,
    InFirst,
    InSecond,
}

/// Sum of the column scores of an alignment under an affine-gap model.
///
/// The first column of every gap run pays `gap_open`, the following ones
/// `gap_extend`. A gap in one row directly followed by a gap in the other
/// row starts a new run.
pub fn rescore_affine<M: SubstitutionMatrix>(
    first: &[u8],
    second: &[u8],
    scoring: &AffineGap<M>,
) -> Result<i32> {
    check_rows(first, second)?;
    let mut total = 0i32;
    let mut run = GapRun::None;
    for (&a, &b) in first.iter().zip(second) {
        let (column, next) = match (a == GAP, b == GAP) {
            (true, true) => return Err(missing(a, b)),
            (false, false) => {
                let s = scoring.substitution(a, b).ok_or_else(|| missing(a, b))?;
                (s, GapRun::None)
            }
            (true, false) => (gap_column(scoring, run == GapRun::InFirst), GapRun::InFirst),
            (false, true) => (gap_column(scoring, run == GapRun::InSecond), GapRun::InSecond),
        };
        total = total.checked_add(column).ok_or_else(overflow)?;
        run = next;
    }
    Ok(total)
}

#[inline]
fn gap_column<M: SubstitutionMatrix>(scoring: &AffineGap<M>, extending: bool) -> i32 {
    if extending {
        -scoring.gap_extend()
    } else {
        -scoring.gap_open()
    }
}

/// Number of cells of an `(n + 1) x (m + 1)` pairwise matrix, `None` on overflow.
///
/// Callers that need bounded latency can compare this against a budget
/// before invoking a quadratic aligner.
pub fn matrix_cells(n: usize, m: usize) -> Option<usize> {
    n.checked_add(1)?.checked_mul(m.checked_add(1)?)
}

/// Number of cells of the hypercube for sequences of the given lengths.
pub fn hypercube_cells(lengths: &[usize]) -> Option<usize> {
    lengths
        .iter()
        .try_fold(1usize, |acc, &len| acc.checked_mul(len.checked_add(1)?))
}
