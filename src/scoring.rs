//! Scoring models.
//!
//! - [`Alphabet`]: the finite symbol set a model accepts.
//! - [`MatchMismatch`]: total match/mismatch lookup over an alphabet.
//! - [`SubstitutionTable`]: partial table of explicit pair scores.
//! - [`FnMatrix`]: wraps a scoring function such as a built-in PAM/BLOSUM table.
//! - [`LinearGap`]: any substitution matrix plus a per-column gap penalty.
//! - [`AffineGap`]: any substitution matrix plus `gap_open` / `gap_extend`.
//! - [`EntropyScoring`]: column score for multi-sequence alignment.
//!
//! Penalties are stored as non-negative magnitudes and subtracted by the
//! models; a negative penalty is rejected as [`AlignError::InvalidParameters`].

use std::collections::HashMap;
use std::fmt;

use crate::error::{AlignError, Result};
use crate::traits::{Scoring, SubstitutionMatrix, GAP};
use crate::utils::check_symbols;

/// Finite set of input symbols with a dense rank per symbol.
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<u8>,
    rank: [Option<u8>; 256],
}

impl Alphabet {
    /// Build an alphabet from distinct, non-gap symbols.
    pub fn new(symbols: &[u8]) -> Result<Self> {
        if symbols.is_empty() {
            return Err(AlignError::invalid("alphabet must not be empty"));
        }
        if symbols.len() > u8::MAX as usize {
            return Err(AlignError::invalid("alphabet has more than 255 symbols"));
        }
        let mut rank = [None; 256];
        for (k, &s) in symbols.iter().enumerate() {
            if s == GAP {
                return Err(AlignError::invalid("the gap symbol cannot be part of an alphabet"));
            }
            if rank[s as usize].is_some() {
                return Err(AlignError::invalid(format!(
                    "duplicate alphabet symbol {:?}",
                    s as char
                )));
            }
            rank[s as usize] = Some(k as u8);
        }
        Ok(Self {
            symbols: symbols.to_vec(),
            rank,
        })
    }

    /// Nucleotides `ACGT`.
    pub fn dna() -> Self {
        Self::from_static(b"ACGT")
    }

    /// The twenty standard amino acids.
    pub fn protein() -> Self {
        Self::from_static(b"ARNDCQEGHILKMFPSTWYV")
    }

    fn from_static(symbols: &'static [u8]) -> Self {
        let mut rank = [None; 256];
        for (k, &s) in symbols.iter().enumerate() {
            rank[s as usize] = Some(k as u8);
        }
        Self {
            symbols: symbols.to_vec(),
            rank,
        }
    }

    #[inline]
    pub fn rank(&self, symbol: u8) -> Option<usize> {
        self.rank[symbol as usize].map(usize::from)
    }

    #[inline]
    pub fn contains(&self, symbol: u8) -> bool {
        self.rank[symbol as usize].is_some()
    }

    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Alphabet")
            .field(&String::from_utf8_lossy(&self.symbols))
            .finish()
    }
}

/// Match/mismatch substitution scores, precomputed for every symbol pair.
#[derive(Clone, Debug)]
pub struct MatchMismatch {
    alphabet: Alphabet,
    match_score: i32,
    mismatch_penalty: i32,
    table: Vec<i32>,
}

impl MatchMismatch {
    /// `match_score` on identical symbols, `-mismatch_penalty` otherwise.
    pub fn new(alphabet: Alphabet, match_score: i32, mismatch_penalty: i32) -> Result<Self> {
        if mismatch_penalty < 0 {
            return Err(AlignError::invalid(format!(
                "mismatch_penalty must be non-negative, got {mismatch_penalty}"
            )));
        }
        let k = alphabet.len();
        let mut table = Vec::with_capacity(k * k);
        for a in 0..k {
            for b in 0..k {
                table.push(if a == b {
                    match_score
                } else {
                    -mismatch_penalty
                });
            }
        }
        Ok(Self {
            alphabet,
            match_score,
            mismatch_penalty,
            table,
        })
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn match_score(&self) -> i32 {
        self.match_score
    }

    pub fn mismatch_penalty(&self) -> i32 {
        self.mismatch_penalty
    }
}

impl SubstitutionMatrix for MatchMismatch {
    #[inline]
    fn lookup(&self, a: u8, b: u8) -> Option<i32> {
        let ra = self.alphabet.rank(a)?;
        let rb = self.alphabet.rank(b)?;
        Some(self.table[ra * self.alphabet.len() + rb])
    }

    #[inline]
    fn contains(&self, symbol: u8) -> bool {
        self.alphabet.contains(symbol)
    }
}

/// Explicit, possibly partial, table of pair scores.
///
/// Pairs are stored exactly as given: an entry for `(a, b)` does not imply
/// one for `(b, a)`. A symbol belongs to the table's alphabet as soon as it
/// appears on either side of any entry.
#[derive(Clone, Debug, Default)]
pub struct SubstitutionTable {
    entries: HashMap<(u8, u8), i32>,
    known: Vec<u8>,
}

impl SubstitutionTable {
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = ((u8, u8), i32)>,
    {
        let mut table = Self::default();
        for ((a, b), score) in entries {
            if a == GAP || b == GAP {
                return Err(AlignError::invalid(
                    "substitution tables cannot score the gap symbol",
                ));
            }
            table.entries.insert((a, b), score);
            for s in [a, b] {
                if !table.known.contains(&s) {
                    table.known.push(s);
                }
            }
        }
        if table.entries.is_empty() {
            return Err(AlignError::invalid("substitution table has no entries"));
        }
        Ok(table)
    }

    /// Square table: `rows[r][c]` scores `alphabet[r]` against `alphabet[c]`.
    pub fn from_square(alphabet: &[u8], rows: &[Vec<i32>]) -> Result<Self> {
        let alphabet = Alphabet::new(alphabet)?;
        let k = alphabet.len();
        if rows.len() != k || rows.iter().any(|row| row.len() != k) {
            return Err(AlignError::invalid(format!(
                "square substitution table must be {k}x{k}"
            )));
        }
        let symbols = alphabet.symbols();
        Self::from_entries(rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, &score)| ((symbols[r], symbols[c]), score))
        }))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SubstitutionMatrix for SubstitutionTable {
    #[inline]
    fn lookup(&self, a: u8, b: u8) -> Option<i32> {
        self.entries.get(&(a, b)).copied()
    }

    fn contains(&self, symbol: u8) -> bool {
        self.known.contains(&symbol)
    }
}

/// Total substitution matrix backed by a function over a declared alphabet.
///
/// ```
/// use align_dp::scoring::{Alphabet, FnMatrix};
/// use align_dp::traits::SubstitutionMatrix;
///
/// let identity = FnMatrix::new(Alphabet::dna(), |a, b| if a == b { 5 } else { -4 });
/// assert_eq!(identity.lookup(b'A', b'A'), Some(5));
/// assert_eq!(identity.lookup(b'A', b'N'), None);
/// ```
#[derive(Clone)]
pub struct FnMatrix<F> {
    alphabet: Alphabet,
    f: F,
}

impl<F: Fn(u8, u8) -> i32> FnMatrix<F> {
    pub fn new(alphabet: Alphabet, f: F) -> Self {
        Self { alphabet, f }
    }
}

impl<F: Fn(u8, u8) -> i32> SubstitutionMatrix for FnMatrix<F> {
    #[inline]
    fn lookup(&self, a: u8, b: u8) -> Option<i32> {
        if self.alphabet.contains(a) && self.alphabet.contains(b) {
            Some((self.f)(a, b))
        } else {
            None
        }
    }

    #[inline]
    fn contains(&self, symbol: u8) -> bool {
        self.alphabet.contains(symbol)
    }
}

/// Linear gap model: every gap column costs `gap_penalty`.
#[derive(Clone, Debug)]
pub struct LinearGap<M> {
    matrix: M,
    gap_penalty: i32,
}

impl<M: SubstitutionMatrix> LinearGap<M> {
    pub fn with_matrix(matrix: M, gap_penalty: i32) -> Result<Self> {
        if gap_penalty < 0 {
            return Err(AlignError::invalid(format!(
                "gap_penalty must be non-negative, got {gap_penalty}"
            )));
        }
        Ok(Self {
            matrix,
            gap_penalty,
        })
    }

    pub fn matrix(&self) -> &M {
        &self.matrix
    }

    pub fn gap_penalty(&self) -> i32 {
        self.gap_penalty
    }
}

impl<M: SubstitutionMatrix> Scoring for LinearGap<M> {
    #[inline]
    fn score(&self, a: u8, b: u8) -> Option<i32> {
        match (a == GAP, b == GAP) {
            (true, true) => None,
            (true, false) | (false, true) => Some(-self.gap_penalty),
            (false, false) => self.matrix.lookup(a, b),
        }
    }

    #[inline]
    fn contains(&self, symbol: u8) -> bool {
        self.matrix.contains(symbol)
    }
}

/// Affine gap model: a run of `k >= 1` gaps costs `gap_open + (k - 1) * gap_extend`.
///
/// Gaps are handled structurally by the affine recurrence, so the model only
/// looks up ordinary symbol pairs.
#[derive(Clone, Debug)]
pub struct AffineGap<M> {
    matrix: M,
    gap_open: i32,
    gap_extend: i32,
}

impl<M: SubstitutionMatrix> AffineGap<M> {
    pub fn with_matrix(matrix: M, gap_open: i32, gap_extend: i32) -> Result<Self> {
        if gap_open < 0 || gap_extend < 0 {
            return Err(AlignError::invalid(format!(
                "gap costs must be non-negative, got open={gap_open} extend={gap_extend}"
            )));
        }
        Ok(Self {
            matrix,
            gap_open,
            gap_extend,
        })
    }

    #[inline]
    pub fn substitution(&self, a: u8, b: u8) -> Option<i32> {
        self.matrix.lookup(a, b)
    }

    pub fn gap_open(&self) -> i32 {
        self.gap_open
    }

    pub fn gap_extend(&self) -> i32 {
        self.gap_extend
    }

    /// Score (non-positive) of a single gap run of length `len`, `None` when
    /// it does not fit in `i32`.
    pub fn gap_run(&self, len: usize) -> Option<i32> {
        if len == 0 {
            return Some(0);
        }
        let extensions = (len - 1) as u128 * u128::try_from(self.gap_extend).ok()?;
        let cost = extensions + u128::try_from(self.gap_open).ok()?;
        i32::try_from(cost).ok().map(|c| -c)
    }

    pub fn matrix(&self) -> &M {
        &self.matrix
    }

    pub fn contains(&self, symbol: u8) -> bool {
        self.matrix.contains(symbol)
    }

    pub fn check(&self, seq: &[u8], sequence: usize) -> Result<()> {
        check_symbols(seq, sequence, |s| self.matrix.contains(s))
    }
}

/// Entropy column score for multi-sequence alignment.
///
/// For a column of `t` symbols, real symbols contribute the information term
/// `-p * log2(p)` of their frequency `p = count / t`, while every gap adds
/// `p_gap` linearly. The column score is the negated total.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntropyScoring {
    p_gap: f64,
}

impl EntropyScoring {
    pub fn new(p_gap: f64) -> Result<Self> {
        if !p_gap.is_finite() || p_gap <= 0.0 {
            return Err(AlignError::invalid(format!(
                "p_gap must be a positive finite number, got {p_gap}"
            )));
        }
        Ok(Self { p_gap })
    }

    pub fn p_gap(&self) -> f64 {
        self.p_gap
    }

    pub fn column_score(&self, column: &[u8]) -> f64 {
        let mut counts = Vec::with_capacity(column.len());
        self.column_score_with(column, &mut counts)
    }

    /// Same as [`column_score`](Self::column_score), reusing `counts` as scratch.
    ///
    /// Symbols are tallied in first-occurrence order, which fixes the
    /// floating-point summation order.
    pub(crate) fn column_score_with(&self, column: &[u8], counts: &mut Vec<(u8, u32)>) -> f64 {
        counts.clear();
        for &s in column {
            match counts.iter_mut().find(|(sym, _)| *sym == s) {
                Some((_, c)) => *c += 1,
                None => counts.push((s, 1)),
            }
        }

        let total = column.len() as f64;
        let mut entropy = 0.0;
        for &(sym, count) in counts.iter() {
            if sym == GAP {
                entropy += self.p_gap * f64::from(count);
            } else {
                let p = f64::from(count) / total;
                entropy -= p * p.log2();
            }
        }
        -entropy
    }
}
