//! Builder for the match/mismatch scoring models.
//!
//! Defaults reproduce the reference DNA scoring: alphabet `ACGT`, +1 on a
//! match, mismatch penalty 1, gap penalty 1.

use crate::error::{AlignError, Result};
use crate::scoring::{AffineGap, Alphabet, EntropyScoring, LinearGap, MatchMismatch};

#[derive(Clone, Debug)]
pub struct ScoringBuilder {
    alphabet: Option<Vec<u8>>,
    match_score: i32,
    mismatch_penalty: i32,
    gap_penalty: i32,
}

impl Default for ScoringBuilder {
    fn default() -> Self {
        Self {
            alphabet: None,
            match_score: 1,
            mismatch_penalty: 1,
            gap_penalty: 1,
        }
    }
}

impl ScoringBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alphabet(mut self, symbols: &[u8]) -> Self {
        self.alphabet = Some(symbols.to_vec());
        self
    }

    pub fn match_score(mut self, score: i32) -> Self {
        self.match_score = score;
        self
    }

    /// Magnitude subtracted on a mismatch (`pmm`).
    pub fn mismatch_penalty(mut self, penalty: i32) -> Self {
        self.mismatch_penalty = penalty;
        self
    }

    /// Magnitude subtracted per gap column (`p_gap`).
    pub fn gap_penalty(mut self, penalty: i32) -> Self {
        self.gap_penalty = penalty;
        self
    }

    /// The substitution part on its own.
    pub fn substitution(&self) -> Result<MatchMismatch> {
        let alphabet = match &self.alphabet {
            Some(symbols) => Alphabet::new(symbols)?,
            None => Alphabet::dna(),
        };
        MatchMismatch::new(alphabet, self.match_score, self.mismatch_penalty)
    }

    /// Linear gap model for the global, local and linear-space aligners.
    pub fn linear(self) -> Result<LinearGap<MatchMismatch>> {
        LinearGap::with_matrix(self.substitution()?, self.gap_penalty)
    }

    /// Affine gap model; the builder's linear gap penalty is ignored.
    pub fn affine(self, gap_open: i32, gap_extend: i32) -> Result<AffineGap<MatchMismatch>> {
        AffineGap::with_matrix(self.substitution()?, gap_open, gap_extend)
    }

    /// Entropy column scoring with `p_gap` taken from the gap penalty.
    pub fn entropy(self) -> Result<EntropyScoring> {
        if self.gap_penalty <= 0 {
            return Err(AlignError::invalid(format!(
                "p_gap must be positive, got {}",
                self.gap_penalty
            )));
        }
        EntropyScoring::new(f64::from(self.gap_penalty))
    }
}
