/// Scoring models for local alignment
use super::matrices::{NamedMatrix, SubstitutionMatrix};
use crate::{LocalignError, Result};
use serde::{Deserialize, Serialize};

/// Cell and alignment score type.
///
/// 32 bits hold any local alignment up to `i32::MAX / max_pair_score`
/// aligned positions (over 10^8 residues at BLOSUM62's top score of 11).
/// Larger inputs are rejected before the matrix is filled.
pub type Score = i32;

pub trait ScoringMatrix: Send + Sync {
    fn score(&self, a: u8, b: u8) -> Result<Score>;

    /// Largest value `score` can return
    fn max_score(&self) -> Score;

    fn name(&self) -> &str;
}

/// Two-value model: one score for identical symbols, one for everything else
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NucleotideMatrix {
    match_score: Score,
    mismatch_penalty: Score,
}

impl NucleotideMatrix {
    pub fn new(match_score: Score, mismatch_penalty: Score) -> Self {
        Self {
            match_score,
            mismatch_penalty,
        }
    }

    pub fn match_score(&self) -> Score {
        self.match_score
    }

    pub fn mismatch_penalty(&self) -> Score {
        self.mismatch_penalty
    }
}

impl Default for NucleotideMatrix {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

impl ScoringMatrix for NucleotideMatrix {
    fn score(&self, a: u8, b: u8) -> Result<Score> {
        if a.eq_ignore_ascii_case(&b) {
            Ok(self.match_score)
        } else {
            Ok(self.mismatch_penalty)
        }
    }

    fn max_score(&self) -> Score {
        self.match_score.max(self.mismatch_penalty)
    }

    fn name(&self) -> &str {
        "match/mismatch"
    }
}

impl ScoringMatrix for SubstitutionMatrix {
    fn score(&self, a: u8, b: u8) -> Result<Score> {
        SubstitutionMatrix::score(self, a, b)
    }

    fn max_score(&self) -> Score {
        SubstitutionMatrix::max_score(self)
    }

    fn name(&self) -> &str {
        SubstitutionMatrix::name(self)
    }
}

/// Scoring selected at runtime: nucleotide match/mismatch or a named amino-acid table
#[derive(Debug, Clone, Copy)]
pub enum ScoringModel {
    Nucleotide(NucleotideMatrix),
    Substitution(&'static SubstitutionMatrix),
}

impl ScoringModel {
    pub fn nucleotide(match_score: Score, mismatch_penalty: Score) -> Self {
        ScoringModel::Nucleotide(NucleotideMatrix::new(match_score, mismatch_penalty))
    }

    pub fn substitution(matrix: NamedMatrix) -> Self {
        ScoringModel::Substitution(matrix.matrix())
    }
}

impl ScoringMatrix for ScoringModel {
    fn score(&self, a: u8, b: u8) -> Result<Score> {
        match self {
            ScoringModel::Nucleotide(m) => m.score(a, b),
            ScoringModel::Substitution(m) => m.score(a, b),
        }
    }

    fn max_score(&self) -> Score {
        match self {
            ScoringModel::Nucleotide(m) => m.max_score(),
            ScoringModel::Substitution(m) => m.max_score(),
        }
    }

    fn name(&self) -> &str {
        match self {
            ScoringModel::Nucleotide(m) => m.name(),
            ScoringModel::Substitution(m) => m.name(),
        }
    }
}

/// Linear gap penalty, subtracted once per gap column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GapPenalty(Score);

impl GapPenalty {
    pub fn new(penalty: Score) -> Result<Self> {
        if penalty < 0 {
            return Err(LocalignError::InvalidInput(format!(
                "gap penalty must be non-negative, got {}",
                penalty
            )));
        }
        Ok(Self(penalty))
    }

    pub fn value(&self) -> Score {
        self.0
    }
}
