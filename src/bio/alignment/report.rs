use super::scoring::Score;
use super::traceback::GAP;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const GAP_CHAR: char = GAP as char;

/// Marker for an aligned pair of different symbols
pub const SUBSTITUTION: char = '•';

/// One optimal local alignment. Coordinates are 1-based and inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalAlignment {
    pub score: Score,
    pub aligned_seq1: String,
    pub aligned_seq2: String,
    pub seq1_start: usize,
    pub seq1_end: usize,
    pub seq2_start: usize,
    pub seq2_end: usize,
}

impl LocalAlignment {
    /// Number of alignment columns
    pub fn len(&self) -> usize {
        self.aligned_seq1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aligned_seq1.is_empty()
    }

    fn columns(&self) -> impl Iterator<Item = (char, char)> + '_ {
        self.aligned_seq1.chars().zip(self.aligned_seq2.chars())
    }

    /// '|' for identical symbols, '•' for a substitution, ' ' for a gap column
    pub fn markers(&self) -> String {
        self.columns()
            .map(|(a, b)| {
                if a == GAP_CHAR || b == GAP_CHAR {
                    ' '
                } else if a.eq_ignore_ascii_case(&b) {
                    '|'
                } else {
                    SUBSTITUTION
                }
            })
            .collect()
    }

    pub fn identities(&self) -> usize {
        self.markers().chars().filter(|&c| c == '|').count()
    }

    pub fn substitutions(&self) -> usize {
        self.markers().chars().filter(|&c| c == SUBSTITUTION).count()
    }

    pub fn gaps(&self) -> usize {
        self.columns()
            .filter(|&(a, b)| a == GAP_CHAR || b == GAP_CHAR)
            .count()
    }

    /// Percent of columns holding identical symbols
    pub fn identity(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        100.0 * self.identities() as f64 / self.len() as f64
    }
}

/// Every optimal local alignment of one sequence pair, in max-cell discovery order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentReport {
    pub score: Score,
    pub alignments: Vec<LocalAlignment>,
}

impl AlignmentReport {
    /// Report for a pair with no positive-scoring position
    pub fn no_alignment() -> Self {
        Self {
            score: 0,
            alignments: Vec::new(),
        }
    }

    /// Keeps the first occurrence of each distinct alignment.
    pub fn from_alignments(score: Score, alignments: Vec<LocalAlignment>) -> Self {
        let mut seen = HashSet::new();
        let alignments = alignments
            .into_iter()
            .filter(|a| seen.insert(a.clone()))
            .collect();

        Self { score, alignments }
    }

    /// False when no alignment was found
    pub fn found(&self) -> bool {
        !self.alignments.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.alignments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.alignments.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LocalAlignment> {
        self.alignments.iter()
    }

    pub fn best(&self) -> Option<&LocalAlignment> {
        self.alignments.first()
    }
}

impl<'a> IntoIterator for &'a AlignmentReport {
    type Item = &'a LocalAlignment;
    type IntoIter = std::slice::Iter<'a, LocalAlignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.alignments.iter()
    }
}
