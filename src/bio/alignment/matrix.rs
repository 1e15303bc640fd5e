//! The Smith-Waterman similarity matrix `H` and its fill.
//!
//! `H` has one row per symbol of the first sequence plus a zero row, and one
//! column per symbol of the second sequence plus a zero column. Every cell is
//! clamped at zero, so the matrix never holds a negative value.

use super::scoring::{GapPenalty, Score, ScoringMatrix};
use crate::{LocalignError, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Matrix coordinate; `i` indexes the first sequence, `j` the second
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub i: usize,
    pub j: usize,
}

impl Cell {
    pub fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreMatrix {
    rows: usize,
    cols: usize,
    data: Vec<Score>,
}

impl ScoreMatrix {
    fn zeroed(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, i: usize, j: usize) -> Score {
        self.data[i * self.cols + j]
    }

    pub fn row(&self, i: usize) -> &[Score] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    fn set(&mut self, i: usize, j: usize, value: Score) {
        self.data[i * self.cols + j] = value;
    }

    /// Every cell at `max_score` in row-major order; empty when `max_score` is 0
    fn cells_at(&self, max_score: Score) -> Vec<Cell> {
        if max_score <= 0 {
            return Vec::new();
        }
        (1..self.rows)
            .flat_map(|i| (1..self.cols).map(move |j| Cell::new(i, j)))
            .filter(|c| self.get(c.i, c.j) == max_score)
            .collect()
    }
}

/// Filled matrix together with its global maximum and every cell that reaches it
#[derive(Debug, Clone)]
pub struct MatrixFill {
    pub matrix: ScoreMatrix,
    pub max_score: Score,
    pub max_cells: Vec<Cell>,
}

impl MatrixFill {
    /// True when no positive-scoring pair exists
    pub fn is_empty(&self) -> bool {
        self.max_score == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillStrategy {
    /// Row by row, tracking the running maximum
    #[default]
    RowMajor,
    /// Anti-diagonals in parallel on the rayon pool
    Wavefront,
}

impl fmt::Display for FillStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillStrategy::RowMajor => write!(f, "row-major"),
            FillStrategy::Wavefront => write!(f, "wavefront"),
        }
    }
}

impl FromStr for FillStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "row-major" | "rowmajor" | "row_major" | "sequential" => Ok(FillStrategy::RowMajor),
            "wavefront" | "anti-diagonal" | "parallel" => Ok(FillStrategy::Wavefront),
            _ => Err(format!("Unknown fill strategy: {}", s)),
        }
    }
}

struct MaxTracker {
    score: Score,
    cells: Vec<Cell>,
}

impl MaxTracker {
    fn new() -> Self {
        Self {
            score: 0,
            cells: Vec::new(),
        }
    }

    fn observe(&mut self, i: usize, j: usize, value: Score) {
        if value > self.score {
            self.score = value;
            self.cells.clear();
            self.cells.push(Cell::new(i, j));
        } else if value == self.score && value > 0 {
            self.cells.push(Cell::new(i, j));
        }
    }
}

/// Fill `H` for `seq1` (rows) against `seq2` (columns).
///
/// # Errors
///
/// `EmptySequence` if either input is empty, `UnknownSymbol` if the scoring
/// model rejects a symbol, `ScoreOverflow` if the best possible alignment
/// score does not fit in [`Score`].
/// One byte per residue; aligned rows are built column by column from these bytes.
fn check_ascii(which: &str, seq: &[u8]) -> Result<()> {
    match seq.iter().position(|b| !b.is_ascii()) {
        Some(pos) => Err(LocalignError::InvalidInput(format!(
            "{} sequence has non-ASCII byte 0x{:02x} at position {}",
            which,
            seq[pos],
            pos + 1
        ))),
        None => Ok(()),
    }
}

pub fn build<S: ScoringMatrix + ?Sized>(
    seq1: &[u8],
    seq2: &[u8],
    scoring: &S,
    gap: GapPenalty,
    strategy: FillStrategy,
) -> Result<MatrixFill> {
    if seq1.is_empty() {
        return Err(LocalignError::EmptySequence("first sequence has zero length".to_string()));
    }
    if seq2.is_empty() {
        return Err(LocalignError::EmptySequence("second sequence has zero length".to_string()));
    }
    check_ascii("first", seq1)?;
    check_ascii("second", seq2)?;
    check_score_bound(seq1.len(), seq2.len(), scoring.max_score())?;

    let fill = match strategy {
        FillStrategy::RowMajor => fill_row_major(seq1, seq2, scoring, gap)?,
        FillStrategy::Wavefront => fill_wavefront(seq1, seq2, scoring, gap)?,
    };

    tracing::debug!(
        rows = fill.matrix.rows(),
        cols = fill.matrix.cols(),
        max_score = fill.max_score,
        max_cells = fill.max_cells.len(),
        %strategy,
        "filled similarity matrix"
    );

    Ok(fill)
}

/// Only diagonal steps add score, so a local alignment has at most
/// `min(len1, len2)` positive contributions.
fn check_score_bound(len1: usize, len2: usize, max_pair_score: Score) -> Result<()> {
    let len = len1.min(len2);
    let bound = (len as i128) * (max_pair_score.max(0) as i128);
    if bound > Score::MAX as i128 {
        return Err(LocalignError::ScoreOverflow {
            len,
            max_pair_score,
        });
    }
    Ok(())
}

#[inline]
fn cell_value<S: ScoringMatrix + ?Sized>(
    h: &ScoreMatrix,
    i: usize,
    j: usize,
    a: u8,
    b: u8,
    scoring: &S,
    gap: Score,
) -> Result<Score> {
    let diagonal = h.get(i - 1, j - 1) + scoring.score(a, b)?;
    let up = h.get(i - 1, j) - gap;
    let left = h.get(i, j - 1) - gap;
    Ok(diagonal.max(up).max(left).max(0))
}

fn fill_row_major<S: ScoringMatrix + ?Sized>(
    seq1: &[u8],
    seq2: &[u8],
    scoring: &S,
    gap: GapPenalty,
) -> Result<MatrixFill> {
    let mut h = ScoreMatrix::zeroed(seq1.len() + 1, seq2.len() + 1);
    let mut tracker = MaxTracker::new();

    for i in 1..h.rows() {
        let a = seq1[i - 1];
        for j in 1..h.cols() {
            let value = cell_value(&h, i, j, a, seq2[j - 1], scoring, gap.value())?;
            h.set(i, j, value);
            tracker.observe(i, j, value);
        }
    }

    Ok(MatrixFill {
        matrix: h,
        max_score: tracker.score,
        max_cells: tracker.cells,
    })
}

/// Cells on one anti-diagonal (`i + j == d`) depend only on the two previous
/// anti-diagonals, so each diagonal is computed in parallel against the
/// read-only matrix and written back before the next one starts.
fn fill_wavefront<S: ScoringMatrix + ?Sized>(
    seq1: &[u8],
    seq2: &[u8],
    scoring: &S,
    gap: GapPenalty,
) -> Result<MatrixFill> {
    let n = seq1.len();
    let m = seq2.len();
    let mut h = ScoreMatrix::zeroed(n + 1, m + 1);

    for d in 2..=(n + m) {
        let i_lo = d.saturating_sub(m).max(1);
        let i_hi = n.min(d - 1);
        if i_lo > i_hi {
            continue;
        }

        let diagonal: Vec<Score> = {
            let h_ref = &h;
            (i_lo..=i_hi)
                .into_par_iter()
                .map(|i| {
                    let j = d - i;
                    cell_value(h_ref, i, j, seq1[i - 1], seq2[j - 1], scoring, gap.value())
                })
                .collect::<Result<Vec<_>>>()?
        };

        for (offset, value) in diagonal.into_iter().enumerate() {
            let i = i_lo + offset;
            h.set(i, d - i, value);
        }
    }

    let max_score = h.data.iter().copied().max().unwrap_or(0);
    let max_cells = h.cells_at(max_score);

    Ok(MatrixFill {
        matrix: h,
        max_score,
        max_cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bio::alignment::scoring::NucleotideMatrix;

    fn nt(match_score: Score, mismatch: Score) -> NucleotideMatrix {
        NucleotideMatrix::new(match_score, mismatch)
    }

    #[test]
    fn test_textbook_matrix() {
        let fill = build(
            b"GGTTGACTA",
            b"TGTTACGG",
            &nt(3, -3),
            GapPenalty::new(2).unwrap(),
            FillStrategy::RowMajor,
        )
        .unwrap();

        assert_eq!(fill.matrix.rows(), 10);
        assert_eq!(fill.matrix.cols(), 9);
        assert_eq!(fill.max_score, 13);
        assert_eq!(fill.max_cells, vec![Cell::new(7, 6)]);
        assert_eq!(fill.matrix.row(4), &[0, 3, 1, 4, 9, 7, 5, 3, 2]);
        assert_eq!(fill.matrix.row(7), &[0, 0, 2, 1, 3, 8, 13, 11, 9]);
    }

    #[test]
    fn test_boundaries_are_zero() {
        let fill = build(
            b"ACGT",
            b"ACGTT",
            &nt(1, -1),
            GapPenalty::new(1).unwrap(),
            FillStrategy::RowMajor,
        )
        .unwrap();

        for i in 0..fill.matrix.rows() {
            assert_eq!(fill.matrix.get(i, 0), 0);
        }
        assert!(fill.matrix.row(0).iter().all(|&v| v == 0));
    }

    #[test]
    fn test_wavefront_matches_row_major() {
        let seq1 = b"GATTACAGATTACAGGG";
        let seq2 = b"TTGATCACAGAATTAC";
        let scoring = nt(2, -1);
        let gap = GapPenalty::new(1).unwrap();

        let row = build(seq1, seq2, &scoring, gap, FillStrategy::RowMajor).unwrap();
        let wave = build(seq1, seq2, &scoring, gap, FillStrategy::Wavefront).unwrap();

        assert_eq!(row.matrix, wave.matrix);
        assert_eq!(row.max_score, wave.max_score);
        assert_eq!(row.max_cells, wave.max_cells);
    }

    #[test]
    fn test_ties_collected_in_scan_order() {
        let fill = build(
            b"AAAGGGCCC",
            b"AAATTTCCC",
            &nt(1, -3),
            GapPenalty::new(5).unwrap(),
            FillStrategy::RowMajor,
        )
        .unwrap();

        assert_eq!(fill.max_score, 3);
        assert_eq!(fill.max_cells, vec![Cell::new(3, 3), Cell::new(9, 9)]);
    }

    #[test]
    fn test_all_zero_matrix() {
        let fill = build(
            b"AAAA",
            b"CCCC",
            &nt(1, -1),
            GapPenalty::new(1).unwrap(),
            FillStrategy::RowMajor,
        )
        .unwrap();

        assert!(fill.is_empty());
        assert!(fill.max_cells.is_empty());
    }

    #[test]
    fn test_empty_sequence_rejected() {
        let err = build(b"", b"ACGT", &nt(1, -1), GapPenalty::default(), FillStrategy::RowMajor)
            .unwrap_err();
        assert!(matches!(err, LocalignError::EmptySequence(_)));
    }

    #[test]
    fn test_non_ascii_rejected() {
        let err = build(
            b"A\xffC",
            b"A\xffC",
            &nt(1, -1),
            GapPenalty::default(),
            FillStrategy::RowMajor,
        )
        .unwrap_err();
        assert!(matches!(err, LocalignError::InvalidInput(_)));
        assert!(err.to_string().contains("0xff at position 2"), "got: {}", err);
    }

    #[test]
    fn test_score_bound() {
        assert!(check_score_bound(1_000, 1_000, 11).is_ok());
        assert!(check_score_bound(100, 1_000_000, Score::MAX).is_err());
        assert!(check_score_bound(10, 10, -5).is_ok());
    }
}
