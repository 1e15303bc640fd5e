/// Traceback from a maximum cell back to the first zero cell
use super::matrix::{Cell, ScoreMatrix};
use super::report::LocalAlignment;
use super::scoring::{GapPenalty, Score, ScoringMatrix};
use crate::{LocalignError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const GAP: u8 = b'-';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Symbol against symbol
    Diagonal,
    /// First-sequence symbol against a gap
    Up,
    /// Gap against a second-sequence symbol
    Left,
}

impl Direction {
    pub fn symbol(&self) -> char {
        match self {
            Direction::Diagonal => 'd',
            Direction::Up => 'u',
            Direction::Left => 'l',
        }
    }

    fn from_symbol(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'd' => Some(Direction::Diagonal),
            'u' => Some(Direction::Up),
            'l' => Some(Direction::Left),
            _ => None,
        }
    }
}

/// Order in which predecessors are tried when more than one reproduces a cell.
///
/// Written as three letters, e.g. `dul` (the default) or `lud`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TracebackPriority([Direction; 3]);

impl TracebackPriority {
    pub fn new(order: [Direction; 3]) -> Result<Self> {
        let distinct = order[0] != order[1] && order[0] != order[2] && order[1] != order[2];
        if !distinct {
            return Err(LocalignError::InvalidInput(format!(
                "traceback priority must name each direction once, got {:?}",
                order
            )));
        }
        Ok(Self(order))
    }

    pub fn directions(&self) -> &[Direction; 3] {
        &self.0
    }
}

impl Default for TracebackPriority {
    fn default() -> Self {
        Self([Direction::Diagonal, Direction::Up, Direction::Left])
    }
}

impl fmt::Display for TracebackPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in &self.0 {
            write!(f, "{}", d.symbol())?;
        }
        Ok(())
    }
}

impl FromStr for TracebackPriority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let directions: Vec<Direction> = s
            .trim()
            .chars()
            .map(|c| Direction::from_symbol(c).ok_or_else(|| format!("Unknown direction '{}' in {}", c, s)))
            .collect::<std::result::Result<_, _>>()?;

        let order: [Direction; 3] = directions
            .try_into()
            .map_err(|_| format!("Traceback priority needs three directions, got {}", s))?;

        TracebackPriority::new(order).map_err(|e| e.to_string())
    }
}

impl TryFrom<String> for TracebackPriority {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TracebackPriority> for String {
    fn from(value: TracebackPriority) -> Self {
        value.to_string()
    }
}

/// First direction in `priority` whose predecessor reproduces `H[i][j]`.
///
/// `None` for a zero cell, which is where a local alignment starts.
pub fn predecessor<S: ScoringMatrix + ?Sized>(
    h: &ScoreMatrix,
    seq1: &[u8],
    seq2: &[u8],
    scoring: &S,
    gap: GapPenalty,
    cell: Cell,
    priority: &TracebackPriority,
) -> Result<Option<Direction>> {
    let Cell { i, j } = cell;
    let value = h.get(i, j);
    if value == 0 || i == 0 || j == 0 {
        return Ok(None);
    }

    for &direction in priority.directions() {
        let candidate: Score = match direction {
            Direction::Diagonal => h.get(i - 1, j - 1) + scoring.score(seq1[i - 1], seq2[j - 1])?,
            Direction::Up => h.get(i - 1, j) - gap.value(),
            Direction::Left => h.get(i, j - 1) - gap.value(),
        };
        if candidate == value {
            return Ok(Some(direction));
        }
    }

    Err(LocalignError::Other(format!(
        "no predecessor reproduces H[{}][{}] = {}",
        i, j, value
    )))
}

/// Walk back from `start` and return the aligned subsequences.
///
/// The matrix must have been filled from the same sequences, scoring and gap.
pub fn traceback<S: ScoringMatrix + ?Sized>(
    h: &ScoreMatrix,
    seq1: &[u8],
    seq2: &[u8],
    scoring: &S,
    gap: GapPenalty,
    start: Cell,
    priority: &TracebackPriority,
) -> Result<LocalAlignment> {
    let score = h.get(start.i, start.j);
    let mut aligned1 = Vec::new();
    let mut aligned2 = Vec::new();
    let mut cell = start;

    while let Some(direction) = predecessor(h, seq1, seq2, scoring, gap, cell, priority)? {
        let Cell { i, j } = cell;
        cell = match direction {
            Direction::Diagonal => {
                aligned1.push(seq1[i - 1]);
                aligned2.push(seq2[j - 1]);
                Cell::new(i - 1, j - 1)
            }
            Direction::Up => {
                aligned1.push(seq1[i - 1]);
                aligned2.push(GAP);
                Cell::new(i - 1, j)
            }
            Direction::Left => {
                aligned1.push(GAP);
                aligned2.push(seq2[j - 1]);
                Cell::new(i, j - 1)
            }
        };
    }

    aligned1.reverse();
    aligned2.reverse();

    tracing::trace!(
        start_i = start.i,
        start_j = start.j,
        end_i = cell.i,
        end_j = cell.j,
        columns = aligned1.len(),
        "traceback complete"
    );

    Ok(LocalAlignment {
        score,
        aligned_seq1: aligned_row(aligned1)?,
        aligned_seq2: aligned_row(aligned2)?,
        seq1_start: cell.i + 1,
        seq1_end: start.i,
        seq2_start: cell.j + 1,
        seq2_end: start.j,
    })
}

fn aligned_row(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes)
        .map_err(|e| LocalignError::InvalidInput(format!("aligned row is not ASCII: {}", e)))
}
