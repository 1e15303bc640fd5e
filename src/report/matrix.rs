//! Plain-text dump of a filled similarity matrix.
//!
//! Each cell is printed as its value followed by the direction the traceback
//! would take from it: `d`, `u`, `l`, or `z` for a zero cell.

use crate::bio::alignment::matrix::Cell;
use crate::bio::alignment::traceback::{predecessor, TracebackPriority};
use crate::bio::alignment::{GapPenalty, ScoreMatrix, ScoringMatrix};
use anyhow::Result;
use std::fmt::Write;

pub fn render_matrix<S: ScoringMatrix + ?Sized>(
    h: &ScoreMatrix,
    seq1: &[u8],
    seq2: &[u8],
    scoring: &S,
    gap: GapPenalty,
    priority: &TracebackPriority,
) -> Result<String> {
    let mut cells = Vec::with_capacity(h.rows());
    for i in 0..h.rows() {
        let mut row = Vec::with_capacity(h.cols());
        for j in 0..h.cols() {
            let dir = predecessor(h, seq1, seq2, scoring, gap, Cell::new(i, j), priority)?
                .map_or('z', |d| d.symbol());
            row.push(format!("{}{}", h.get(i, j), dir));
        }
        cells.push(row);
    }

    let width = cells
        .iter()
        .flatten()
        .map(String::len)
        .max()
        .unwrap_or(2);

    let mut output = String::new();
    write!(&mut output, "{:>1} {:>width$}", "-", "-", width = width)?;
    for &symbol in seq2 {
        write!(&mut output, " {:>width$}", symbol as char, width = width)?;
    }
    writeln!(&mut output)?;

    for (i, row) in cells.iter().enumerate() {
        let label = if i == 0 { '-' } else { seq1[i - 1] as char };
        write!(&mut output, "{}", label)?;
        for cell in row {
            write!(&mut output, " {:>width$}", cell, width = width)?;
        }
        writeln!(&mut output)?;
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bio::alignment::matrix::{build, FillStrategy};
    use crate::bio::alignment::NucleotideMatrix;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_small_matrix() {
        let scoring = NucleotideMatrix::new(2, -1);
        let gap = GapPenalty::new(1).unwrap();
        let fill = build(b"AC", b"AG", &scoring, gap, FillStrategy::RowMajor).unwrap();

        let text = render_matrix(
            &fill.matrix,
            b"AC",
            b"AG",
            &scoring,
            gap,
            &TracebackPriority::default(),
        )
        .unwrap();

        let expected = "\
-  -  A  G
- 0z 0z 0z
A 0z 2d 1l
C 0z 1u 1d
";
        assert_eq!(text, expected);
    }
}
