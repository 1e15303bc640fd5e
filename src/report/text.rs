use crate::bio::alignment::traceback::GAP;
use crate::bio::alignment::LocalAlignment;
use crate::report::{AlignmentRun, ReportOptions};
use anyhow::Result;
use std::fmt::Write;

pub fn generate_text_report(run: &AlignmentRun<'_>, options: &ReportOptions) -> Result<String> {
    let mut output = String::new();
    let params = run.parameters;

    writeln!(&mut output, "Smith-Waterman Local Alignment")?;
    writeln!(&mut output, "==============================")?;
    writeln!(&mut output)?;

    writeln!(&mut output, "Input")?;
    writeln!(&mut output, "-----")?;
    writeln!(&mut output, "  Sequence 1: {} ({} symbols)", run.seq1.id, run.seq1.len())?;
    writeln!(&mut output, "  Sequence 2: {} ({} symbols)", run.seq2.id, run.seq2.len())?;
    writeln!(&mut output)?;

    writeln!(&mut output, "Parameters")?;
    writeln!(&mut output, "----------")?;
    writeln!(&mut output, "  Sequence type: {}", params.sequence_type.description())?;
    match (params.match_score, params.mismatch_penalty) {
        (Some(m), Some(mm)) => {
            writeln!(&mut output, "  Match: {}", m)?;
            writeln!(&mut output, "  Mismatch penalty: {}", mm)?;
        }
        _ => writeln!(&mut output, "  Matrix: {}", params.scoring)?,
    }
    writeln!(&mut output, "  Gap penalty: {}", params.gap_penalty)?;
    writeln!(&mut output, "  Traceback order: {}", params.traceback_order)?;
    writeln!(&mut output)?;

    writeln!(&mut output, "Alignment")?;
    writeln!(&mut output, "---------")?;
    writeln!(&mut output, "  Score: {}", run.report.score)?;

    if !run.report.found() {
        writeln!(&mut output, "  No alignment found")?;
        return Ok(output);
    }

    writeln!(&mut output, "  Alignments: {}", run.report.len())?;
    writeln!(&mut output)?;

    let label_width = run.seq1.id.len().max(run.seq2.id.len()) + 4;
    let block_width = options.block_width.max(1);

    for (n, aln) in run.report.iter().enumerate() {
        writeln!(
            &mut output,
            "  #{}  {} {}-{}  {} {}-{}  identity {:.1}% ({}/{})  gaps {}",
            n + 1,
            run.seq1.id,
            aln.seq1_start,
            aln.seq1_end,
            run.seq2.id,
            aln.seq2_start,
            aln.seq2_end,
            aln.identity(),
            aln.identities(),
            aln.len(),
            aln.gaps()
        )?;
        writeln!(&mut output)?;
        write_blocks(&mut output, aln, &run.seq1.id, &run.seq2.id, label_width, block_width)?;
    }

    Ok(output)
}

/// Alignment in blocks of `seq1 / markers / seq2`, each line tagged with the
/// positions of its first and last residue
fn write_blocks(
    output: &mut String,
    aln: &LocalAlignment,
    id1: &str,
    id2: &str,
    label_width: usize,
    block_width: usize,
) -> Result<()> {
    let row1 = aln.aligned_seq1.as_bytes();
    let row2 = aln.aligned_seq2.as_bytes();
    let markers: Vec<char> = aln.markers().chars().collect();

    let pos_width = aln.seq1_end.max(aln.seq2_end).to_string().len();
    let mut next1 = aln.seq1_start;
    let mut next2 = aln.seq2_start;

    for start in (0..row1.len()).step_by(block_width) {
        let end = (start + block_width).min(row1.len());
        let chunk1 = &row1[start..end];
        let chunk2 = &row2[start..end];

        let (from1, to1) = block_span(chunk1, &mut next1);
        let (from2, to2) = block_span(chunk2, &mut next2);

        writeln!(
            output,
            "  {:<lw$}{:>pw$} {} {}",
            id1,
            from1,
            String::from_utf8_lossy(chunk1),
            to1,
            lw = label_width,
            pw = pos_width
        )?;
        writeln!(
            output,
            "  {:<lw$}{:>pw$} {}",
            "",
            "",
            markers[start..end].iter().collect::<String>(),
            lw = label_width,
            pw = pos_width
        )?;
        writeln!(
            output,
            "  {:<lw$}{:>pw$} {} {}",
            id2,
            from2,
            String::from_utf8_lossy(chunk2),
            to2,
            lw = label_width,
            pw = pos_width
        )?;
        writeln!(output)?;
    }

    Ok(())
}

/// First and last residue position covered by `chunk`, advancing `next`
fn block_span(chunk: &[u8], next: &mut usize) -> (usize, usize) {
    let residues = chunk.iter().filter(|&&c| c != GAP).count();
    let from = *next;
    *next += residues;
    if residues == 0 {
        (from.saturating_sub(1), from.saturating_sub(1))
    } else {
        (from, *next - 1)
    }
}
