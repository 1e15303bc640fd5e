/// Smith-Waterman local alignment
use super::matrix::{self, FillStrategy, MatrixFill};
use super::report::{AlignmentReport, LocalAlignment};
use super::scoring::{GapPenalty, ScoringMatrix};
use super::traceback::{traceback, TracebackPriority};
use crate::bio::sequence::Sequence;
use crate::{LocalignError, Result};
use rayon::prelude::*;

pub struct SmithWaterman<S: ScoringMatrix> {
    scoring: S,
    gap: GapPenalty,
    priority: TracebackPriority,
    fill_strategy: FillStrategy,
    parallel_traceback: bool,
}

impl<S: ScoringMatrix> SmithWaterman<S> {
    pub fn new(scoring: S, gap: GapPenalty) -> Self {
        Self {
            scoring,
            gap,
            priority: TracebackPriority::default(),
            fill_strategy: FillStrategy::default(),
            parallel_traceback: false,
        }
    }

    pub fn with_priority(mut self, priority: TracebackPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_fill_strategy(mut self, strategy: FillStrategy) -> Self {
        self.fill_strategy = strategy;
        self
    }

    /// Trace distinct max cells on the rayon pool
    pub fn with_parallel_traceback(mut self, enabled: bool) -> Self {
        self.parallel_traceback = enabled;
        self
    }

    pub fn scoring(&self) -> &S {
        &self.scoring
    }

    pub fn gap(&self) -> GapPenalty {
        self.gap
    }

    pub fn priority(&self) -> &TracebackPriority {
        &self.priority
    }

    pub fn build_matrix(&self, seq1: &[u8], seq2: &[u8]) -> Result<MatrixFill> {
        matrix::build(seq1, seq2, &self.scoring, self.gap, self.fill_strategy)
    }

    pub fn align(&self, seq1: &[u8], seq2: &[u8]) -> Result<AlignmentReport> {
        let fill = self.build_matrix(seq1, seq2)?;
        self.align_with_matrix(&fill, seq1, seq2)
    }

    /// Fill the matrix for two loaded sequences; empty inputs are reported by id.
    pub fn fill_sequences(&self, seq1: &Sequence, seq2: &Sequence) -> Result<MatrixFill> {
        for seq in [seq1, seq2] {
            if seq.is_empty() {
                return Err(LocalignError::EmptySequence(format!(
                    "sequence '{}' has zero length",
                    seq.id
                )));
            }
        }

        let _span = tracing::debug_span!("fill", seq1 = %seq1.id, seq2 = %seq2.id).entered();
        self.build_matrix(&seq1.sequence, &seq2.sequence)
    }

    pub fn align_sequences(&self, seq1: &Sequence, seq2: &Sequence) -> Result<AlignmentReport> {
        let fill = self.fill_sequences(seq1, seq2)?;
        self.align_with_matrix(&fill, &seq1.sequence, &seq2.sequence)
    }

    /// Trace every max cell of an already filled matrix.
    ///
    /// `fill` must come from [`build_matrix`](Self::build_matrix) on the same
    /// sequences.
    pub fn align_with_matrix(
        &self,
        fill: &MatrixFill,
        seq1: &[u8],
        seq2: &[u8],
    ) -> Result<AlignmentReport> {
        if fill.is_empty() {
            tracing::debug!("no positive-scoring cell, no alignment found");
            return Ok(AlignmentReport::no_alignment());
        }

        let trace = |start| {
            traceback(
                &fill.matrix,
                seq1,
                seq2,
                &self.scoring,
                self.gap,
                start,
                &self.priority,
            )
        };

        let parallel = self.parallel_traceback && fill.max_cells.len() > 1;
        let alignments: Vec<LocalAlignment> = if parallel {
            fill.max_cells.par_iter().map(|&c| trace(c)).collect::<Result<_>>()?
        } else {
            fill.max_cells.iter().map(|&c| trace(c)).collect::<Result<_>>()?
        };

        let report = AlignmentReport::from_alignments(fill.max_score, alignments);
        tracing::debug!(
            score = report.score,
            max_cells = fill.max_cells.len(),
            alignments = report.len(),
            "traceback finished"
        );

        Ok(report)
    }
}
