pub mod matrices;
pub mod matrix;
pub mod report;
pub mod scoring;
pub mod sw_aligner;
mod tables;
pub mod traceback;

pub use matrices::{NamedMatrix, SubstitutionMatrix};
pub use matrix::{Cell, FillStrategy, MatrixFill, ScoreMatrix};
pub use report::{AlignmentReport, LocalAlignment};
pub use scoring::{GapPenalty, NucleotideMatrix, Score, ScoringMatrix, ScoringModel};
pub use sw_aligner::SmithWaterman;
pub use traceback::{Direction, TracebackPriority};
