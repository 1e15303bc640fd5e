pub mod bio;
pub mod cli;
pub mod core;
pub mod report;
pub mod utils;

pub use crate::bio::alignment::{AlignmentReport, LocalAlignment, SmithWaterman};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocalignError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Unknown symbol '{symbol}' for scoring matrix {matrix}")]
    UnknownSymbol { symbol: char, matrix: &'static str },

    #[error("Empty sequence: {0}")]
    EmptySequence(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Score overflow: {len} aligned positions at up to {max_pair_score} per position exceeds i32")]
    ScoreOverflow { len: usize, max_pair_score: i32 },

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, LocalignError>;

impl From<rayon::ThreadPoolBuildError> for LocalignError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        LocalignError::Config(format!("Failed to build thread pool: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let unknown = LocalignError::UnknownSymbol {
            symbol: 'B',
            matrix: "BLOSUM62",
        };
        assert_eq!(
            unknown.to_string(),
            "Unknown symbol 'B' for scoring matrix BLOSUM62"
        );

        let empty = LocalignError::EmptySequence("seq1".to_string());
        assert_eq!(empty.to_string(), "Empty sequence: seq1");

        let overflow = LocalignError::ScoreOverflow {
            len: 10,
            max_pair_score: 5,
        };
        assert!(overflow.to_string().contains("exceeds i32"));
    }
}
