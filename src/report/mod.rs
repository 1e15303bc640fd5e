use crate::bio::alignment::AlignmentReport;
use crate::bio::sequence::{Sequence, SequenceType};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod json;
pub mod matrix;
pub mod text;

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub format: Format,
    /// Alignment columns per block in text output
    pub block_width: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            format: Format::Text,
            block_width: 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Text,
    Json,
}

impl Format {
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Text => "txt",
            Format::Json => "json",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Text => write!(f, "text"),
            Format::Json => write!(f, "json"),
        }
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            _ => Err(format!("Unknown report format: {}", s)),
        }
    }
}

/// Scoring and traceback settings of one run, as shown in the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignmentParameters {
    pub sequence_type: SequenceType,
    /// Substitution matrix name, or `match/mismatch` for nucleotides
    pub scoring: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mismatch_penalty: Option<i32>,
    pub gap_penalty: i32,
    pub traceback_order: String,
    pub fill_strategy: String,
}

/// Everything a report renders for one aligned pair
#[derive(Debug, Clone, Copy)]
pub struct AlignmentRun<'a> {
    pub seq1: &'a Sequence,
    pub seq2: &'a Sequence,
    pub parameters: &'a AlignmentParameters,
    pub report: &'a AlignmentReport,
}

pub struct ReportGenerator {
    options: ReportOptions,
}

impl ReportGenerator {
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    pub fn format(&self) -> Format {
        self.options.format
    }

    pub fn generate(&self, run: &AlignmentRun<'_>) -> Result<String> {
        match self.options.format {
            Format::Text => text::generate_text_report(run, &self.options),
            Format::Json => json::generate_json_report(run),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::bio::alignment::{GapPenalty, NucleotideMatrix, SmithWaterman};

    pub struct Fixture {
        pub seq1: Sequence,
        pub seq2: Sequence,
        pub parameters: AlignmentParameters,
        pub report: AlignmentReport,
    }

    impl Fixture {
        pub fn run(&self) -> AlignmentRun<'_> {
            AlignmentRun {
                seq1: &self.seq1,
                seq2: &self.seq2,
                parameters: &self.parameters,
                report: &self.report,
            }
        }
    }

    pub fn textbook(seq1: &[u8], seq2: &[u8]) -> Fixture {
        let seq1 = Sequence::new("seq1".to_string(), seq1.to_vec());
        let seq2 = Sequence::new("seq2".to_string(), seq2.to_vec());
        let aligner = SmithWaterman::new(NucleotideMatrix::new(3, -3), GapPenalty::new(2).unwrap());
        let report = aligner.align_sequences(&seq1, &seq2).unwrap();

        Fixture {
            seq1,
            seq2,
            parameters: AlignmentParameters {
                sequence_type: SequenceType::Nucleotide,
                scoring: "match/mismatch".to_string(),
                match_score: Some(3),
                mismatch_penalty: Some(-3),
                gap_penalty: 2,
                traceback_order: "dul".to_string(),
                fill_strategy: "row-major".to_string(),
            },
            report,
        }
    }
}
