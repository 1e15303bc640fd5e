use crate::bio::alignment::{
    FillStrategy, GapPenalty, NamedMatrix, ScoringMatrix, ScoringModel, SmithWaterman,
    TracebackPriority,
};
use crate::bio::fasta;
use crate::bio::sequence::{Sequence, SequenceType};
use crate::cli::formatter::{self, info_box, print_success, print_warning};
use crate::core::config::{self, AlignmentConfig, Config};
use crate::report::{matrix, AlignmentParameters, AlignmentRun, Format, ReportGenerator, ReportOptions};
use crate::utils::{logging, parallel};
use crate::LocalignError;
use clap::Args;
use colored::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub const REPORT_STEM: &str = "alignment_report";
pub const MATRIX_FILE: &str = "alignment_matrix.txt";

#[derive(Args, Debug)]
pub struct AlignArgs {
    /// FASTA file holding the two sequences (first two records are used)
    #[arg(short = 'f', long, value_name = "FILE")]
    pub fasta: PathBuf,

    /// Sequence type: nt (nucleotide) or aa (amino acid); detected when omitted
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub sequence_type: Option<SequenceType>,

    /// Substitution matrix for amino acids (BLOSUM45/50/62/80/90, PAM30/70/250)
    #[arg(short = 's', long, value_name = "MATRIX")]
    pub matrix: Option<NamedMatrix>,

    /// Nucleotide match score
    #[arg(short = 'm', long = "match", value_name = "SCORE", allow_negative_numbers = true)]
    pub match_score: Option<i32>,

    /// Nucleotide mismatch penalty, added as-is (use a negative value to penalize)
    #[arg(short = 'x', long, value_name = "SCORE", allow_negative_numbers = true)]
    pub mismatch: Option<i32>,

    /// Linear gap penalty; the sign is ignored
    #[arg(short = 'g', long, value_name = "PENALTY", allow_negative_numbers = true)]
    pub gap: Option<i32>,

    /// Output folder (default: current directory)
    #[arg(short = 'o', long, value_name = "FOLDER")]
    pub output: Option<PathBuf>,

    /// Report format (text, json)
    #[arg(long)]
    pub format: Option<Format>,

    /// Traceback tie-break order as three letters, e.g. dul or lud
    #[arg(long, value_name = "ORDER")]
    pub traceback_order: Option<TracebackPriority>,

    /// Fill the matrix by anti-diagonals in parallel
    #[arg(long)]
    pub wavefront: bool,

    /// Trace tied maxima in parallel
    #[arg(long)]
    pub parallel_traceback: bool,

    /// Do not write the alignment matrix file
    #[arg(long)]
    pub no_matrix: bool,

    /// Do not write the run log to the output folder
    #[arg(long)]
    pub no_log: bool,

    /// Configuration file
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Only print the report
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Number of threads (passed from global)
    #[arg(skip)]
    pub threads: usize,
}

impl AlignArgs {
    /// File values first, then any flag given on the command line
    fn resolve(&self, mut config: Config) -> Config {
        let alignment = &mut config.alignment;
        if let Some(t) = self.sequence_type {
            alignment.sequence_type = Some(t);
        }
        if let Some(m) = self.matrix {
            alignment.matrix = m;
        }
        if let Some(m) = self.match_score {
            alignment.match_score = m;
        }
        if let Some(x) = self.mismatch {
            alignment.mismatch_penalty = x;
        }
        if let Some(g) = self.gap {
            alignment.gap_penalty = g;
        }
        if let Some(order) = self.traceback_order {
            alignment.traceback_order = order;
        }
        if self.wavefront {
            alignment.fill_strategy = FillStrategy::Wavefront;
        }
        if self.parallel_traceback {
            alignment.parallel_traceback = true;
        }
        if self.threads != 0 {
            config.performance.threads = self.threads;
        }

        let output = &mut config.output;
        if let Some(dir) = &self.output {
            output.directory = Some(dir.to_string_lossy().into_owned());
        }
        if let Some(format) = self.format {
            output.format = format;
        }
        if self.no_matrix {
            output.write_matrix = false;
        }
        if self.no_log {
            output.write_log = false;
        }

        config
    }
}

pub fn run(args: AlignArgs) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => config::default_config(),
    };
    let config = args.resolve(config);

    let threads = parallel::configure_thread_pool(config.performance.threads)
        .map_err(LocalignError::from)?;
    tracing::debug!(threads, "configured thread pool");

    let out_dir = config
        .output
        .directory
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir).map_err(LocalignError::from)?;

    let log_path = if config.output.write_log {
        Some(logging::attach_run_log(&out_dir).map_err(LocalignError::from)?)
    } else {
        None
    };

    let result = align_to_folder(&args, &config, &out_dir, log_path.as_deref(), start);
    if let Err(e) = &result {
        tracing::error!("{:#}", e);
    }
    logging::detach_run_log();
    result
}

fn align_to_folder(
    args: &AlignArgs,
    config: &Config,
    out_dir: &Path,
    log_path: Option<&Path>,
    start: Instant,
) -> anyhow::Result<()> {
    tracing::info!(fasta = %args.fasta.display(), "Smith-Waterman local alignment");

    let (seq1, seq2) = fasta::read_pair(&args.fasta)?;
    let seq_type = resolve_sequence_type(&config.alignment, &seq1, &seq2)?;

    let (model, parameters) = scoring_for(&config.alignment, seq_type);
    let gap = GapPenalty::new(config.alignment.gap_penalty.saturating_abs())?;

    tracing::info!(
        seq1 = %seq1.id,
        len1 = seq1.len(),
        seq2 = %seq2.id,
        len2 = seq2.len(),
        sequence_type = %seq_type,
        scoring = %model.name(),
        gap = gap.value(),
        traceback_order = %config.alignment.traceback_order,
        "parameters"
    );

    let aligner = SmithWaterman::new(model, gap)
        .with_priority(config.alignment.traceback_order)
        .with_fill_strategy(config.alignment.fill_strategy)
        .with_parallel_traceback(config.alignment.parallel_traceback);

    let spinner = formatter::create_spinner(
        &format!("Aligning {} x {}...", seq1.len(), seq2.len()),
        args.quiet,
    );
    let outcome = aligner.fill_sequences(&seq1, &seq2).and_then(|fill| {
        let report = aligner.align_with_matrix(&fill, &seq1.sequence, &seq2.sequence)?;
        Ok((fill, report))
    });
    spinner.finish_and_clear();
    let (fill, report) = outcome?;

    tracing::info!(
        score = report.score,
        alignments = report.len(),
        "alignment finished"
    );
    if !report.found() {
        tracing::info!("no alignment found");
    }

    let run = AlignmentRun {
        seq1: &seq1,
        seq2: &seq2,
        parameters: &parameters,
        report: &report,
    };
    let generator = ReportGenerator::new(ReportOptions {
        format: config.output.format,
        block_width: config.output.block_width,
    });
    let rendered = generator.generate(&run)?;

    let report_path = out_dir.join(format!("{}.{}", REPORT_STEM, generator.format().extension()));
    std::fs::write(&report_path, &rendered).map_err(LocalignError::from)?;

    let matrix_path = if config.output.write_matrix {
        let dump = matrix::render_matrix(
            &fill.matrix,
            &seq1.sequence,
            &seq2.sequence,
            aligner.scoring(),
            gap,
            aligner.priority(),
        )?;
        let path = out_dir.join(MATRIX_FILE);
        std::fs::write(&path, dump).map_err(LocalignError::from)?;
        Some(path)
    } else {
        None
    };

    print!("{}", rendered);

    let elapsed = formatter::format_duration(start.elapsed());
    tracing::info!(elapsed = %elapsed, report = %report_path.display(), "done");

    if !args.quiet {
        let report_line = format!("Report: {}", report_path.display());
        let matrix_line = matrix_path
            .as_ref()
            .map(|p| format!("Matrix: {}", p.display()));
        let log_line = log_path.map(|p| format!("Log: {}", p.display()));

        let mut items = vec![report_line.as_str()];
        items.extend(matrix_line.as_deref());
        items.extend(log_line.as_deref());
        info_box("Output files", &items);

        if report.found() {
            print_success(&format!(
                "Score {} with {} alignment(s) in {}",
                report.score.to_string().bold(),
                report.len(),
                elapsed
            ));
        } else {
            print_warning(&format!("No alignment found ({})", elapsed));
        }
    }

    Ok(())
}

/// Type from the configuration, or protein if either sequence looks like one;
/// both sequences are then checked against that alphabet.
fn resolve_sequence_type(
    config: &AlignmentConfig,
    seq1: &Sequence,
    seq2: &Sequence,
) -> crate::Result<SequenceType> {
    let seq_type = config.sequence_type.unwrap_or_else(|| {
        if seq1.detect_type() == SequenceType::Protein || seq2.detect_type() == SequenceType::Protein {
            SequenceType::Protein
        } else {
            SequenceType::Nucleotide
        }
    });

    seq1.validate_alphabet(seq_type)?;
    seq2.validate_alphabet(seq_type)?;
    Ok(seq_type)
}

fn scoring_for(config: &AlignmentConfig, seq_type: SequenceType) -> (ScoringModel, AlignmentParameters) {
    let gap_penalty = config.gap_penalty.saturating_abs();
    let traceback_order = config.traceback_order.to_string();
    let fill_strategy = config.fill_strategy.to_string();

    match seq_type {
        SequenceType::Nucleotide => (
            ScoringModel::nucleotide(config.match_score, config.mismatch_penalty),
            AlignmentParameters {
                sequence_type: seq_type,
                scoring: "match/mismatch".to_string(),
                match_score: Some(config.match_score),
                mismatch_penalty: Some(config.mismatch_penalty),
                gap_penalty,
                traceback_order,
                fill_strategy,
            },
        ),
        SequenceType::Protein => (
            ScoringModel::substitution(config.matrix),
            AlignmentParameters {
                sequence_type: seq_type,
                scoring: config.matrix.name().to_string(),
                match_score: None,
                mismatch_penalty: None,
                gap_penalty,
                traceback_order,
                fill_strategy,
            },
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(id: &str, s: &[u8]) -> Sequence {
        Sequence::new(id.to_string(), s.to_vec())
    }

    #[test]
    fn test_detects_protein_from_either_sequence() {
        let config = AlignmentConfig::default();
        let t = resolve_sequence_type(&config, &seq("a", b"ACGT"), &seq("b", b"MKWLV")).unwrap();
        assert_eq!(t, SequenceType::Protein);

        let t = resolve_sequence_type(&config, &seq("a", b"ACGT"), &seq("b", b"ACGN")).unwrap();
        assert_eq!(t, SequenceType::Nucleotide);
    }

    #[test]
    fn test_forced_type_validates_alphabet() {
        let config = AlignmentConfig {
            sequence_type: Some(SequenceType::Nucleotide),
            ..AlignmentConfig::default()
        };
        let err = resolve_sequence_type(&config, &seq("a", b"ACGT"), &seq("b", b"MKWLV"))
            .unwrap_err();
        assert!(matches!(err, LocalignError::InvalidInput(_)));
    }

    #[test]
    fn test_flags_override_config() {
        let args = AlignArgs {
            fasta: PathBuf::from("in.fasta"),
            sequence_type: None,
            matrix: Some(NamedMatrix::Pam70),
            match_score: None,
            mismatch: Some(-2),
            gap: Some(-3),
            output: Some(PathBuf::from("out")),
            format: Some(Format::Json),
            traceback_order: None,
            wavefront: true,
            parallel_traceback: false,
            no_matrix: true,
            no_log: false,
            config: None,
            quiet: true,
            threads: 2,
        };
        let mut base = Config::default();
        base.alignment.match_score = 5;

        let config = args.resolve(base);
        assert_eq!(config.alignment.matrix, NamedMatrix::Pam70);
        assert_eq!(config.alignment.match_score, 5);
        assert_eq!(config.alignment.mismatch_penalty, -2);
        assert_eq!(config.alignment.gap_penalty, -3);
        assert_eq!(config.alignment.fill_strategy, FillStrategy::Wavefront);
        assert_eq!(config.output.directory.as_deref(), Some("out"));
        assert_eq!(config.output.format, Format::Json);
        assert!(!config.output.write_matrix);
        assert!(config.output.write_log);
        assert_eq!(config.performance.threads, 2);
    }

    #[test]
    fn test_scoring_parameters() {
        let config = AlignmentConfig {
            gap_penalty: -2,
            ..AlignmentConfig::default()
        };
        let (model, params) = scoring_for(&config, SequenceType::Protein);
        assert_eq!(model.name(), "BLOSUM62");
        assert_eq!(params.gap_penalty, 2);
        assert_eq!(params.match_score, None);

        let (model, params) = scoring_for(&config, SequenceType::Nucleotide);
        assert_eq!(model.name(), "match/mismatch");
        assert_eq!(params.match_score, Some(1));
        assert_eq!(params.mismatch_penalty, Some(0));
    }
}
