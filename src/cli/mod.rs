pub mod commands;
pub mod formatter;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "localign",
    version,
    about = "Smith-Waterman local alignment of two sequences",
    long_about = "localign reads the first two records of a FASTA file and reports every optimal \
                  local alignment between them, using match/mismatch scoring for nucleotides or a \
                  BLOSUM/PAM substitution matrix for amino acids."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Number of threads to use (0 = all available)
    #[arg(short = 'j', long, default_value = "0", global = true)]
    pub threads: usize,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Align the first two sequences of a FASTA file
    Align(commands::align::AlignArgs),

    /// List or print the built-in substitution matrices
    Matrices(commands::matrices::MatricesArgs),

    /// Write a default configuration file
    Config(commands::config::ConfigArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_negative_values_parse() {
        let cli = Cli::try_parse_from([
            "localign", "align", "-f", "in.fasta", "-t", "nt", "-m", "3", "-x", "-3", "-g", "-2",
        ])
        .unwrap();

        match cli.command {
            Commands::Align(args) => {
                assert_eq!(args.match_score, Some(3));
                assert_eq!(args.mismatch, Some(-3));
                assert_eq!(args.gap, Some(-2));
            }
            _ => panic!("expected align"),
        }
    }
}
