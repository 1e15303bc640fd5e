use clap::Parser;
use colored::*;
use localign::cli::{formatter, Cli, Commands};
use localign::utils::logging;
use localign::LocalignError;
use std::process;

fn main() {
    let cli = Cli::parse();

    logging::init(cli.verbose);
    formatter::init(cli.no_color);

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(exit_code(&e));
    }
}

fn exit_code(e: &anyhow::Error) -> i32 {
    match e.downcast_ref::<LocalignError>() {
        Some(LocalignError::Config(_)) => 2,
        Some(LocalignError::Io(_)) => 3,
        Some(
            LocalignError::Parse(_)
            | LocalignError::InvalidInput(_)
            | LocalignError::UnknownSymbol { .. }
            | LocalignError::EmptySequence(_)
            | LocalignError::ScoreOverflow { .. },
        ) => 4,
        Some(LocalignError::Other(_)) => 1,
        None if e.downcast_ref::<std::io::Error>().is_some() => 3,
        None => 1,
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Align(mut args) => {
            args.threads = cli.threads;
            localign::cli::commands::align::run(args)
        }
        Commands::Matrices(args) => localign::cli::commands::matrices::run(args),
        Commands::Config(args) => localign::cli::commands::config::run(args),
    }
}
