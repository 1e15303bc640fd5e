use crate::core::config::{default_config, save_config};
use crate::cli::formatter::print_success;
use crate::LocalignError;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Where to write the configuration
    #[arg(short, long, value_name = "FILE", default_value = "localign.toml")]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    if args.output.exists() && !args.force {
        return Err(LocalignError::Config(format!(
            "{} already exists (pass --force to overwrite)",
            args.output.display()
        ))
        .into());
    }

    save_config(&args.output, &default_config())?;
    tracing::debug!(path = %args.output.display(), "wrote default configuration");
    print_success(&format!("Wrote default configuration to {}", args.output.display()));

    Ok(())
}
