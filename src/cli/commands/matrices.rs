use crate::bio::alignment::NamedMatrix;
use crate::cli::formatter::{self, print_stats_table, print_tip};
use clap::Args;

#[derive(Args, Debug)]
pub struct MatricesArgs {
    /// Print the full table of one matrix
    #[arg(long, value_name = "MATRIX")]
    pub show: Option<NamedMatrix>,
}

pub fn run(args: MatricesArgs) -> anyhow::Result<()> {
    match args.show {
        Some(named) => {
            formatter::print_section(&format!("{} substitution matrix", named));
            println!("{}", formatter::substitution_table(named.matrix()));
        }
        None => {
            let rows: Vec<(&str, String)> = NamedMatrix::ALL
                .iter()
                .map(|m| {
                    let table = m.matrix();
                    (
                        m.name(),
                        format!("max pair score {}", table.max_score()),
                    )
                })
                .collect();
            print_stats_table("Substitution matrices", rows);
            print_tip("use --show <MATRIX> to print a table, -s <MATRIX> with align to use it");
        }
    }

    Ok(())
}
