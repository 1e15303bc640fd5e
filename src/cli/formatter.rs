/// Terminal output styling shared by the commands
use crate::bio::alignment::SubstitutionMatrix;
use colored::*;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color as TableColor, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Print an info box with bullet points
pub fn info_box(title: &str, items: &[&str]) {
    println!("\n{} {}", "ℹ".cyan(), title.bold());
    for item in items {
        println!("  {} {}", "•".dimmed(), item);
    }
}

pub fn print_warning(message: &str) {
    println!(
        "\n{} {}",
        "⚠".yellow(),
        format!("Warning: {}", message).yellow()
    );
}

pub fn print_success(message: &str) {
    println!("\n{} {}", "✓".green().bold(), message);
}

pub fn print_tip(message: &str) {
    println!("\n{} {}", "→".cyan(), format!("Tip: {}", message).dimmed());
}

pub fn print_section(title: &str) {
    let width = terminal_size::terminal_size()
        .map(|(terminal_size::Width(w), _)| w as usize)
        .unwrap_or(80);
    let line = "─".repeat(width.min(60));
    println!("\n{} {}", "▶".cyan(), title.bold());
    println!("{}", line.dimmed());
}

/// Spinner style for indeterminate operations
pub fn create_spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
}

/// Spinner that draws only when stderr is a terminal and `quiet` is off
pub fn create_spinner(message: &str, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(create_spinner_style());
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Two-column table: label and value
pub fn print_stats_table(title: &str, stats: Vec<(&str, String)>) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new(title)
            .add_attribute(Attribute::Bold)
            .fg(TableColor::Cyan),
        Cell::new("").add_attribute(Attribute::Bold),
    ]);

    for (label, value) in stats {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(value).fg(TableColor::Green),
        ]);
    }

    println!("\n{}", table);
}

/// Full substitution table with residues as header row and column
pub fn substitution_table(matrix: &SubstitutionMatrix) -> Table {
    let alphabet = matrix.alphabet();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![Cell::new(matrix.name())
        .add_attribute(Attribute::Bold)
        .fg(TableColor::Cyan)];
    header.extend(
        alphabet
            .iter()
            .map(|&r| Cell::new(r as char).add_attribute(Attribute::Bold)),
    );
    table.set_header(header);

    for &a in alphabet {
        let mut row = vec![Cell::new(a as char).add_attribute(Attribute::Bold)];
        for &b in alphabet {
            let score = matrix.score(a, b).unwrap_or_default();
            let cell = Cell::new(score);
            row.push(match score {
                _ if a == b => cell.fg(TableColor::Green).add_attribute(Attribute::Bold),
                s if s > 0 => cell.fg(TableColor::Green),
                s if s < 0 => cell.fg(TableColor::Red),
                _ => cell,
            });
        }
        table.add_row(row);
    }

    table
}

pub fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs < 1.0 {
        format!("{:.1} ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.2} s", secs)
    } else {
        let whole = elapsed.as_secs();
        format!("{}m {:02}s", whole / 60, whole % 60)
    }
}

/// Disable colors for `--no-color` or a set `NO_COLOR`
pub fn init(no_color: bool) {
    if no_color || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bio::alignment::NamedMatrix;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(12)), "12.0 ms");
        assert_eq!(format_duration(Duration::from_millis(2500)), "2.50 s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 05s");
    }

    #[test]
    fn test_substitution_table_shape() {
        let table = substitution_table(NamedMatrix::Blosum62.matrix());
        assert_eq!(table.row_iter().count(), 20);
        let rendered = table.to_string();
        assert!(rendered.contains("BLOSUM62"));
        assert!(rendered.contains("11"));
    }
}
