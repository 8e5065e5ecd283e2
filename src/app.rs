//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the CSV (with distinct load-time diagnostics)
//! - runs the classification batch
//! - prints the results table and summary
//! - writes optional exports

use std::io::Write;

use clap::Parser;

use crate::cli::{AnalyzeArgs, Command};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `senti` binary.
pub fn run() -> Result<(), AppError> {
    // We want bare `senti` and `senti reviews.csv` to behave like `senti tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Analyze(args) => handle_analyze(args),
        Command::Tui(args) => crate::tui::run(args),
    }
}

fn handle_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let path = match &args.file {
        Some(path) => crate::cli::picker::validate_csv_path(path)?,
        None => crate::cli::picker::prompt_for_csv_path()?,
    };

    let table = crate::io::ingest::load_records(&path)?;
    for row_error in &table.row_errors {
        eprintln!("line {}: {}", row_error.line, row_error.message);
    }

    // Progress goes to stderr so stdout stays a clean table for piping.
    let mut last_pct = u32::MAX;
    let run = pipeline::run_analysis_with_table(table, |fraction| {
        let pct = (fraction * 100.0).round() as u32;
        if pct != last_pct {
            last_pct = pct;
            eprint!("\rClassifying... {pct:>3}%");
            let _ = std::io::stderr().flush();
        }
    })?;
    eprintln!();

    println!("{}", crate::report::format_results_table(&run.batch.results, args.top));
    println!("{}", crate::report::format_run_summary(&run.table, &run.batch));

    if let Some(path) = &args.export {
        crate::io::export::write_results_csv(path, &run.batch)?;
        eprintln!("Wrote results CSV: {}", path.display());
    }
    if let Some(path) = &args.export_summary {
        crate::io::export::write_summary_json(path, &run.table, &run.batch.summary)?;
        eprintln!("Wrote summary JSON: {}", path.display());
    }

    Ok(())
}

/// Rewrite argv so `senti` defaults to `senti tui`.
///
/// Rules:
/// - `senti`                     -> `senti tui`
/// - `senti reviews.csv`         -> `senti tui reviews.csv`
/// - `senti --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "analyze" | "tui");
    if is_subcommand {
        return argv;
    }

    argv.insert(1, "tui".to_string());
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        assert_eq!(rewrite_args(argv(&["senti"])), argv(&["senti", "tui"]));
    }

    #[test]
    fn bare_path_defaults_to_tui() {
        assert_eq!(
            rewrite_args(argv(&["senti", "reviews.csv"])),
            argv(&["senti", "tui", "reviews.csv"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(argv(&["senti", "analyze", "a.csv"])),
            argv(&["senti", "analyze", "a.csv"])
        );
        assert_eq!(rewrite_args(argv(&["senti", "--help"])), argv(&["senti", "--help"]));
        assert_eq!(rewrite_args(argv(&["senti", "-V"])), argv(&["senti", "-V"]));
    }
}
