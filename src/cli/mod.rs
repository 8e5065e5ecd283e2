//! Command-line parsing for the CSV sentiment screener.
//!
//! Argument parsing and command dispatch stay separate from the
//! classification/batch code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "senti", version, about = "CSV sentiment screener (VADER-based)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify a CSV's first column, print the results table and summary.
    Analyze(AnalyzeArgs),
    /// Launch the interactive TUI.
    ///
    /// Uses the same load + batch pipeline as `senti analyze`, but renders
    /// results in a terminal UI with a live progress gauge.
    Tui(AnalyzeArgs),
}

/// Common options for analyzing a CSV.
#[derive(Debug, Parser, Clone)]
pub struct AnalyzeArgs {
    /// CSV file whose first column holds the text records.
    ///
    /// When omitted, `analyze` prompts with CSVs discovered under the current
    /// directory; the TUI shows the same list as its file-selection screen.
    pub file: Option<PathBuf>,

    /// Rows to print in the results table (0 = all).
    #[arg(long, default_value_t = 0)]
    pub top: usize,

    /// Export per-record results to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the run summary to JSON.
    #[arg(long = "export-summary")]
    pub export_summary: Option<PathBuf>,
}
