//! Shared "analysis pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! CSV load -> batch classification -> summary
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use std::path::Path;

use crate::batch::{self, BatchOutput};
use crate::error::AppError;
use crate::io::ingest::{self, LoadedTable};
use crate::score::VaderScorer;

/// All computed outputs of a single analysis run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub table: LoadedTable,
    pub batch: BatchOutput,
}

/// Load the CSV and classify every record synchronously.
///
/// `on_progress` receives fractional progress in (0, 1]. The empty-input case
/// surfaces as the batch runner's refusal (exit code 3), after the load
/// itself succeeded.
pub fn run_analysis(path: &Path, on_progress: impl FnMut(f64)) -> Result<RunOutput, AppError> {
    let table = ingest::load_records(path)?;
    run_analysis_with_table(table, on_progress)
}

/// Classify a pre-loaded table.
///
/// Useful for the TUI, which loads once and may re-run the batch.
pub fn run_analysis_with_table(
    table: LoadedTable,
    on_progress: impl FnMut(f64),
) -> Result<RunOutput, AppError> {
    let scorer = VaderScorer::new();
    let batch = batch::run_batch(&table.records, &scorer, on_progress)?;
    Ok(RunOutput { table, batch })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ingest::load_records_from_reader;

    #[test]
    fn pipeline_classifies_a_loaded_table() {
        let table = load_records_from_reader(
            b"feedback\nI love this product!\n\nThis is awful, I hate it.\n".as_slice(),
            Path::new("inline.csv"),
        )
        .unwrap();

        let run = run_analysis_with_table(table, |_| {}).unwrap();

        assert_eq!(run.batch.results.len(), run.batch.summary.total);
        assert_eq!(run.batch.summary.total, 2);
    }

    #[test]
    fn run_analysis_loads_from_disk() {
        let path = std::env::temp_dir().join("senti_pipeline_smoke.csv");
        std::fs::write(&path, "feedback\nAbsolutely wonderful!\n").unwrap();

        let run = run_analysis(&path, |_| {}).unwrap();
        assert_eq!(run.batch.summary.total, 1);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn pipeline_refuses_empty_table() {
        let table =
            load_records_from_reader(b"feedback\n".as_slice(), Path::new("empty.csv")).unwrap();
        let err = run_analysis_with_table(table, |_| {}).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
