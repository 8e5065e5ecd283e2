//! Export per-record results to CSV and the run summary to JSON.
//!
//! Exports are meant to be easy to consume in spreadsheets or downstream
//! scripts; free text goes through the csv writer so quoting stays correct.

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::batch::BatchOutput;
use crate::domain::BatchSummary;
use crate::error::AppError;
use crate::io::ingest::LoadedTable;

/// Write one row per record: line, text, sentiment, tier, compound.
pub fn write_results_csv(path: &Path, output: &BatchOutput) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::runtime(format!(
            "Failed to create export CSV '{}': {e}",
            path.display()
        ))
    })?;
    let mut writer = csv::Writer::from_writer(file);

    writer
        .write_record(["line", "text", "sentiment", "confidence_tier", "compound"])
        .map_err(|e| AppError::runtime(format!("Failed to write export CSV header: {e}")))?;

    for result in &output.results {
        let c = &result.classification;
        let compound = c
            .compound
            .map(|v| format!("{v:.4}"))
            .unwrap_or_default();
        writer
            .write_record([
                result.record.line.to_string().as_str(),
                result.record.text_or_empty(),
                c.sentiment.display_name(),
                c.tier.display_name(),
                compound.as_str(),
            ])
            .map_err(|e| AppError::runtime(format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::runtime(format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

/// The "portable" representation of a run summary.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryFile {
    pub tool: String,
    pub source: String,
    pub column: String,
    pub total: usize,
    pub strong_count: usize,
    pub scorer_failures: usize,
    /// `null` when the batch had no records.
    pub accuracy_percent: Option<f64>,
    pub duration_seconds: f64,
}

impl SummaryFile {
    pub fn new(table: &LoadedTable, summary: &BatchSummary) -> Self {
        Self {
            tool: "senti".to_string(),
            source: table.path.display().to_string(),
            column: table.column_name.clone(),
            total: summary.total,
            strong_count: summary.strong_count,
            scorer_failures: summary.scorer_failures,
            accuracy_percent: summary.accuracy_percent(),
            duration_seconds: summary.duration.as_secs_f64(),
        }
    }
}

/// Write the summary JSON file.
pub fn write_summary_json(
    path: &Path,
    table: &LoadedTable,
    summary: &BatchSummary,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::runtime(format!(
            "Failed to create summary JSON '{}': {e}",
            path.display()
        ))
    })?;

    serde_json::to_writer_pretty(file, &SummaryFile::new(table, summary))
        .map_err(|e| AppError::runtime(format!("Failed to write summary JSON: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn summary_file_carries_strong_rate() {
        let table = LoadedTable {
            path: Path::new("reviews.csv").to_path_buf(),
            column_name: "feedback".to_string(),
            records: Vec::new(),
            row_errors: Vec::new(),
        };
        let summary = BatchSummary {
            total: 4,
            strong_count: 2,
            scorer_failures: 1,
            duration: Duration::from_millis(120),
        };

        let file = SummaryFile::new(&table, &summary);
        let json = serde_json::to_string(&file).unwrap();

        assert!(json.contains("\"total\":4"));
        assert!(json.contains("\"strong_count\":2"));
        assert!(json.contains("\"accuracy_percent\":50.0"));
        assert!(json.contains("\"column\":\"feedback\""));
    }

    #[test]
    fn summary_file_accuracy_is_null_for_empty_batch() {
        let table = LoadedTable {
            path: Path::new("empty.csv").to_path_buf(),
            column_name: "feedback".to_string(),
            records: Vec::new(),
            row_errors: Vec::new(),
        };
        let summary = BatchSummary {
            total: 0,
            strong_count: 0,
            scorer_failures: 0,
            duration: Duration::ZERO,
        };

        let json = serde_json::to_string(&SummaryFile::new(&table, &summary)).unwrap();
        assert!(json.contains("\"accuracy_percent\":null"));
    }
}
