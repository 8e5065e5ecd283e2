//! CSV ingest.
//!
//! Turns a delimited text file into an ordered list of `Record`s taken from
//! the **first column**, in file order.
//!
//! Design goals:
//! - three distinct load-time diagnostics: unreadable/malformed file,
//!   zero columns, zero data rows (the last is non-fatal — the table loads,
//!   the batch step later refuses it)
//! - row-level tolerance: a malformed row becomes a row error plus an empty
//!   record, it never aborts the load
//! - no classification logic here

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::domain::Record;
use crate::error::AppError;

/// A row-level problem encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    /// 1-based CSV line number (the header is line 1).
    pub line: usize,
    pub message: String,
}

/// Ingest output: ordered records + provenance + row errors.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub path: PathBuf,
    /// Header name of the column being classified (the first column).
    pub column_name: String,
    pub records: Vec<Record>,
    pub row_errors: Vec<RowError>,
}

impl LoadedTable {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Load the first column of a CSV file as text records.
pub fn load_records(path: &Path) -> Result<LoadedTable, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::load(format!("Failed to open CSV '{}': {e}", path.display()))
    })?;
    load_records_from_reader(file, path)
}

/// Reader-based ingest so tests can feed in-memory CSV without temp files.
pub fn load_records_from_reader(reader: impl Read, path: &Path) -> Result<LoadedTable, AppError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| AppError::load(format!("Failed to read CSV headers: {e}")))?
        .clone();

    // Structurally invalid: a file with no columns cannot be classified at
    // all. This is distinct from "zero data rows", which loads fine.
    if headers.is_empty() {
        return Err(AppError::load(format!(
            "CSV '{}' has no columns; nothing to classify.",
            path.display()
        )));
    }

    let column_name = headers.get(0).map(str::to_string).unwrap_or_default();

    let mut records = Vec::new();
    let mut row_errors = Vec::new();

    for (idx, result) in csv_reader.records().enumerate() {
        // Fallback when the reader has no position: header is line 1, data
        // starts at line 2.
        let fallback_line = idx + 2;

        match result {
            Ok(row) => {
                let line = row
                    .position()
                    .map(|p| p.line() as usize)
                    .unwrap_or(fallback_line);
                records.push(Record {
                    line,
                    text: cell_text(row.get(0)),
                });
            }
            Err(e) => {
                let line = e
                    .position()
                    .map(|p| p.line() as usize)
                    .unwrap_or(fallback_line);
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                // The row keeps its slot; it classifies as no-text.
                records.push(Record { line, text: None });
            }
        }
    }

    Ok(LoadedTable {
        path: path.to_path_buf(),
        column_name,
        records,
        row_errors,
    })
}

/// Missing cells and cells that are blank after trimming are both "no text".
fn cell_text(cell: Option<&str>) -> Option<String> {
    cell.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}
