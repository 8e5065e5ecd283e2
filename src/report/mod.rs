//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the classification/batch code stays clean and testable
//! - output changes are localized

use crate::batch::BatchOutput;
use crate::domain::RecordResult;
use crate::io::ingest::LoadedTable;

const TEXT_WIDTH: usize = 48;

/// Format the run summary (file info + counts + strong-confidence rate).
pub fn format_run_summary(table: &LoadedTable, output: &BatchOutput) -> String {
    let summary = &output.summary;
    let mut out = String::new();

    out.push_str("=== senti - CSV Sentiment Screen ===\n");
    out.push_str(&format!("File: {}\n", table.path.display()));
    out.push_str(&format!("Column: {}\n", table.column_name));
    out.push_str(&format!("Records: {}\n", summary.total));

    // "Accuracy" in the original tool's sense: the share of records classified
    // with Strong confidence, not a correctness measure.
    match summary.accuracy_percent() {
        Some(pct) => out.push_str(&format!(
            "Strong-confidence rate: {} / {} ({pct:.2}%)\n",
            summary.strong_count, summary.total
        )),
        None => out.push_str("Strong-confidence rate: N/A\n"),
    }

    if summary.scorer_failures > 0 {
        out.push_str(&format!(
            "Scorer failures: {} (classified N/A)\n",
            summary.scorer_failures
        ));
    }
    if !table.row_errors.is_empty() {
        out.push_str(&format!(
            "Row errors: {} (see load diagnostics)\n",
            table.row_errors.len()
        ));
    }

    out.push_str(&format!(
        "Elapsed: {:.2}s\n",
        summary.duration.as_secs_f64()
    ));

    out
}

/// Format the per-record results table. `top_n == 0` prints every row.
pub fn format_results_table(results: &[RecordResult], top_n: usize) -> String {
    let shown = if top_n == 0 {
        results.len()
    } else {
        top_n.min(results.len())
    };

    let mut out = String::new();
    out.push_str(&format!(
        "{:>6} {:<TEXT_WIDTH$} {:<10} {:<18}\n",
        "line", "text", "sentiment", "confidence"
    ));
    out.push_str(&format!(
        "{:-<6} {:-<TEXT_WIDTH$} {:-<10} {:-<18}\n",
        "", "", "", ""
    ));

    for result in &results[..shown] {
        let c = &result.classification;
        out.push_str(
            format!(
                "{:>6} {:<TEXT_WIDTH$} {:<10} {:<18}",
                result.record.line,
                truncate(result.record.text_or_empty(), TEXT_WIDTH),
                c.sentiment.display_name(),
                c.tier.display_name(),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    if shown < results.len() {
        out.push_str(&format!(
            "... {} more row(s); use --top 0 to print all or --export for the full CSV\n",
            results.len() - shown
        ));
    }

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BatchSummary, Classification, ConfidenceTier, Record, Sentiment};
    use std::path::Path;
    use std::time::Duration;

    fn sample_output() -> BatchOutput {
        let results = vec![
            RecordResult {
                record: Record {
                    line: 2,
                    text: Some("I love this!".to_string()),
                },
                classification: Classification {
                    sentiment: Sentiment::Positive,
                    tier: ConfidenceTier::Strong,
                    compound: Some(0.9),
                },
            },
            RecordResult {
                record: Record { line: 3, text: None },
                classification: Classification::not_applicable(),
            },
        ];
        BatchOutput {
            results,
            summary: BatchSummary {
                total: 2,
                strong_count: 1,
                scorer_failures: 0,
                duration: Duration::from_millis(40),
            },
        }
    }

    fn sample_table() -> LoadedTable {
        LoadedTable {
            path: Path::new("reviews.csv").to_path_buf(),
            column_name: "feedback".to_string(),
            records: Vec::new(),
            row_errors: Vec::new(),
        }
    }

    #[test]
    fn summary_shows_strong_rate() {
        let text = format_run_summary(&sample_table(), &sample_output());
        assert!(text.contains("Records: 2"));
        assert!(text.contains("1 / 2 (50.00%)"));
    }

    #[test]
    fn summary_handles_empty_batch_rate() {
        let mut output = sample_output();
        output.results.clear();
        output.summary = BatchSummary {
            total: 0,
            strong_count: 0,
            scorer_failures: 0,
            duration: Duration::ZERO,
        };
        let text = format_run_summary(&sample_table(), &output);
        assert!(text.contains("Strong-confidence rate: N/A"));
    }

    #[test]
    fn table_lists_every_row_and_labels() {
        let output = sample_output();
        let text = format_results_table(&output.results, 0);
        assert!(text.contains("I love this!"));
        assert!(text.contains("Positive"));
        assert!(text.contains("Strong (85%+)"));
        assert!(text.contains("N/A"));
    }

    #[test]
    fn table_top_n_truncates_with_notice() {
        let output = sample_output();
        let text = format_results_table(&output.results, 1);
        assert!(text.contains("I love this!"));
        assert!(text.contains("1 more row(s)"));
    }

    #[test]
    fn truncate_preserves_short_text() {
        assert_eq!(truncate("short", 10), "short");
        let long = "x".repeat(60);
        let t = truncate(&long, 10);
        assert_eq!(t.chars().count(), 10);
        assert!(t.ends_with('…'));
    }
}
