//! Batch runner: one linear pass over the loaded records.
//!
//! Each record is classified independently; output order always matches input
//! order. Progress is reported as a fraction `(index+1)/total` after each
//! record. `run_batch` drives the pass synchronously with a progress callback;
//! `spawn_batch` runs the same pass on a worker thread and delivers progress
//! and the final output over a channel, so a display layer can poll and
//! coalesce updates without ever blocking the worker.

use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Instant;

use crate::classify::classify;
use crate::domain::{BatchSummary, ConfidenceTier, Record, RecordResult};
use crate::error::AppError;
use crate::score::{PolarityScorer, VaderScorer};

/// All computed outputs of a single batch run.
#[derive(Debug, Clone)]
pub struct BatchOutput {
    pub results: Vec<RecordResult>,
    pub summary: BatchSummary,
}

/// Events emitted by a worker-thread batch run.
///
/// Progress deliveries may be coalesced by the receiver; the `Finished` event
/// always arrives last and implies 100%.
pub enum BatchEvent {
    /// Fractional progress in (0, 1].
    Progress(f64),
    Finished(BatchOutput),
    Failed(AppError),
}

/// Classify every record, in input order.
///
/// Refuses to run on an empty record list: that condition must be surfaced to
/// the user as an empty-input notice, not silently produce an empty table.
/// Per-record scorer failures are folded into N/A classifications and counted;
/// they never abort the pass.
pub fn run_batch<S, F>(
    records: &[Record],
    scorer: &S,
    mut on_progress: F,
) -> Result<BatchOutput, AppError>
where
    S: PolarityScorer,
    F: FnMut(f64),
{
    if records.is_empty() {
        return Err(AppError::empty_input(
            "The file has no data rows; there is nothing to classify.",
        ));
    }

    let started = Instant::now();
    let total = records.len();
    let mut results = Vec::with_capacity(total);
    let mut strong_count = 0usize;
    let mut scorer_failures = 0usize;

    for (idx, record) in records.iter().enumerate() {
        let (classification, failure) = classify(scorer, record.text.as_deref());
        if classification.tier == ConfidenceTier::Strong {
            strong_count += 1;
        }
        if failure.is_some() {
            scorer_failures += 1;
        }
        results.push(RecordResult {
            record: record.clone(),
            classification,
        });

        on_progress((idx + 1) as f64 / total as f64);
    }

    let summary = BatchSummary {
        total,
        strong_count,
        scorer_failures,
        duration: started.elapsed(),
    };

    Ok(BatchOutput { results, summary })
}

/// Run the batch on a worker thread against the real VADER scorer.
///
/// The scorer is constructed inside the worker so the caller never pays the
/// lexicon parse on its own thread. Send failures are ignored: a dropped
/// receiver means the display layer is gone and there is nobody left to tell.
pub fn spawn_batch(records: Vec<Record>) -> Receiver<BatchEvent> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let scorer = VaderScorer::new();
        let result = run_batch(&records, &scorer, |fraction| {
            let _ = tx.send(BatchEvent::Progress(fraction));
        });
        let event = match result {
            Ok(output) => BatchEvent::Finished(output),
            Err(err) => BatchEvent::Failed(err),
        };
        let _ = tx.send(event);
    });

    rx
}
