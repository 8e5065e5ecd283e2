//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during classification
//! - rendered in the terminal table / TUI
//! - exported to CSV/JSON

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Sentiment label derived from the sign of the compound score.
///
/// `NotApplicable` is reserved for records whose text is missing/blank after
/// trimming, or whose scoring failed; the scorer is never consulted for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    NotApplicable,
}

impl Sentiment {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
            Sentiment::NotApplicable => "N/A",
        }
    }
}

/// Confidence tier derived from the magnitude of the compound score,
/// independent of its sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    Strong,
    Moderate,
    Low,
    NotApplicable,
}

impl ConfidenceTier {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            ConfidenceTier::Strong => "Strong (85%+)",
            ConfidenceTier::Moderate => "Moderate (75-85%)",
            ConfidenceTier::Low => "Ok to Low (<75%)",
            ConfidenceTier::NotApplicable => "N/A",
        }
    }
}

/// One input row: the first-column cell of the loaded CSV, in file order.
///
/// `text` is `None` when the cell is missing or blank after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based CSV line number (header is line 1).
    pub line: usize,
    pub text: Option<String>,
}

impl Record {
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// Labels derived deterministically from one record's compound score.
///
/// `compound` is `None` exactly when both labels are `NotApplicable`
/// (blank text or a per-record scorer failure).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub sentiment: Sentiment,
    pub tier: ConfidenceTier,
    pub compound: Option<f64>,
}

impl Classification {
    pub fn not_applicable() -> Self {
        Self {
            sentiment: Sentiment::NotApplicable,
            tier: ConfidenceTier::NotApplicable,
            compound: None,
        }
    }
}

/// One record plus its classification, in input order.
#[derive(Debug, Clone)]
pub struct RecordResult {
    pub record: Record,
    pub classification: Classification,
}

/// Immutable snapshot of a completed batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    /// Number of records classified with the Strong confidence tier.
    ///
    /// The original tool called the derived percentage "accuracy"; there is no
    /// ground truth anywhere in the input, so we surface it strictly as a
    /// strong-confidence rate.
    pub strong_count: usize,
    /// Records where the external scorer failed (classified N/A, batch continued).
    pub scorer_failures: usize,
    pub duration: Duration,
}

impl BatchSummary {
    /// `100 * strong_count / total`, or `None` when the batch had no records.
    pub fn accuracy_percent(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.strong_count as f64 / self.total as f64 * 100.0)
    }
}
