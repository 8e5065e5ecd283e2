//! Shared domain types.

mod types;

pub use types::{
    BatchSummary, Classification, ConfidenceTier, Record, RecordResult, Sentiment,
};
