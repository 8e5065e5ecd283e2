//! Polarity scorer adapter.
//!
//! The scorer is treated as an opaque external function: a non-empty string in,
//! one compound polarity score in [-1, 1] out. The rest of the crate only sees
//! the `PolarityScorer` trait, which keeps the classifier and batch runner
//! testable with stub scorers and isolates them from the analyzer's API.

use vader_sentiment::SentimentIntensityAnalyzer;

/// A per-record scoring failure.
///
/// Input-independent failure mode: callers classify the record as N/A and
/// continue, they never abort the batch for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreError {
    pub message: String,
}

impl ScoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ScoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ScoreError {}

/// Compound polarity scoring for a single text.
///
/// Contract: the input is non-empty (blank text is short-circuited before the
/// scorer is consulted) and the Ok value lies in [-1, 1], more positive values
/// meaning more positive sentiment.
pub trait PolarityScorer {
    fn compound(&self, text: &str) -> Result<f64, ScoreError>;
}

/// The VADER lexicon analyzer behind the `PolarityScorer` trait.
///
/// Construction parses the bundled lexicon once; scoring is deterministic for
/// a given input.
pub struct VaderScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityScorer for VaderScorer {
    fn compound(&self, text: &str) -> Result<f64, ScoreError> {
        let scores = self.analyzer.polarity_scores(text);
        let compound = scores
            .get("compound")
            .copied()
            .ok_or_else(|| ScoreError::new("analyzer returned no compound score"))?;

        if !compound.is_finite() {
            return Err(ScoreError::new(format!(
                "analyzer returned a non-finite compound score: {compound}"
            )));
        }

        // The analyzer normalizes into [-1, 1]; clamp to guard against
        // floating-point spill at the boundaries.
        Ok(compound.clamp(-1.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vader_scores_obvious_polarity_signs() {
        let scorer = VaderScorer::new();

        let pos = scorer.compound("I love this, it is wonderful!").unwrap();
        let neg = scorer.compound("This is terrible and I hate it.").unwrap();

        assert!(pos > 0.0, "expected positive compound, got {pos}");
        assert!(neg < 0.0, "expected negative compound, got {neg}");
        assert!((-1.0..=1.0).contains(&pos));
        assert!((-1.0..=1.0).contains(&neg));
    }

    #[test]
    fn vader_is_deterministic_for_a_given_input() {
        let scorer = VaderScorer::new();
        let a = scorer.compound("It is a table.").unwrap();
        let b = scorer.compound("It is a table.").unwrap();
        assert_eq!(a, b);
    }
}
