//! Sentiment classification.
//!
//! Pure threshold logic on the compound score:
//!
//! - sentiment from the signed score: `>= 0.05` Positive, `<= -0.05` Negative,
//!   otherwise Neutral
//! - confidence tier from its magnitude: `>= 0.85` Strong, `>= 0.75` Moderate,
//!   otherwise Low
//!
//! Missing/blank text never reaches the scorer and classifies as N/A; a scorer
//! failure on non-blank text also classifies as N/A so the batch can continue.

use crate::domain::{Classification, ConfidenceTier, Sentiment};
use crate::score::PolarityScorer;

/// Sentiment label for a compound score. Both cutoffs are inclusive, so a
/// score of exactly 0.05 is Positive and exactly -0.05 is Negative.
pub fn sentiment_of(compound: f64) -> Sentiment {
    if compound >= 0.05 {
        Sentiment::Positive
    } else if compound <= -0.05 {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// Confidence tier for a compound score, from `|compound|` only.
pub fn tier_of(compound: f64) -> ConfidenceTier {
    let magnitude = compound.abs();
    if magnitude >= 0.85 {
        ConfidenceTier::Strong
    } else if magnitude >= 0.75 {
        ConfidenceTier::Moderate
    } else {
        ConfidenceTier::Low
    }
}

/// Classify one record's text.
///
/// The scorer is consulted only when the text is non-blank after trimming.
/// Scorer failures are swallowed into an N/A classification; the error text
/// is returned alongside so callers can count/report it.
pub fn classify<S: PolarityScorer>(
    scorer: &S,
    text: Option<&str>,
) -> (Classification, Option<String>) {
    let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return (Classification::not_applicable(), None);
    };

    match scorer.compound(text) {
        Ok(compound) => (
            Classification {
                sentiment: sentiment_of(compound),
                tier: tier_of(compound),
                compound: Some(compound),
            },
            None,
        ),
        Err(err) => (Classification::not_applicable(), Some(err.message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::ScoreError;

    /// Returns a fixed compound score for every input.
    struct FixedScorer(f64);

    impl PolarityScorer for FixedScorer {
        fn compound(&self, _text: &str) -> Result<f64, ScoreError> {
            Ok(self.0)
        }
    }

    /// Fails on every input.
    struct FaultyScorer;

    impl PolarityScorer for FaultyScorer {
        fn compound(&self, _text: &str) -> Result<f64, ScoreError> {
            Err(ScoreError::new("lexicon exploded"))
        }
    }

    #[test]
    fn sentiment_boundaries_are_inclusive() {
        assert_eq!(sentiment_of(0.05), Sentiment::Positive);
        assert_eq!(sentiment_of(-0.05), Sentiment::Negative);
        assert_eq!(sentiment_of(0.0499), Sentiment::Neutral);
        assert_eq!(sentiment_of(-0.0499), Sentiment::Neutral);
    }

    #[test]
    fn sentiment_partition_is_total_and_disjoint() {
        let mut c = -1.0;
        while c <= 1.0 {
            let s = sentiment_of(c);
            match s {
                Sentiment::Positive => assert!(c >= 0.05),
                Sentiment::Negative => assert!(c <= -0.05),
                Sentiment::Neutral => assert!(c > -0.05 && c < 0.05),
                Sentiment::NotApplicable => panic!("scored text must never be N/A"),
            }
            c += 0.001;
        }
    }

    #[test]
    fn zero_is_neutral_low() {
        assert_eq!(sentiment_of(0.0), Sentiment::Neutral);
        assert_eq!(tier_of(0.0), ConfidenceTier::Low);
    }

    #[test]
    fn tier_boundaries_are_inclusive() {
        assert_eq!(tier_of(0.85), ConfidenceTier::Strong);
        assert_eq!(tier_of(-0.85), ConfidenceTier::Strong);
        assert_eq!(tier_of(0.75), ConfidenceTier::Moderate);
        assert_eq!(tier_of(-0.75), ConfidenceTier::Moderate);
        assert_eq!(tier_of(0.8499), ConfidenceTier::Moderate);
        assert_eq!(tier_of(0.7499), ConfidenceTier::Low);
    }

    #[test]
    fn tier_partition_is_total_and_disjoint() {
        let mut c = -1.0;
        while c <= 1.0 {
            let t = tier_of(c);
            match t {
                ConfidenceTier::Strong => assert!(c.abs() >= 0.85),
                ConfidenceTier::Moderate => assert!(c.abs() >= 0.75 && c.abs() < 0.85),
                ConfidenceTier::Low => assert!(c.abs() < 0.75),
                ConfidenceTier::NotApplicable => panic!("scored text must never be N/A"),
            }
            c += 0.001;
        }
    }

    #[test]
    fn tier_ignores_sign() {
        assert_eq!(tier_of(0.9), tier_of(-0.9));
        assert_eq!(tier_of(0.8), tier_of(-0.8));
        assert_eq!(tier_of(0.1), tier_of(-0.1));
    }

    #[test]
    fn blank_and_missing_text_classify_not_applicable() {
        // The fixed score would be Strong/Positive if the scorer were consulted.
        let scorer = FixedScorer(0.99);

        for text in [None, Some(""), Some("   "), Some("\t\n")] {
            let (c, err) = classify(&scorer, text);
            assert_eq!(c.sentiment, Sentiment::NotApplicable);
            assert_eq!(c.tier, ConfidenceTier::NotApplicable);
            assert_eq!(c.compound, None);
            assert_eq!(err, None);
        }
    }

    #[test]
    fn scorer_failure_classifies_not_applicable_with_note() {
        let (c, err) = classify(&FaultyScorer, Some("some text"));
        assert_eq!(c.sentiment, Sentiment::NotApplicable);
        assert_eq!(c.tier, ConfidenceTier::NotApplicable);
        assert_eq!(c.compound, None);
        assert_eq!(err.as_deref(), Some("lexicon exploded"));
    }

    #[test]
    fn scored_text_carries_its_compound() {
        let (c, err) = classify(&FixedScorer(0.9), Some("great stuff"));
        assert_eq!(c.sentiment, Sentiment::Positive);
        assert_eq!(c.tier, ConfidenceTier::Strong);
        assert_eq!(c.compound, Some(0.9));
        assert_eq!(err, None);
    }
}
