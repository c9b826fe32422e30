//! Lexicon-assisted sentiment scoring.
//!
//! # Invariants
//! - Scores are deterministic and clamped to `[MIN_SCORE, MAX_SCORE]`.
//! - Each lexicon word contributes at most once per comment (substring
//!   containment, not token count).

use crate::model::feedback::Rating;
use serde::{Deserialize, Serialize};

pub const MIN_SCORE: f64 = -1.0;
pub const MAX_SCORE: f64 = 1.0;

/// Score shift per matched lexicon word.
pub const LEXICON_WEIGHT: f64 = 0.1;

/// Scores above this are positive; below its negation are negative.
pub const BUCKET_THRESHOLD: f64 = 0.3;

pub const POSITIVE_WORDS: &[&str] = &[
    "good",
    "great",
    "awesome",
    "excellent",
    "amazing",
    "love",
    "enjoyed",
    "helpful",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "poor",
    "terrible",
    "awful",
    "horrible",
    "hate",
    "disliked",
    "unhelpful",
    "boring",
];

/// Maps a rating and free-text comment to a score in `[-1.0, 1.0]`.
///
/// The rating sets the base `(rating - 3) / 2`; every positive lexicon word
/// found anywhere in the lowercased comment adds `0.1` and every negative one
/// subtracts `0.1`. Matching is plain substring containment, so `unhelpful`
/// also counts as `helpful`.
pub fn score(rating: Rating, comment: &str) -> f64 {
    let base = (f64::from(rating.get()) - 3.0) / 2.0;
    let lowered = comment.to_lowercase();

    let mut impact = 0.0;
    for word in POSITIVE_WORDS {
        if lowered.contains(word) {
            impact += LEXICON_WEIGHT;
        }
    }
    for word in NEGATIVE_WORDS {
        if lowered.contains(word) {
            impact -= LEXICON_WEIGHT;
        }
    }

    (base + impact).clamp(MIN_SCORE, MAX_SCORE)
}

/// Three-way polarity bucket used by distributions and word tones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentBucket {
    Positive,
    Neutral,
    Negative,
}

impl SentimentBucket {
    pub fn classify(score: f64) -> Self {
        if score > BUCKET_THRESHOLD {
            Self::Positive
        } else if score < -BUCKET_THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

/// Four-level badge shown next to individual feedback entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    VeryPositive,
    Positive,
    Negative,
    VeryNegative,
}

impl SentimentLabel {
    pub fn classify(score: f64) -> Self {
        if score > 0.5 {
            Self::VeryPositive
        } else if score > 0.0 {
            Self::Positive
        } else if score > -0.5 {
            Self::Negative
        } else {
            Self::VeryNegative
        }
    }

    pub fn display(self) -> &'static str {
        match self {
            Self::VeryPositive => "Very Positive",
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::VeryNegative => "Very Negative",
        }
    }
}
