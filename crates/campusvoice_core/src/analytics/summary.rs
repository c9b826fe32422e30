//! Sentiment summary: averages, distribution and trend.
//!
//! # Invariants
//! - Empty input yields [`SentimentSummary::empty`], not an error.
//! - Distribution percentages are rounded per bucket independently, so the
//!   three values may sum to 99 or 101.
//! - Trend stays neutral below [`MIN_TREND_ITEMS`] items.

use crate::analytics::sentiment::SentimentBucket;
use crate::model::feedback::Feedback;
use serde::{Deserialize, Serialize};

/// Mean-sentiment gap between halves needed to call a direction.
pub const TREND_THRESHOLD: f64 = 0.1;
/// Smallest collection that gets a non-neutral trend.
pub const MIN_TREND_ITEMS: usize = 3;

/// Direction of sentiment between the earlier and later half of the
/// time-ordered feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Positive,
    Neutral,
    Negative,
}

impl Trend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }

    /// Dashboard wording for the trend indicator.
    pub fn label(self) -> &'static str {
        match self {
            Self::Positive => "Improving",
            Self::Neutral => "Stable",
            Self::Negative => "Declining",
        }
    }
}

/// Share of feedback per sentiment bucket, in whole percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: u32,
    pub neutral: u32,
    pub negative: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub average_sentiment: f64,
    pub average_rating: f64,
    pub trend: Trend,
    pub distribution: SentimentDistribution,
    pub total: usize,
}

impl SentimentSummary {
    pub fn empty() -> Self {
        Self {
            average_sentiment: 0.0,
            average_rating: 0.0,
            trend: Trend::Neutral,
            distribution: SentimentDistribution::default(),
            total: 0,
        }
    }

    /// Position of the average sentiment on a `0..=100` gauge.
    pub fn sentiment_gauge_percent(&self) -> u32 {
        ((self.average_sentiment + 1.0) * 50.0).round().clamp(0.0, 100.0) as u32
    }
}

impl Default for SentimentSummary {
    fn default() -> Self {
        Self::empty()
    }
}

/// Summarizes a feedback snapshot.
pub fn summarize(feedback: &[Feedback]) -> SentimentSummary {
    if feedback.is_empty() {
        return SentimentSummary::empty();
    }

    let total = feedback.len();
    let average_sentiment = mean(feedback.iter().map(|item| item.sentiment_score));
    let average_rating = mean(feedback.iter().map(|item| f64::from(item.rating.get())));

    let (mut positive, mut neutral, mut negative) = (0_usize, 0_usize, 0_usize);
    for item in feedback {
        match SentimentBucket::classify(item.sentiment_score) {
            SentimentBucket::Positive => positive += 1,
            SentimentBucket::Neutral => neutral += 1,
            SentimentBucket::Negative => negative += 1,
        }
    }

    SentimentSummary {
        average_sentiment,
        average_rating,
        trend: compute_trend(feedback),
        distribution: SentimentDistribution {
            positive: percent(positive, total),
            neutral: percent(neutral, total),
            negative: percent(negative, total),
        },
        total,
    }
}

/// Compares mean sentiment of the earlier and later half by creation time.
///
/// The split point is `len / 2`, so for odd sizes the later half holds the
/// extra item. Collections smaller than [`MIN_TREND_ITEMS`] are neutral.
pub fn compute_trend(feedback: &[Feedback]) -> Trend {
    if feedback.len() < MIN_TREND_ITEMS {
        return Trend::Neutral;
    }

    let mut ordered: Vec<&Feedback> = feedback.iter().collect();
    ordered.sort_by_key(|item| item.created_at);

    let (earlier, later) = ordered.split_at(ordered.len() / 2);
    let earlier_mean = mean(earlier.iter().map(|item| item.sentiment_score));
    let later_mean = mean(later.iter().map(|item| item.sentiment_score));

    if later_mean > earlier_mean + TREND_THRESHOLD {
        Trend::Positive
    } else if later_mean < earlier_mean - TREND_THRESHOLD {
        Trend::Negative
    } else {
        Trend::Neutral
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0_usize), |(sum, count), value| {
        (sum + value, count + 1)
    });
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn percent(count: usize, total: usize) -> u32 {
    ((count as f64 / total as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::{percent, SentimentSummary, Trend};

    #[test]
    fn percent_rounds_each_bucket_on_its_own() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 8), 13);
    }

    #[test]
    fn gauge_maps_average_onto_zero_to_hundred() {
        let mut summary = SentimentSummary::empty();
        assert_eq!(summary.sentiment_gauge_percent(), 50);
        summary.average_sentiment = -1.0;
        assert_eq!(summary.sentiment_gauge_percent(), 0);
        summary.average_sentiment = 0.46;
        assert_eq!(summary.sentiment_gauge_percent(), 73);
    }

    #[test]
    fn trend_labels_match_dashboard_wording() {
        assert_eq!(Trend::Positive.label(), "Improving");
        assert_eq!(Trend::Neutral.label(), "Stable");
        assert_eq!(Trend::Negative.label(), "Declining");
    }
}
