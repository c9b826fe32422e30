//! Time-ordered series for the sentiment trend chart.

use crate::model::feedback::Feedback;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `MMM d, yyyy`, e.g. `Sep 11, 2025`.
pub const POINT_LABEL_FORMAT: &str = "%b %-d, %Y";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub created_at: DateTime<Utc>,
    pub label: String,
    pub sentiment_score: f64,
    /// Rating divided by 5, plotted on the same axis as sentiment.
    pub normalized_rating: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub points: Vec<TrendPoint>,
}

impl TrendSeries {
    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|point| point.label.clone()).collect()
    }

    pub fn sentiment_scores(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.sentiment_score).collect()
    }

    pub fn normalized_ratings(&self) -> Vec<f64> {
        self.points
            .iter()
            .map(|point| point.normalized_rating)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Builds one chart point per feedback item, oldest first.
pub fn trend_series(feedback: &[Feedback]) -> TrendSeries {
    let mut ordered: Vec<&Feedback> = feedback.iter().collect();
    ordered.sort_by_key(|item| item.created_at);

    TrendSeries {
        points: ordered
            .into_iter()
            .map(|item| TrendPoint {
                created_at: item.created_at,
                label: item.created_at.format(POINT_LABEL_FORMAT).to_string(),
                sentiment_score: item.sentiment_score,
                normalized_rating: item.rating.normalized(),
            })
            .collect(),
    }
}
