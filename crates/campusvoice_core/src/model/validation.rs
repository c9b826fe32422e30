//! Input-contract errors shared by the domain model.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejection raised when caller input breaks a model invariant.
///
/// These are caller errors, never recoverable runtime conditions, so every
/// constructor that can produce one fails fast instead of clamping.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Rating outside the `1..=5` star scale.
    RatingOutOfRange(i64),
    /// Draft submitted without choosing an event.
    MissingEvent,
    /// Draft submitted while the rating is still the `0` sentinel.
    MissingRating,
    /// Timestamp text is not RFC 3339 / ISO-8601.
    InvalidTimestamp { value: String, message: String },
    /// Calendar date text is not `YYYY-MM-DD`.
    InvalidDate { value: String, message: String },
    /// Stored sentiment lies outside `[-1.0, 1.0]` or is not finite.
    SentimentOutOfRange(f64),
    /// Stored sentiment disagrees with the score derived from rating and comment.
    SentimentMismatch { stored: f64, derived: f64 },
    /// Anonymous record carries author identity.
    AnonymousWithAuthor,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RatingOutOfRange(value) => {
                write!(f, "rating ({value}) must be between 1 and 5")
            }
            Self::MissingEvent => write!(f, "Please select an event"),
            Self::MissingRating => write!(f, "Please provide a rating"),
            Self::InvalidTimestamp { value, message } => {
                write!(f, "invalid timestamp `{value}`: {message}")
            }
            Self::InvalidDate { value, message } => {
                write!(f, "invalid calendar date `{value}`: {message}")
            }
            Self::SentimentOutOfRange(value) => {
                write!(f, "sentiment score ({value}) must be within [-1, 1]")
            }
            Self::SentimentMismatch { stored, derived } => write!(
                f,
                "sentiment score ({stored}) does not match rating and comment ({derived})"
            ),
            Self::AnonymousWithAuthor => {
                write!(f, "anonymous feedback must not carry author identity")
            }
        }
    }
}

impl Error for ValidationError {}
