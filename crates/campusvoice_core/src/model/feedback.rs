//! Feedback domain model.
//!
//! # Responsibility
//! - Define the stored feedback record and its submission/draft inputs.
//! - Derive the sentiment score exactly once, when a record is created.
//!
//! # Invariants
//! - `sentiment_score` is derived from `rating + comment`, never supplied.
//! - `rating` is always within `1..=5` in a record.
//! - Anonymous records never carry `author`.
//! - `event_id` is not checked for existence; consumers tolerate dangling ids.

use crate::analytics::sentiment;
use crate::model::event::EventId;
use crate::model::validation::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable feedback identifier. New records use time-ordered UUIDv7 values.
pub type FeedbackId = Uuid;

/// Star rating on the `1..=5` scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Validates a star value.
    ///
    /// # Errors
    /// Returns [`ValidationError::RatingOutOfRange`] outside `1..=5`.
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        Self::try_from(i64::from(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Rating mapped onto `0.2..=1.0` for charting next to sentiment.
    pub fn normalized(self) -> f64 {
        f64::from(self.0) / f64::from(Self::MAX)
    }
}

impl TryFrom<i64> for Rating {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match u8::try_from(value) {
            Ok(stars) if (Self::MIN..=Self::MAX).contains(&stars) => Ok(Self(stars)),
            _ => Err(ValidationError::RatingOutOfRange(value)),
        }
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

/// Submitter identity attached to non-anonymous feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorIdentity {
    pub user_id: u32,
    pub name: String,
}

/// Validated submission accepted by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    pub event_id: EventId,
    pub rating: Rating,
    pub comment: String,
    pub is_anonymous: bool,
    /// Ignored when `is_anonymous` is set.
    pub author: Option<AuthorIdentity>,
}

impl NewFeedback {
    pub fn new(event_id: impl Into<EventId>, rating: Rating, comment: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
            rating,
            comment: comment.into(),
            is_anonymous: false,
            author: None,
        }
    }

    pub fn anonymous(mut self) -> Self {
        self.is_anonymous = true;
        self
    }

    pub fn with_author(mut self, author: AuthorIdentity) -> Self {
        self.author = Some(author);
        self
    }
}

/// Form-input state before submission.
///
/// `rating == 0` is the "no rating yet" sentinel and an empty `event_id`
/// means no event was picked; both are rejected by [`FeedbackDraft::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackDraft {
    pub event_id: String,
    pub rating: u8,
    pub comment: String,
    pub is_anonymous: bool,
}

impl FeedbackDraft {
    /// Turns the draft into a submission, attaching `author` unless anonymous.
    ///
    /// Event selection is checked before the rating, so a blank form reports
    /// the missing event first.
    pub fn validate(
        self,
        author: Option<AuthorIdentity>,
    ) -> Result<NewFeedback, ValidationError> {
        let event_id = self.event_id.trim();
        if event_id.is_empty() {
            return Err(ValidationError::MissingEvent);
        }
        if self.rating == 0 {
            return Err(ValidationError::MissingRating);
        }

        Ok(NewFeedback {
            event_id: event_id.to_string(),
            rating: Rating::new(self.rating)?,
            comment: self.comment,
            is_anonymous: self.is_anonymous,
            author: if self.is_anonymous { None } else { author },
        })
    }
}

/// Stored feedback record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FeedbackRecord")]
pub struct Feedback {
    pub id: FeedbackId,
    pub event_id: EventId,
    pub rating: Rating,
    pub comment: String,
    /// Derived score in `[-1.0, 1.0]`.
    pub sentiment_score: f64,
    /// Assigned at creation, UTC.
    pub created_at: DateTime<Utc>,
    pub is_anonymous: bool,
    pub author: Option<AuthorIdentity>,
}

impl Feedback {
    /// Materializes a submission into a record, scoring it.
    ///
    /// Author identity supplied alongside an anonymous submission is dropped.
    pub fn record(id: FeedbackId, created_at: DateTime<Utc>, submission: NewFeedback) -> Self {
        let sentiment_score = sentiment::score(submission.rating, &submission.comment);
        let author = if submission.is_anonymous {
            None
        } else {
            submission.author
        };

        Self {
            id,
            event_id: submission.event_id,
            rating: submission.rating,
            comment: submission.comment,
            sentiment_score,
            created_at,
            is_anonymous: submission.is_anonymous,
            author,
        }
    }

    /// Checks invariants that deserialized or imported records could violate,
    /// including that the score re-derives from rating and comment.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.sentiment_score.is_finite()
            || !(sentiment::MIN_SCORE..=sentiment::MAX_SCORE).contains(&self.sentiment_score)
        {
            return Err(ValidationError::SentimentOutOfRange(self.sentiment_score));
        }
        let derived = sentiment::score(self.rating, &self.comment);
        if (self.sentiment_score - derived).abs() > SCORE_TOLERANCE {
            return Err(ValidationError::SentimentMismatch {
                stored: self.sentiment_score,
                derived,
            });
        }
        if self.is_anonymous && self.author.is_some() {
            return Err(ValidationError::AnonymousWithAuthor);
        }
        Ok(())
    }

    /// Name shown next to the feedback in lists.
    pub fn author_display(&self) -> &str {
        match (&self.author, self.is_anonymous) {
            (Some(author), false) => author.name.as_str(),
            _ => ANONYMOUS_AUTHOR_DISPLAY,
        }
    }
}

/// Slack allowed between a stored score and its re-derivation.
const SCORE_TOLERANCE: f64 = 1e-9;

/// Display text for feedback without a visible author.
pub const ANONYMOUS_AUTHOR_DISPLAY: &str = "Anonymous User";

/// Parses an ISO-8601 / RFC 3339 timestamp into UTC.
///
/// # Errors
/// Returns [`ValidationError::InvalidTimestamp`] for malformed input.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|err| ValidationError::InvalidTimestamp {
            value: value.to_string(),
            message: err.to_string(),
        })
}

#[derive(Deserialize)]
struct FeedbackRecord {
    id: FeedbackId,
    event_id: EventId,
    rating: Rating,
    comment: String,
    sentiment_score: f64,
    created_at: DateTime<Utc>,
    is_anonymous: bool,
    author: Option<AuthorIdentity>,
}

impl TryFrom<FeedbackRecord> for Feedback {
    type Error = ValidationError;

    fn try_from(value: FeedbackRecord) -> Result<Self, Self::Error> {
        let feedback = Self {
            id: value.id,
            event_id: value.event_id,
            rating: value.rating,
            comment: value.comment,
            sentiment_score: value.sentiment_score,
            created_at: value.created_at,
            is_anonymous: value.is_anonymous,
            author: value.author,
        };
        feedback.validate()?;
        Ok(feedback)
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_timestamp, AuthorIdentity, Feedback, FeedbackDraft, NewFeedback, Rating};
    use crate::model::validation::ValidationError;
    use uuid::Uuid;

    fn author() -> AuthorIdentity {
        AuthorIdentity {
            user_id: 2,
            name: "Student User".to_string(),
        }
    }

    #[test]
    fn rating_accepts_one_through_five_only() {
        for stars in 1..=5 {
            assert_eq!(Rating::new(stars).unwrap().get(), stars);
        }
        assert_eq!(
            Rating::new(0).unwrap_err(),
            ValidationError::RatingOutOfRange(0)
        );
        assert_eq!(
            Rating::new(6).unwrap_err(),
            ValidationError::RatingOutOfRange(6)
        );
        assert!(Rating::try_from(-3_i64).is_err());
    }

    #[test]
    fn draft_reports_missing_event_before_missing_rating() {
        let err = FeedbackDraft::default().validate(None).unwrap_err();
        assert_eq!(err, ValidationError::MissingEvent);

        let draft = FeedbackDraft {
            event_id: "event1".to_string(),
            ..FeedbackDraft::default()
        };
        assert_eq!(draft.validate(None).unwrap_err(), ValidationError::MissingRating);
    }

    #[test]
    fn anonymous_draft_drops_author() {
        let draft = FeedbackDraft {
            event_id: " event2 ".to_string(),
            rating: 3,
            comment: "fine".to_string(),
            is_anonymous: true,
        };
        let submission = draft.validate(Some(author())).unwrap();
        assert_eq!(submission.event_id, "event2");
        assert!(submission.author.is_none());
    }

    #[test]
    fn record_drops_author_for_anonymous_submission() {
        let submission = NewFeedback::new("event1", Rating::new(4).unwrap(), "")
            .with_author(author())
            .anonymous();
        let feedback = Feedback::record(
            Uuid::now_v7(),
            parse_timestamp("2025-09-11T09:30:00Z").unwrap(),
            submission,
        );
        assert!(feedback.author.is_none());
        assert_eq!(feedback.author_display(), "Anonymous User");
        assert_eq!(feedback.sentiment_score, 0.5);
    }

    #[test]
    fn validate_rejects_score_not_derived_from_rating_and_comment() {
        let mut feedback = Feedback::record(
            Uuid::now_v7(),
            parse_timestamp("2025-09-11T09:30:00Z").unwrap(),
            NewFeedback::new("event1", Rating::new(1).unwrap(), "terrible"),
        );
        assert_eq!(feedback.validate(), Ok(()));

        feedback.sentiment_score = 0.9;
        assert_eq!(
            feedback.validate().unwrap_err(),
            ValidationError::SentimentMismatch {
                stored: 0.9,
                derived: -1.0,
            }
        );
    }

    #[test]
    fn parse_timestamp_normalizes_offsets_to_utc() {
        let parsed = parse_timestamp("2025-09-11T11:30:00+02:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2025-09-11T09:30:00+00:00");
        assert!(matches!(
            parse_timestamp("yesterday").unwrap_err(),
            ValidationError::InvalidTimestamp { .. }
        ));
    }
}
