//! Feedback store contract and in-memory implementation.
//!
//! # Responsibility
//! - Own the event and feedback collections.
//! - Assign ids and timestamps, and score sentiment, on create.
//!
//! # Invariants
//! - Records are append-only; nothing is updated or deleted.
//! - Listing returns snapshots in insertion order.
//! - `event_id` of new feedback is not checked against known events.

use crate::model::event::Event;
use crate::model::feedback::{Feedback, NewFeedback};
use crate::model::validation::ValidationError;
use crate::repo::seed::{seed_events, seed_feedback};
use chrono::Utc;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    /// Stored or seeded data broke a model invariant.
    Validation(ValidationError),
    /// Backing store could not serve the request.
    Unavailable(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "feedback store unavailable: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Store operations consumed by services.
pub trait FeedbackRepository {
    /// Persists a submission, returning the stored record.
    fn create_feedback(&mut self, submission: NewFeedback) -> RepoResult<Feedback>;
    fn list_feedback(&self) -> RepoResult<Vec<Feedback>>;
    fn list_feedback_by_event(&self, event_id: &str) -> RepoResult<Vec<Feedback>>;
    fn list_events(&self) -> RepoResult<Vec<Event>>;
    fn get_event(&self, event_id: &str) -> RepoResult<Option<Event>>;
}

/// Vector-backed store with linear lookups.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFeedbackRepository {
    events: Vec<Event>,
    feedback: Vec<Feedback>,
}

impl InMemoryFeedbackRepository {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events,
            feedback: Vec::new(),
        }
    }

    /// Store preloaded with the demo events and feedback.
    pub fn seeded() -> RepoResult<Self> {
        Ok(Self {
            events: seed_events()?,
            feedback: seed_feedback()?,
        })
    }

    /// Appends an already materialized record, e.g. from an import.
    pub fn insert_feedback(&mut self, feedback: Feedback) -> RepoResult<()> {
        feedback.validate()?;
        self.feedback.push(feedback);
        Ok(())
    }
}

impl FeedbackRepository for InMemoryFeedbackRepository {
    fn create_feedback(&mut self, submission: NewFeedback) -> RepoResult<Feedback> {
        let feedback = Feedback::record(Uuid::now_v7(), Utc::now(), submission);
        self.feedback.push(feedback.clone());
        Ok(feedback)
    }

    fn list_feedback(&self) -> RepoResult<Vec<Feedback>> {
        Ok(self.feedback.clone())
    }

    fn list_feedback_by_event(&self, event_id: &str) -> RepoResult<Vec<Feedback>> {
        Ok(self
            .feedback
            .iter()
            .filter(|item| item.event_id == event_id)
            .cloned()
            .collect())
    }

    fn list_events(&self) -> RepoResult<Vec<Event>> {
        Ok(self.events.clone())
    }

    fn get_event(&self, event_id: &str) -> RepoResult<Option<Event>> {
        Ok(self
            .events
            .iter()
            .find(|event| event.id == event_id)
            .cloned())
    }
}
