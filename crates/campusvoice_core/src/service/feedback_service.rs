//! Feedback submission and query use-cases.
//!
//! # Responsibility
//! - Validate form drafts and forward submissions to the store.
//! - Provide filtered listings and event grouping for callers.
//!
//! # Invariants
//! - Sentiment is scored by the store on create, never by callers.
//! - Simulated latency applies before the write, never after.

use crate::auth::credentials::UserIdentity;
use crate::model::event::Event;
use crate::model::feedback::{Feedback, FeedbackDraft, NewFeedback};
use crate::model::validation::ValidationError;
use crate::repo::feedback_repo::{FeedbackRepository, RepoError, RepoResult};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// Caller input was rejected before reaching the store.
    Validation(ValidationError),
    /// Store failure, passed through opaquely.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Events sharing one category label, for grouped selectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCategory {
    pub category: String,
    pub events: Vec<Event>,
}

/// Use-case facade over a feedback store.
pub struct FeedbackService<R: FeedbackRepository> {
    repo: R,
    submit_latency: Duration,
}

impl<R: FeedbackRepository> FeedbackService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            submit_latency: Duration::ZERO,
        }
    }

    /// Delays every submission by `latency`, mimicking a remote round-trip.
    pub fn with_submit_latency(mut self, latency: Duration) -> Self {
        self.submit_latency = latency;
        self
    }

    /// Read access for analytics consumers such as the dashboard.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Stores a validated submission.
    pub fn submit(&mut self, submission: NewFeedback) -> ServiceResult<Feedback> {
        let started_at = Instant::now();
        if !self.submit_latency.is_zero() {
            std::thread::sleep(self.submit_latency);
        }

        let event_id = submission.event_id.clone();
        let comment_len = submission.comment.chars().count();
        match self.repo.create_feedback(submission) {
            Ok(feedback) => {
                info!(
                    "event=feedback_create module=service status=ok feedback_id={} event_id={} rating={} comment_len={} anonymous={} duration_ms={}",
                    feedback.id,
                    feedback.event_id,
                    feedback.rating.get(),
                    comment_len,
                    feedback.is_anonymous,
                    started_at.elapsed().as_millis()
                );
                Ok(feedback)
            }
            Err(err) => {
                error!(
                    "event=feedback_create module=service status=error event_id={} duration_ms={} error={}",
                    event_id,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err.into())
            }
        }
    }

    /// Validates a form draft and stores it, attributing it to `user`
    /// unless the draft is anonymous.
    pub fn submit_draft(
        &mut self,
        draft: FeedbackDraft,
        user: Option<&UserIdentity>,
    ) -> ServiceResult<Feedback> {
        let submission = draft.validate(user.map(UserIdentity::as_author))?;
        self.submit(submission)
    }

    pub fn list_feedback(&self) -> RepoResult<Vec<Feedback>> {
        self.repo.list_feedback()
    }

    /// All feedback, or only the feedback of `event_id` when given.
    pub fn list_feedback_for(&self, event_id: Option<&str>) -> RepoResult<Vec<Feedback>> {
        match event_id {
            Some(event_id) => self.repo.list_feedback_by_event(event_id),
            None => self.repo.list_feedback(),
        }
    }

    pub fn list_events(&self) -> RepoResult<Vec<Event>> {
        self.repo.list_events()
    }

    pub fn get_event(&self, event_id: &str) -> RepoResult<Option<Event>> {
        self.repo.get_event(event_id)
    }

    /// Groups events by category, in order of first appearance.
    pub fn events_by_category(&self) -> RepoResult<Vec<EventCategory>> {
        Ok(group_by_category(self.repo.list_events()?))
    }
}

fn group_by_category(events: Vec<Event>) -> Vec<EventCategory> {
    let mut groups: Vec<EventCategory> = Vec::new();
    for event in events {
        match groups
            .iter_mut()
            .find(|group| group.category == event.category)
        {
            Some(group) => group.events.push(event),
            None => groups.push(EventCategory {
                category: event.category.clone(),
                events: vec![event],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::group_by_category;
    use crate::model::event::Event;

    #[test]
    fn grouping_keeps_first_appearance_order() {
        let events = vec![
            Event::new("e1", "Career Fair", "Academic", "2025-10-15").unwrap(),
            Event::new("e2", "Hackathon", "Tech", "2025-11-01").unwrap(),
            Event::new("e3", "Symposium", "Academic", "2025-11-12").unwrap(),
        ];
        let groups = group_by_category(events);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, "Academic");
        assert_eq!(groups[0].events.len(), 2);
        assert_eq!(groups[1].category, "Tech");
    }
}
