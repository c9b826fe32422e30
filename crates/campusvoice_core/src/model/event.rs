//! Campus event records.
//!
//! # Invariants
//! - Events are seeded at startup and never mutated or deleted.
//! - `id` is unique within one store.

use crate::model::validation::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Event identifier as used by feedback references (`event1`, `event2`, ...).
pub type EventId = String;

/// Display name used when feedback references an event the store does not know.
pub const UNKNOWN_EVENT_NAME: &str = "Unknown Event";

/// A campus event that feedback can be submitted for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    /// Free-text grouping label (`Social`, `Academic`, ...).
    pub category: String,
    /// Calendar day, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
}

impl Event {
    /// Builds an event from its textual seed form.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidDate`] when `date` is not `YYYY-MM-DD`.
    pub fn new(
        id: impl Into<EventId>,
        name: impl Into<String>,
        category: impl Into<String>,
        date: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            date: parse_event_date(date)?,
        })
    }
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_event_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|err| {
        ValidationError::InvalidDate {
            value: value.to_string(),
            message: err.to_string(),
        }
    })
}

/// Resolves the display name for `event_id`, tolerating dangling references.
pub fn event_display_name<'a>(events: &'a [Event], event_id: &str) -> &'a str {
    events
        .iter()
        .find(|event| event.id == event_id)
        .map_or(UNKNOWN_EVENT_NAME, |event| event.name.as_str())
}
