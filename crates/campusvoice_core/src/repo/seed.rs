//! Demo events and feedback loaded into a fresh in-memory store.

use crate::model::event::Event;
use crate::model::feedback::{parse_timestamp, AuthorIdentity, Feedback, NewFeedback, Rating};
use crate::model::validation::ValidationError;
use uuid::Uuid;

const SEED_EVENTS: &[(&str, &str, &str, &str)] = &[
    ("event1", "Fall Welcome Festival", "Social", "2025-09-10"),
    ("event2", "Career Fair", "Academic", "2025-10-15"),
    ("event3", "Hackathon 2025", "Tech", "2025-11-01"),
    ("event4", "Alumni Networking Night", "Networking", "2025-09-25"),
    ("event5", "Cultural Festival", "Cultural", "2025-10-05"),
    ("event6", "Student Council Meeting", "Governance", "2025-09-18"),
    ("event7", "Sports Tournament", "Athletics", "2025-10-22"),
    ("event8", "Research Symposium", "Academic", "2025-11-12"),
];

struct SeedFeedback {
    event_id: &'static str,
    rating: u8,
    comment: &'static str,
    created_at: &'static str,
    author: Option<(u32, &'static str)>,
}

const SEED_FEEDBACK: &[SeedFeedback] = &[
    SeedFeedback {
        event_id: "event1",
        rating: 4,
        comment: "Great event! Really enjoyed the activities.",
        created_at: "2025-09-11T09:30:00Z",
        author: Some((2, "Student User")),
    },
    SeedFeedback {
        event_id: "event2",
        rating: 3,
        comment: "It was okay. Could have been better organized.",
        created_at: "2025-10-16T14:20:00Z",
        author: None,
    },
    SeedFeedback {
        event_id: "event3",
        rating: 5,
        comment: "Amazing experience! Learned so much and met great people.",
        created_at: "2025-11-02T18:45:00Z",
        author: Some((2, "Student User")),
    },
    SeedFeedback {
        event_id: "event1",
        rating: 2,
        comment: "Disappointing. The venue was too crowded and hot.",
        created_at: "2025-09-11T11:15:00Z",
        author: None,
    },
    SeedFeedback {
        event_id: "event4",
        rating: 4,
        comment: "Very useful networking opportunity.",
        created_at: "2025-09-26T20:10:00Z",
        author: Some((2, "Student User")),
    },
];

pub fn seed_events() -> Result<Vec<Event>, ValidationError> {
    SEED_EVENTS
        .iter()
        .map(|(id, name, category, date)| Event::new(*id, *name, *category, date))
        .collect()
}

/// Seed feedback, scored like any new submission.
///
/// Seed ids are small fixed values, so they sort before every generated id.
pub fn seed_feedback() -> Result<Vec<Feedback>, ValidationError> {
    SEED_FEEDBACK
        .iter()
        .zip(1_u128..)
        .map(|(seed, ordinal)| {
            let mut submission =
                NewFeedback::new(seed.event_id, Rating::new(seed.rating)?, seed.comment);
            submission = match seed.author {
                Some((user_id, name)) => submission.with_author(AuthorIdentity {
                    user_id,
                    name: name.to_string(),
                }),
                None => submission.anonymous(),
            };
            Ok(Feedback::record(
                Uuid::from_u128(ordinal),
                parse_timestamp(seed.created_at)?,
                submission,
            ))
        })
        .collect()
}
