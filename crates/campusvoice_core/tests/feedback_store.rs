use campusvoice_core::{
    parse_timestamp, score_sentiment, CredentialVerifier, Feedback, FeedbackDraft,
    FeedbackRepository, FeedbackService, InMemoryFeedbackRepository, MockCredentialVerifier,
    NewFeedback, Rating, RepoError, ServiceError, ValidationError,
};
use std::time::Duration;
use uuid::Uuid;

fn rating(stars: u8) -> Rating {
    Rating::new(stars).unwrap()
}

#[test]
fn created_feedback_lists_with_independently_derived_sentiment() {
    let mut repo = InMemoryFeedbackRepository::seeded().unwrap();
    let comment = "Helpful mentors but a boring keynote";
    let created = repo
        .create_feedback(NewFeedback::new("event3", rating(4), comment))
        .unwrap();

    let listed = repo.list_feedback().unwrap();
    let stored = listed.iter().find(|item| item.id == created.id).unwrap();
    assert_eq!(stored.sentiment_score, score_sentiment(rating(4), comment));
    assert_eq!(stored, &created);
}

#[test]
fn seeded_store_scores_seed_feedback_like_new_submissions() {
    let repo = InMemoryFeedbackRepository::seeded().unwrap();
    let events = repo.list_events().unwrap();
    let feedback = repo.list_feedback().unwrap();

    assert_eq!(events.len(), 8);
    assert_eq!(feedback.len(), 5);
    for item in &feedback {
        assert_eq!(
            item.sentiment_score,
            score_sentiment(item.rating, &item.comment)
        );
        assert!(!item.is_anonymous || item.author.is_none());
    }
}

#[test]
fn generated_ids_are_unique_and_time_ordered() {
    let mut repo = InMemoryFeedbackRepository::seeded().unwrap();
    let first = repo
        .create_feedback(NewFeedback::new("event1", rating(3), ""))
        .unwrap();
    let second = repo
        .create_feedback(NewFeedback::new("event1", rating(3), ""))
        .unwrap();

    assert_ne!(first.id, second.id);
    assert!(first.id < second.id);
    assert!(first.created_at <= second.created_at);
    let seeded_max = Uuid::from_u128(5);
    assert!(seeded_max < first.id);
}

#[test]
fn listing_by_event_filters_and_tolerates_dangling_ids() {
    let mut repo = InMemoryFeedbackRepository::seeded().unwrap();
    repo.create_feedback(NewFeedback::new("no-such-event", rating(2), "meh"))
        .unwrap();

    assert_eq!(repo.list_feedback_by_event("event1").unwrap().len(), 2);
    assert_eq!(repo.list_feedback_by_event("no-such-event").unwrap().len(), 1);
    assert!(repo.get_event("no-such-event").unwrap().is_none());
    assert_eq!(
        repo.get_event("event2").unwrap().unwrap().name,
        "Career Fair"
    );
}

#[test]
fn insert_rejects_records_that_break_invariants() {
    let mut repo = InMemoryFeedbackRepository::default();
    let mut feedback = Feedback::record(
        Uuid::now_v7(),
        parse_timestamp("2025-10-01T12:00:00Z").unwrap(),
        NewFeedback::new("event2", rating(5), ""),
    );
    feedback.sentiment_score = 1.5;

    let err = repo.insert_feedback(feedback).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::SentimentOutOfRange(_))
    ));
    assert!(repo.list_feedback().unwrap().is_empty());
}

#[test]
fn imported_or_deserialized_scores_must_match_rating_and_comment() {
    let value = serde_json::json!({
        "id": "00000000-0000-0000-0000-00000000002b",
        "event_id": "event1",
        "rating": 1,
        "comment": "terrible",
        "sentiment_score": 0.9,
        "created_at": "2025-09-11T09:30:00Z",
        "is_anonymous": true,
        "author": null
    });
    let err = serde_json::from_value::<Feedback>(value).unwrap_err();
    assert!(
        err.to_string().contains("does not match rating and comment"),
        "unexpected error: {err}"
    );

    let mut repo = InMemoryFeedbackRepository::default();
    let mut feedback = Feedback::record(
        Uuid::now_v7(),
        parse_timestamp("2025-09-11T09:30:00Z").unwrap(),
        NewFeedback::new("event1", rating(1), "terrible").anonymous(),
    );
    feedback.sentiment_score = 0.9;
    let err = repo.insert_feedback(feedback.clone()).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::SentimentMismatch { .. })
    ));
    assert!(repo.list_feedback().unwrap().is_empty());

    feedback.sentiment_score = score_sentiment(rating(1), "terrible");
    repo.insert_feedback(feedback).unwrap();
    assert_eq!(repo.list_feedback().unwrap()[0].sentiment_score, -1.0);
}

#[test]
fn service_submits_draft_with_author_from_verified_user() {
    let verifier = MockCredentialVerifier::with_demo_accounts();
    let student = verifier
        .verify("student@university.edu", "student123")
        .unwrap();
    let mut service = FeedbackService::new(InMemoryFeedbackRepository::seeded().unwrap())
        .with_submit_latency(Duration::from_millis(1));

    let draft = FeedbackDraft {
        event_id: "event5".to_string(),
        rating: 5,
        comment: "Awesome food stalls".to_string(),
        is_anonymous: false,
    };
    let created = service.submit_draft(draft, Some(&student)).unwrap();
    assert_eq!(created.author.as_ref().unwrap().name, "Student User");
    assert_eq!(created.sentiment_score, 1.0);

    let for_event = service.list_feedback_for(Some("event5")).unwrap();
    assert_eq!(for_event, vec![created]);
    assert_eq!(service.list_feedback_for(None).unwrap().len(), 6);
}

#[test]
fn service_rejects_incomplete_drafts_without_touching_the_store() {
    let mut service = FeedbackService::new(InMemoryFeedbackRepository::seeded().unwrap());

    let missing_rating = FeedbackDraft {
        event_id: "event1".to_string(),
        ..FeedbackDraft::default()
    };
    let err = service.submit_draft(missing_rating, None).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::MissingRating)
    ));

    let out_of_range = FeedbackDraft {
        event_id: "event1".to_string(),
        rating: 9,
        ..FeedbackDraft::default()
    };
    let err = service.submit_draft(out_of_range, None).unwrap_err();
    assert_eq!(err.to_string(), "rating (9) must be between 1 and 5");

    assert_eq!(service.list_feedback().unwrap().len(), 5);
}

#[test]
fn events_group_by_category_for_the_form_selector() {
    let service = FeedbackService::new(InMemoryFeedbackRepository::seeded().unwrap());
    let groups = service.events_by_category().unwrap();
    let categories: Vec<&str> = groups.iter().map(|group| group.category.as_str()).collect();
    assert_eq!(
        categories,
        vec![
            "Social",
            "Academic",
            "Tech",
            "Networking",
            "Cultural",
            "Governance",
            "Athletics"
        ]
    );
    assert_eq!(groups[1].events.len(), 2);
}

#[test]
fn feedback_serializes_with_expected_wire_fields() {
    let feedback = Feedback::record(
        Uuid::from_u128(42),
        parse_timestamp("2025-09-11T09:30:00Z").unwrap(),
        NewFeedback::new("event1", rating(2), "bad sound").anonymous(),
    );

    let json = serde_json::to_value(&feedback).unwrap();
    assert_eq!(json["event_id"], "event1");
    assert_eq!(json["rating"], 2);
    assert_eq!(json["sentiment_score"], -0.6);
    assert_eq!(json["created_at"], "2025-09-11T09:30:00Z");
    assert_eq!(json["is_anonymous"], true);
    assert!(json["author"].is_null());

    let decoded: Feedback = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, feedback);
}

#[test]
fn deserialize_rejects_invalid_rating_and_anonymous_author() {
    let value = serde_json::json!({
        "id": "00000000-0000-0000-0000-00000000002a",
        "event_id": "event1",
        "rating": 7,
        "comment": "",
        "sentiment_score": 0.0,
        "created_at": "2025-09-11T09:30:00Z",
        "is_anonymous": false,
        "author": null
    });
    let err = serde_json::from_value::<Feedback>(value).unwrap_err();
    assert!(err.to_string().contains("rating (7)"), "unexpected error: {err}");

    let value = serde_json::json!({
        "id": "00000000-0000-0000-0000-00000000002a",
        "event_id": "event1",
        "rating": 3,
        "comment": "",
        "sentiment_score": 0.0,
        "created_at": "2025-09-11T09:30:00Z",
        "is_anonymous": true,
        "author": { "user_id": 2, "name": "Student User" }
    });
    let err = serde_json::from_value::<Feedback>(value).unwrap_err();
    assert!(
        err.to_string().contains("anonymous feedback"),
        "unexpected error: {err}"
    );
}
