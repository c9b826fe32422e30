use campusvoice_core::{
    CredentialVerifier, DashboardError, DashboardService, FeedbackRepository,
    InMemoryFeedbackRepository, MockCredentialVerifier, NewFeedback, Rating, Role, SentimentLabel,
    Trend, UserIdentity,
};
use chrono::NaiveDate;

fn admin() -> UserIdentity {
    MockCredentialVerifier::with_demo_accounts()
        .verify("admin@university.edu", "admin123")
        .unwrap()
}

fn student() -> UserIdentity {
    MockCredentialVerifier::with_demo_accounts()
        .verify("student@university.edu", "student123")
        .unwrap()
}

#[test]
fn students_cannot_open_the_dashboard() {
    let repo = InMemoryFeedbackRepository::seeded().unwrap();
    let err = DashboardService::open(&repo, &student())
        .err()
        .expect("student must be denied");
    assert!(matches!(
        err,
        DashboardError::AccessDenied {
            user_id: 2,
            role: Role::Student
        }
    ));
}

#[test]
fn overall_summary_covers_all_seed_feedback() {
    let repo = InMemoryFeedbackRepository::seeded().unwrap();
    let dashboard = DashboardService::open(&repo, &admin()).unwrap();

    let summary = dashboard.summary(None).unwrap();
    assert_eq!(summary.total, 5);
    assert!((summary.average_rating - 3.6).abs() < 1e-9);
    assert_eq!(summary.distribution.positive, 60);
    assert_eq!(summary.distribution.neutral, 20);
    assert_eq!(summary.distribution.negative, 20);
}

#[test]
fn event_filter_narrows_every_view() {
    let repo = InMemoryFeedbackRepository::seeded().unwrap();
    let dashboard = DashboardService::open(&repo, &admin()).unwrap();

    assert_eq!(dashboard.summary(Some("event1")).unwrap().total, 2);
    assert_eq!(dashboard.trend_series(Some("event1")).unwrap().points.len(), 2);
    assert_eq!(dashboard.feedback_views(Some("event1")).unwrap().len(), 2);
    assert_eq!(
        dashboard.selected_event(Some("event1")).unwrap().unwrap().name,
        "Fall Welcome Festival"
    );
    assert_eq!(dashboard.summary(Some("event8")).unwrap().total, 0);
    assert_eq!(dashboard.summary(Some("event8")).unwrap().trend, Trend::Neutral);
}

#[test]
fn dashboard_reflects_new_feedback_without_caching() {
    let mut repo = InMemoryFeedbackRepository::seeded().unwrap();
    {
        let dashboard = DashboardService::open(&repo, &admin()).unwrap();
        assert_eq!(dashboard.summary(Some("event7")).unwrap().total, 0);
    }

    repo.create_feedback(NewFeedback::new(
        "event7",
        Rating::new(5).unwrap(),
        "Great great matches",
    ))
    .unwrap();

    let dashboard = DashboardService::open(&repo, &admin()).unwrap();
    assert_eq!(dashboard.summary(Some("event7")).unwrap().total, 1);
    let words = dashboard.word_cloud(Some("event7")).unwrap();
    assert_eq!(words[0].text, "great");
    assert_eq!(words[0].count, 2);
}

#[test]
fn trend_series_orders_points_and_normalizes_ratings() {
    let repo = InMemoryFeedbackRepository::seeded().unwrap();
    let dashboard = DashboardService::open(&repo, &admin()).unwrap();

    let series = dashboard.trend_series(None).unwrap();
    assert_eq!(
        series.labels(),
        vec![
            "Sep 11, 2025",
            "Sep 11, 2025",
            "Sep 26, 2025",
            "Oct 16, 2025",
            "Nov 2, 2025"
        ]
    );
    assert_eq!(series.normalized_ratings(), vec![0.8, 0.4, 0.8, 0.6, 1.0]);
    assert!(series
        .points
        .windows(2)
        .all(|pair| pair[0].created_at <= pair[1].created_at));
}

#[test]
fn feedback_views_are_newest_first_with_display_fields() {
    let mut repo = InMemoryFeedbackRepository::seeded().unwrap();
    repo.create_feedback(NewFeedback::new(
        "retired-event",
        Rating::new(1).unwrap(),
        "awful",
    ))
    .unwrap();
    let dashboard = DashboardService::open(&repo, &admin()).unwrap();

    let views = dashboard.feedback_views(None).unwrap();
    assert_eq!(views.len(), 6);
    assert_eq!(views[0].event_name, "Unknown Event");
    assert_eq!(views[0].author_display, "Anonymous User");
    assert_eq!(views[0].sentiment_label, SentimentLabel::VeryNegative);
    assert!(views
        .windows(2)
        .all(|pair| pair[0].created_at >= pair[1].created_at));

    let hackathon = views
        .iter()
        .find(|view| view.event_id == "event3")
        .unwrap();
    assert_eq!(hackathon.event_name, "Hackathon 2025");
    assert_eq!(hackathon.author_display, "Student User");
    assert_eq!(hackathon.sentiment_label, SentimentLabel::VeryPositive);
}

#[test]
fn export_uses_filtered_selection_and_dated_file_name() {
    let repo = InMemoryFeedbackRepository::seeded().unwrap();
    let dashboard = DashboardService::open(&repo, &admin()).unwrap();
    let today = NaiveDate::from_ymd_opt(2025, 11, 20).unwrap();

    let export = dashboard.export_csv(Some("event1"), today).unwrap();
    assert_eq!(export.file_name, "feedback-data-2025-11-20.csv");
    assert_eq!(export.rows, 2);
    assert_eq!(export.content.lines().count(), 3);
    assert!(export.content.starts_with("Event,Rating,Comment"));
}
