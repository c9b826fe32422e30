//! Core domain logic for CampusVoice event feedback.
//! This crate owns the feedback records and every analytics computation.

pub mod analytics;
pub mod auth;
pub mod config;
pub mod export;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use analytics::sentiment::{score as score_sentiment, SentimentBucket, SentimentLabel};
pub use analytics::series::{trend_series, TrendPoint, TrendSeries};
pub use analytics::summary::{summarize, SentimentDistribution, SentimentSummary, Trend};
pub use analytics::words::{analyze as analyze_words, WordStat};
pub use auth::credentials::{
    AuthError, CredentialVerifier, MockAccount, MockCredentialVerifier, Role, UserIdentity,
};
pub use config::{ConfigError, CoreConfig};
pub use export::csv::{export_feedback_csv, write_export};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::event::{Event, EventId, UNKNOWN_EVENT_NAME};
pub use model::feedback::{
    parse_timestamp, AuthorIdentity, Feedback, FeedbackDraft, FeedbackId, NewFeedback, Rating,
};
pub use model::validation::ValidationError;
pub use repo::feedback_repo::{
    FeedbackRepository, InMemoryFeedbackRepository, RepoError, RepoResult,
};
pub use service::dashboard_service::{
    CsvExport, DashboardError, DashboardResult, DashboardService, FeedbackView,
};
pub use service::feedback_service::{
    EventCategory, FeedbackService, ServiceError, ServiceResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
