//! FFI use-case API for the Flutter dashboard.
//!
//! # Responsibility
//! - Expose login, feedback submission and dashboard analytics to Dart via FRB.
//! - Keep one seeded in-memory store and one signed-in user per process.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Failures are reported through `ok=false` envelopes with a message.
//! - Dashboard calls require an admin session; submission requires any session.

use campusvoice_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    CoreConfig, CredentialVerifier, DashboardResult, DashboardService, Event, Feedback,
    FeedbackDraft, FeedbackService, InMemoryFeedbackRepository, MockCredentialVerifier,
    UserIdentity,
};
use log::{info, warn};
use std::sync::Mutex;
use std::time::Duration;

type StoreService = FeedbackService<InMemoryFeedbackRepository>;

static STORE: Mutex<Option<StoreService>> = Mutex::new(None);
static SESSION: Mutex<Option<UserIdentity>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Signed-in user returned by [`login`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub user_id: u32,
    pub name: String,
    pub email: String,
    /// `admin|student`.
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    pub ok: bool,
    pub user: Option<SessionUser>,
    pub message: String,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitFeedbackResponse {
    pub ok: bool,
    /// Created feedback ID in string form.
    pub feedback_id: Option<String>,
    pub sentiment_score: Option<f64>,
    pub message: String,
}

impl SubmitFeedbackResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            feedback_id: None,
            sentiment_score: None,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventItem {
    pub event_id: String,
    pub name: String,
    pub category: String,
    /// `YYYY-MM-DD`.
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCategoryItem {
    pub category: String,
    pub events: Vec<EventItem>,
}

/// Event selector contents, grouped by category in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventListResponse {
    pub ok: bool,
    pub categories: Vec<EventCategoryItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummaryResponse {
    pub ok: bool,
    /// Name of the filtered event, when the filter names a known event.
    pub event_name: Option<String>,
    pub total: u32,
    pub average_sentiment: f64,
    pub average_rating: f64,
    /// `positive|neutral|negative`.
    pub trend: String,
    /// `Improving|Stable|Declining`.
    pub trend_label: String,
    pub positive_percent: u32,
    pub neutral_percent: u32,
    pub negative_percent: u32,
    /// Average sentiment mapped onto `0..=100` for the gauge.
    pub gauge_percent: u32,
    pub message: String,
}

impl DashboardSummaryResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            event_name: None,
            total: 0,
            average_sentiment: 0.0,
            average_rating: 0.0,
            trend: String::new(),
            trend_label: String::new(),
            positive_percent: 0,
            neutral_percent: 0,
            negative_percent: 0,
            gauge_percent: 0,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WordCloudItem {
    pub text: String,
    pub count: u32,
    pub mean_sentiment: f64,
    pub relative_weight: f64,
    /// `positive|neutral|negative`.
    pub tone: String,
    pub emphasized: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WordCloudResponse {
    pub ok: bool,
    pub words: Vec<WordCloudItem>,
    pub message: String,
}

/// Chart series, oldest point first.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendResponse {
    pub ok: bool,
    pub labels: Vec<String>,
    pub sentiment_scores: Vec<f64>,
    pub normalized_ratings: Vec<f64>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackListItem {
    pub feedback_id: String,
    pub event_name: String,
    pub author: String,
    pub rating: u8,
    pub comment: String,
    pub sentiment_score: f64,
    pub sentiment_label: String,
    /// RFC 3339, UTC.
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackListResponse {
    pub ok: bool,
    pub items: Vec<FeedbackListItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExportResponse {
    pub ok: bool,
    pub file_name: String,
    pub content: String,
    pub rows: u32,
    pub message: String,
}

/// Verifies credentials and starts a session for the matching user.
///
/// # FFI contract
/// - Sync call; sleeps for the configured login latency.
/// - Replaces any existing session on success, keeps it on failure.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn login(email: String, password: String) -> LoginResponse {
    let failure = |message: String| LoginResponse {
        ok: false,
        user: None,
        message,
    };
    let config = match CoreConfig::from_env() {
        Ok(config) => config,
        Err(err) => return failure(format!("login failed: {err}")),
    };
    let verifier = MockCredentialVerifier::with_demo_accounts().with_latency(config.login_latency);
    let identity = match verifier.verify(email.as_str(), password.as_str()) {
        Ok(identity) => identity,
        Err(err) => return failure(err.to_string()),
    };

    let mut session = match SESSION.lock() {
        Ok(session) => session,
        Err(_) => return failure("login failed: session lock poisoned".to_string()),
    };
    info!(
        "event=ffi_login module=ffi status=ok user_id={} role={}",
        identity.id,
        identity.role.as_str()
    );
    let user = to_session_user(&identity);
    *session = Some(identity);
    LoginResponse {
        ok: true,
        message: format!("Signed in as {}.", user.name),
        user: Some(user),
    }
}

/// Ends the current session, if any.
#[flutter_rust_bridge::frb(sync)]
pub fn logout() -> ActionResponse {
    match SESSION.lock() {
        Ok(mut session) => {
            let message = if session.take().is_some() {
                "Signed out."
            } else {
                "No active session."
            };
            ActionResponse {
                ok: true,
                message: message.to_string(),
            }
        }
        Err(_) => ActionResponse {
            ok: false,
            message: "logout failed: session lock poisoned".to_string(),
        },
    }
}

/// Submits feedback from the form as the signed-in user.
///
/// Input semantics:
/// - `event_id`: empty means no event was picked.
/// - `rating`: `0` means no star was picked; otherwise `1..=5`.
///
/// # FFI contract
/// - Sync call; sleeps for the configured submit latency without holding
///   the store, so concurrent reads are not blocked.
/// - Never panics; validation errors come back as the form message.
#[flutter_rust_bridge::frb(sync)]
pub fn submit_feedback(
    event_id: String,
    rating: u8,
    comment: String,
    is_anonymous: bool,
) -> SubmitFeedbackResponse {
    let user = match current_user() {
        Ok(Some(user)) => user,
        Ok(None) => return SubmitFeedbackResponse::failure("Please sign in to submit feedback"),
        Err(err) => return SubmitFeedbackResponse::failure(err),
    };
    let config = match CoreConfig::from_env() {
        Ok(config) => config,
        Err(err) => return SubmitFeedbackResponse::failure(format!("submit failed: {err}")),
    };
    let draft = FeedbackDraft {
        event_id,
        rating,
        comment,
        is_anonymous,
    };

    match submit_with_latency(draft, &user, config.submit_latency) {
        Ok(feedback) => SubmitFeedbackResponse {
            ok: true,
            feedback_id: Some(feedback.id.to_string()),
            sentiment_score: Some(feedback.sentiment_score),
            message: "Feedback submitted successfully!".to_string(),
        },
        Err(err) => SubmitFeedbackResponse::failure(err),
    }
}

/// Lists events for the form selector.
#[flutter_rust_bridge::frb(sync)]
pub fn list_events() -> EventListResponse {
    match with_store(|service| service.events_by_category().map_err(|err| err.to_string())) {
        Ok(groups) => EventListResponse {
            ok: true,
            message: format!("Found {} categories.", groups.len()),
            categories: groups
                .into_iter()
                .map(|group| EventCategoryItem {
                    category: group.category,
                    events: group.events.iter().map(to_event_item).collect(),
                })
                .collect(),
        },
        Err(err) => EventListResponse {
            ok: false,
            categories: Vec::new(),
            message: format!("list_events failed: {err}"),
        },
    }
}

/// Summary cards and gauge for the dashboard.
///
/// `event_id=None` selects all feedback.
#[flutter_rust_bridge::frb(sync)]
pub fn dashboard_summary(event_id: Option<String>) -> DashboardSummaryResponse {
    let filter = event_id.as_deref();
    match with_dashboard(|dashboard| {
        Ok((
            dashboard.summary(filter)?,
            dashboard.selected_event(filter)?,
        ))
    }) {
        Ok((summary, event)) => DashboardSummaryResponse {
            ok: true,
            event_name: event.map(|event| event.name),
            total: saturating_u32(summary.total),
            average_sentiment: summary.average_sentiment,
            average_rating: summary.average_rating,
            trend: summary.trend.as_str().to_string(),
            trend_label: summary.trend.label().to_string(),
            positive_percent: summary.distribution.positive,
            neutral_percent: summary.distribution.neutral,
            negative_percent: summary.distribution.negative,
            gauge_percent: summary.sentiment_gauge_percent(),
            message: format!("Summarized {} feedback item(s).", summary.total),
        },
        Err(err) => DashboardSummaryResponse::failure(format!("dashboard_summary failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn dashboard_word_cloud(event_id: Option<String>) -> WordCloudResponse {
    match with_dashboard(|dashboard| dashboard.word_cloud(event_id.as_deref())) {
        Ok(words) => {
            let message = if words.is_empty() {
                "No feedback comments available for word cloud".to_string()
            } else {
                format!("Found {} word(s).", words.len())
            };
            WordCloudResponse {
                ok: true,
                words: words
                    .into_iter()
                    .map(|word| WordCloudItem {
                        tone: word.tone().as_str().to_string(),
                        emphasized: word.is_emphasized(),
                        count: saturating_u32(word.count),
                        mean_sentiment: word.mean_sentiment,
                        relative_weight: word.relative_weight,
                        text: word.text,
                    })
                    .collect(),
                message,
            }
        }
        Err(err) => WordCloudResponse {
            ok: false,
            words: Vec::new(),
            message: format!("dashboard_word_cloud failed: {err}"),
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn dashboard_trend(event_id: Option<String>) -> TrendResponse {
    match with_dashboard(|dashboard| dashboard.trend_series(event_id.as_deref())) {
        Ok(series) => TrendResponse {
            ok: true,
            labels: series.labels(),
            sentiment_scores: series.sentiment_scores(),
            normalized_ratings: series.normalized_ratings(),
            message: format!("Built {} point(s).", series.points.len()),
        },
        Err(err) => TrendResponse {
            ok: false,
            labels: Vec::new(),
            sentiment_scores: Vec::new(),
            normalized_ratings: Vec::new(),
            message: format!("dashboard_trend failed: {err}"),
        },
    }
}

/// Feedback list rows, newest first.
#[flutter_rust_bridge::frb(sync)]
pub fn dashboard_feedback(event_id: Option<String>) -> FeedbackListResponse {
    match with_dashboard(|dashboard| dashboard.feedback_views(event_id.as_deref())) {
        Ok(views) => FeedbackListResponse {
            ok: true,
            message: format!("Found {} feedback item(s).", views.len()),
            items: views
                .into_iter()
                .map(|view| FeedbackListItem {
                    feedback_id: view.feedback_id.to_string(),
                    event_name: view.event_name,
                    author: view.author_display,
                    rating: view.rating,
                    comment: view.comment,
                    sentiment_score: view.sentiment_score,
                    sentiment_label: view.sentiment_label.display().to_string(),
                    created_at: view.created_at.to_rfc3339(),
                })
                .collect(),
        },
        Err(err) => FeedbackListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("dashboard_feedback failed: {err}"),
        },
    }
}

/// Renders the current selection as CSV for download.
///
/// # FFI contract
/// - Returns content only; writing the file is left to the caller.
/// - File name carries today's UTC date.
#[flutter_rust_bridge::frb(sync)]
pub fn export_feedback_csv(event_id: Option<String>) -> CsvExportResponse {
    let today = chrono::Utc::now().date_naive();
    match with_dashboard(|dashboard| dashboard.export_csv(event_id.as_deref(), today)) {
        Ok(export) => CsvExportResponse {
            ok: true,
            message: format!("Exported {} row(s).", export.rows),
            rows: saturating_u32(export.rows),
            file_name: export.file_name,
            content: export.content,
        },
        Err(err) => CsvExportResponse {
            ok: false,
            file_name: String::new(),
            content: String::new(),
            rows: 0,
            message: format!("export_feedback_csv failed: {err}"),
        },
    }
}

fn current_user() -> Result<Option<UserIdentity>, String> {
    SESSION
        .lock()
        .map(|session| session.clone())
        .map_err(|_| "session lock poisoned".to_string())
}

fn with_store<T>(f: impl FnOnce(&mut StoreService) -> Result<T, String>) -> Result<T, String> {
    let mut guard = STORE
        .lock()
        .map_err(|_| "store lock poisoned".to_string())?;
    if guard.is_none() {
        *guard = Some(open_store()?);
    }
    match guard.as_mut() {
        Some(service) => f(service),
        None => Err("store unavailable".to_string()),
    }
}

// Validation and latency happen outside the store lock; only the write holds it.
fn submit_with_latency(
    draft: FeedbackDraft,
    user: &UserIdentity,
    latency: Duration,
) -> Result<Feedback, String> {
    let submission = draft
        .validate(Some(user.as_author()))
        .map_err(|err| err.to_string())?;
    if !latency.is_zero() {
        std::thread::sleep(latency);
    }
    with_store(|service| service.submit(submission).map_err(|err| err.to_string()))
}

fn open_store() -> Result<StoreService, String> {
    let repo = InMemoryFeedbackRepository::seeded()
        .map_err(|err| format!("store seed failed: {err}"))?;
    info!("event=ffi_store_open module=ffi status=ok");
    Ok(FeedbackService::new(repo))
}

fn with_dashboard<T>(
    f: impl FnOnce(&DashboardService<'_, InMemoryFeedbackRepository>) -> DashboardResult<T>,
) -> Result<T, String> {
    let Some(user) = current_user()? else {
        warn!("event=ffi_dashboard module=ffi status=error error_code=no_session");
        return Err("not signed in".to_string());
    };
    with_store(|service| {
        let dashboard =
            DashboardService::open(service.repository(), &user).map_err(|err| err.to_string())?;
        f(&dashboard).map_err(|err| err.to_string())
    })
}

fn to_session_user(identity: &UserIdentity) -> SessionUser {
    SessionUser {
        user_id: identity.id,
        name: identity.name.clone(),
        email: identity.email.clone(),
        role: identity.role.as_str().to_string(),
    }
}

fn to_event_item(event: &Event) -> EventItem {
    EventItem {
        event_id: event.id.clone(),
        name: event.name.clone(),
        category: event.category.clone(),
        date: event.date.format("%Y-%m-%d").to_string(),
    }
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
