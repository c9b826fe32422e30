//! Admin analytics dashboard use-cases.
//!
//! # Responsibility
//! - Gate analytics behind the admin role.
//! - Apply the optional event filter and hand the selection to analytics.
//!
//! # Invariants
//! - Every call reads a fresh snapshot; nothing is cached between calls.
//! - Dangling event references render as "Unknown Event".

use crate::analytics::sentiment::SentimentLabel;
use crate::analytics::series::{trend_series, TrendSeries};
use crate::analytics::summary::{summarize, SentimentSummary};
use crate::analytics::words::{analyze, WordStat};
use crate::auth::credentials::{Role, UserIdentity};
use crate::export::csv::{export_feedback_csv, export_file_name};
use crate::model::event::{event_display_name, Event};
use crate::model::feedback::{Feedback, FeedbackId};
use crate::repo::feedback_repo::{FeedbackRepository, RepoError};
use chrono::{DateTime, NaiveDate, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DashboardResult<T> = Result<T, DashboardError>;

#[derive(Debug)]
pub enum DashboardError {
    /// Viewer is not an admin.
    AccessDenied { user_id: u32, role: Role },
    Repo(RepoError),
}

impl Display for DashboardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AccessDenied { user_id, role } => write!(
                f,
                "dashboard requires the admin role (user {user_id} has role `{}`)",
                role.as_str()
            ),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DashboardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::AccessDenied { .. } => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for DashboardError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// One row of the feedback list, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackView {
    pub feedback_id: FeedbackId,
    pub event_id: String,
    pub event_name: String,
    pub author_display: String,
    pub rating: u8,
    pub comment: String,
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
    pub created_at: DateTime<Utc>,
}

/// Rendered CSV plus its suggested download name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvExport {
    pub file_name: String,
    pub content: String,
    pub rows: usize,
}

/// Read-only analytics view over a store, opened for one admin.
pub struct DashboardService<'repo, R: FeedbackRepository> {
    repo: &'repo R,
    viewer_id: u32,
}

impl<'repo, R: FeedbackRepository> DashboardService<'repo, R> {
    /// Opens the dashboard for `viewer`.
    ///
    /// # Errors
    /// Returns [`DashboardError::AccessDenied`] unless `viewer` is an admin.
    pub fn open(repo: &'repo R, viewer: &UserIdentity) -> DashboardResult<Self> {
        if !viewer.is_admin() {
            warn!(
                "event=dashboard_open module=service status=error error_code=access_denied user_id={} role={}",
                viewer.id,
                viewer.role.as_str()
            );
            return Err(DashboardError::AccessDenied {
                user_id: viewer.id,
                role: viewer.role,
            });
        }

        info!(
            "event=dashboard_open module=service status=ok user_id={}",
            viewer.id
        );
        Ok(Self {
            repo,
            viewer_id: viewer.id,
        })
    }

    /// Feedback selected by the optional event filter.
    pub fn selection(&self, event_id: Option<&str>) -> DashboardResult<Vec<Feedback>> {
        let feedback = match event_id {
            Some(event_id) => self.repo.list_feedback_by_event(event_id)?,
            None => self.repo.list_feedback()?,
        };
        Ok(feedback)
    }

    /// The filtered event, when the filter names a known event.
    pub fn selected_event(&self, event_id: Option<&str>) -> DashboardResult<Option<Event>> {
        match event_id {
            Some(event_id) => Ok(self.repo.get_event(event_id)?),
            None => Ok(None),
        }
    }

    pub fn summary(&self, event_id: Option<&str>) -> DashboardResult<SentimentSummary> {
        Ok(summarize(&self.selection(event_id)?))
    }

    pub fn word_cloud(&self, event_id: Option<&str>) -> DashboardResult<Vec<WordStat>> {
        Ok(analyze(&self.selection(event_id)?))
    }

    pub fn trend_series(&self, event_id: Option<&str>) -> DashboardResult<TrendSeries> {
        Ok(trend_series(&self.selection(event_id)?))
    }

    /// Feedback rows for the list view, newest first.
    pub fn feedback_views(&self, event_id: Option<&str>) -> DashboardResult<Vec<FeedbackView>> {
        let events = self.repo.list_events()?;
        let mut selection = self.selection(event_id)?;
        selection.sort_by(|left, right| right.created_at.cmp(&left.created_at));

        Ok(selection
            .into_iter()
            .map(|item| FeedbackView {
                event_name: event_display_name(&events, &item.event_id).to_string(),
                author_display: item.author_display().to_string(),
                sentiment_label: SentimentLabel::classify(item.sentiment_score),
                feedback_id: item.id,
                rating: item.rating.get(),
                sentiment_score: item.sentiment_score,
                created_at: item.created_at,
                event_id: item.event_id,
                comment: item.comment,
            })
            .collect())
    }

    /// Renders the filtered selection as CSV, named for `today`.
    pub fn export_csv(&self, event_id: Option<&str>, today: NaiveDate) -> DashboardResult<CsvExport> {
        let events = self.repo.list_events()?;
        let selection = self.selection(event_id)?;
        let content = export_feedback_csv(&selection, &events);

        info!(
            "event=export_csv module=service status=ok user_id={} rows={} filtered={}",
            self.viewer_id,
            selection.len(),
            event_id.is_some()
        );
        Ok(CsvExport {
            file_name: export_file_name(today),
            content,
            rows: selection.len(),
        })
    }
}
