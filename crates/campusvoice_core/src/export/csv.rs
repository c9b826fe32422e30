//! CSV export of a feedback selection.
//!
//! # Invariants
//! - Column order is fixed: see [`CSV_HEADERS`].
//! - `"` inside a field is doubled; a field containing `,` after that is
//!   wrapped in double quotes. Nothing else is quoted.
//! - Rows are joined with `\n`, without a trailing newline.

use crate::model::event::Event;
use crate::model::feedback::Feedback;
use chrono::NaiveDate;
use log::info;
use std::io;
use std::path::{Path, PathBuf};

pub const CSV_HEADERS: [&str; 7] = [
    "Event",
    "Rating",
    "Comment",
    "Sentiment Score",
    "Date",
    "Time",
    "Anonymous",
];

/// Event column value for feedback whose event is unknown to the store.
pub const UNKNOWN_EVENT_EXPORT_NAME: &str = "Unknown";

/// Renders `feedback` as CSV text, resolving event names from `events`.
///
/// An empty selection yields only the header row.
pub fn export_feedback_csv(feedback: &[Feedback], events: &[Event]) -> String {
    let mut lines = Vec::with_capacity(feedback.len() + 1);
    lines.push(CSV_HEADERS.join(","));

    for item in feedback {
        let event_name = events
            .iter()
            .find(|event| event.id == item.event_id)
            .map_or(UNKNOWN_EVENT_EXPORT_NAME, |event| event.name.as_str());
        let fields = [
            event_name.to_string(),
            item.rating.get().to_string(),
            item.comment.clone(),
            item.sentiment_score.to_string(),
            item.created_at.format("%Y-%m-%d").to_string(),
            item.created_at.format("%H:%M:%S").to_string(),
            if item.is_anonymous { "Yes" } else { "No" }.to_string(),
        ];
        lines.push(
            fields
                .iter()
                .map(|field| escape_field(field))
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    lines.join("\n")
}

/// Escapes one CSV field.
pub fn escape_field(value: &str) -> String {
    let escaped = value.replace('"', "\"\"");
    if escaped.contains(',') {
        format!("\"{escaped}\"")
    } else {
        escaped
    }
}

/// `feedback-data-YYYY-MM-DD.csv`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("feedback-data-{}.csv", date.format("%Y-%m-%d"))
}

/// Writes `csv` into `dir` under the dated export file name.
pub fn write_export(dir: &Path, csv: &str, date: NaiveDate) -> io::Result<PathBuf> {
    let path = dir.join(export_file_name(date));
    std::fs::write(&path, csv)?;
    info!(
        "event=export_write module=export status=ok bytes={} file={}",
        csv.len(),
        path.display()
    );
    Ok(path)
}
