//! Feedback analytics.
//!
//! # Responsibility
//! - Score sentiment for new feedback.
//! - Aggregate snapshots into summaries, word clouds and chart series.
//!
//! # Invariants
//! - Every function is pure over the slice it receives; nothing is cached.
//! - Inputs are never mutated.

pub mod sentiment;
pub mod series;
pub mod summary;
pub mod words;
