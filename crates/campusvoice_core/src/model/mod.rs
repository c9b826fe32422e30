//! Domain model for campus events and the feedback submitted on them.
//!
//! # Responsibility
//! - Define the records owned by the feedback store.
//! - Enforce input contracts (rating range, timestamps, anonymity) at
//!   construction time.
//!
//! # Invariants
//! - Stored feedback always carries a derived sentiment score.
//! - Analytics consume these records read-only.

pub mod event;
pub mod feedback;
pub mod validation;
