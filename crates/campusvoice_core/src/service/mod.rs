//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into submission and dashboard use-cases.
//! - Keep FFI/CLI layers decoupled from storage and analytics details.

pub mod dashboard_service;
pub mod feedback_service;
