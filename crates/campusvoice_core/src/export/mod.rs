//! Data export formats for the dashboard.

pub mod csv;
