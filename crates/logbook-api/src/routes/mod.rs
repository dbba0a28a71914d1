//! Route modules for the Logbook API.

pub mod event_logs;
pub mod event_sources;
pub mod health;
