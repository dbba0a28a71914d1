//! Domain models for event sources and event logs.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A named origin of event logs.
///
/// `name` is unique across all sources (case-sensitive exact match) and
/// immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventSource {
    /// Store-assigned identifier.
    pub id: i64,
    /// Unique source name.
    pub name: String,
}

/// A single event log entry, denormalized with its source name.
///
/// This is the projection every read and write path returns; `timestamp`
/// serializes as an ISO-8601 string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventLog {
    /// Store-assigned identifier.
    pub id: i64,
    /// The source this log belongs to.
    pub event_source_id: i64,
    /// Server-assigned insertion time. The sole ordering key for "oldest".
    pub timestamp: DateTime<Utc>,
    /// Log message body, never empty.
    pub content: String,
    /// Name of the owning source, joined in at read time.
    pub event_source_name: String,
}
