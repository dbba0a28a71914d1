//! Repository abstractions over the relational store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::model::{EventLog, EventSource};

/// Repository for event sources.
///
/// The store enforces name uniqueness; `insert_if_absent` leans on that
/// constraint so concurrent first-writers for the same name can never
/// produce two rows.
#[async_trait]
pub trait SourceRepository: Send + Sync {
    /// Look up a source by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<EventSource>, DomainError>;

    /// Look up a source by exact, case-sensitive name.
    async fn find_by_name(&self, name: &str) -> Result<Option<EventSource>, DomainError>;

    /// All sources, in stable id order.
    async fn list(&self) -> Result<Vec<EventSource>, DomainError>;

    /// Insert a source with the given name; a no-op when the name already
    /// exists.
    async fn insert_if_absent(&self, name: &str) -> Result<(), DomainError>;

    /// Delete a source and, by cascade, all of its logs. Returns `false`
    /// when no source has that id.
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;
}

/// Repository for event logs.
///
/// Listings are ordered newest-first (`timestamp` descending, ties broken
/// by descending id); "oldest" in `delete_oldest` is the exact mirror.
#[async_trait]
pub trait LogRepository: Send + Sync {
    /// Insert a log bound to a resolved source and return the stored row
    /// joined with its source name.
    async fn insert(
        &self,
        event_source_id: i64,
        timestamp: DateTime<Utc>,
        content: &str,
    ) -> Result<EventLog, DomainError>;

    /// Look up a log by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<EventLog>, DomainError>;

    /// All logs, newest first.
    async fn list_all(&self) -> Result<Vec<EventLog>, DomainError>;

    /// All logs for one source, newest first. An unknown source id yields
    /// an empty list.
    async fn list_by_source(&self, event_source_id: i64) -> Result<Vec<EventLog>, DomainError>;

    /// Delete the `count` oldest logs for a source (`timestamp` ascending,
    /// ties broken by ascending id). Returns the number actually deleted,
    /// which is less than `count` when fewer logs exist.
    async fn delete_oldest(&self, event_source_id: i64, count: i64) -> Result<u64, DomainError>;
}
