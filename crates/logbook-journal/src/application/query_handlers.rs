//! Query handlers for the Journal context.
//!
//! Pure reads over the repositories; no handler here mutates anything.
//! Log projections come back denormalized with the source name attached,
//! newest first.

use logbook_core::error::DomainError;
use logbook_core::model::{EventLog, EventSource};
use logbook_core::repository::{LogRepository, SourceRepository};

/// All event sources, in stable id order.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` when the store fails.
pub async fn list_event_sources(
    sources: &dyn SourceRepository,
) -> Result<Vec<EventSource>, DomainError> {
    sources.list().await
}

/// A single event source by id.
///
/// # Errors
///
/// Returns `DomainError::NotFound` when no source has the given id.
pub async fn get_event_source_by_id(
    id: i64,
    sources: &dyn SourceRepository,
) -> Result<EventSource, DomainError> {
    sources
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::NotFound("Event source not found".to_owned()))
}

/// Every event log, newest first.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` when the store fails.
pub async fn list_event_logs(logs: &dyn LogRepository) -> Result<Vec<EventLog>, DomainError> {
    logs.list_all().await
}

/// A single event log by id.
///
/// # Errors
///
/// Returns `DomainError::NotFound` when no log has the given id.
pub async fn get_event_log_by_id(
    id: i64,
    logs: &dyn LogRepository,
) -> Result<EventLog, DomainError> {
    logs.find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::NotFound("Event log not found".to_owned()))
}

/// All logs for one source, newest first. An unknown source id yields an
/// empty list, not an error.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` when the store fails.
pub async fn list_event_logs_by_source(
    event_source_id: i64,
    logs: &dyn LogRepository,
) -> Result<Vec<EventLog>, DomainError> {
    logs.list_by_source(event_source_id).await
}
