//! Command handlers for the Journal context.
//!
//! Application-level functions that orchestrate a single mutating
//! operation each: validate input, resolve the source through the
//! registry, and drive the repositories.

use logbook_core::clock::Clock;
use logbook_core::error::DomainError;
use logbook_core::model::{EventLog, EventSource};
use logbook_core::repository::{LogRepository, SourceRepository};

use crate::application::registry;
use crate::domain::commands::{
    AppendEventLog, CreateEventSource, DeleteEventSource, PruneEventLogs,
};

/// Result of a successfully handled prune command.
#[derive(Debug)]
pub struct PruneReport {
    /// Number of logs actually deleted; less than the requested count
    /// when fewer logs existed.
    pub deleted: u64,
}

/// Handles `CreateEventSource`: delegates to the registry, so creating a
/// source that already exists returns the existing row unchanged.
///
/// # Errors
///
/// Returns `DomainError::Validation` for an empty name.
pub async fn handle_create_event_source(
    command: &CreateEventSource,
    sources: &dyn SourceRepository,
) -> Result<EventSource, DomainError> {
    registry::resolve(&command.name, sources).await
}

/// Handles `AppendEventLog`: resolves the source (creating it on first
/// use), stamps the current time, and inserts the log row.
///
/// The timestamp always comes from `clock`; nothing the client sends can
/// influence it.
///
/// # Errors
///
/// Returns `DomainError::Validation` when either field is empty, before
/// any storage access.
pub async fn handle_append_event_log(
    command: &AppendEventLog,
    clock: &dyn Clock,
    sources: &dyn SourceRepository,
    logs: &dyn LogRepository,
) -> Result<EventLog, DomainError> {
    if command.event_source_name.is_empty() || command.content.is_empty() {
        return Err(DomainError::Validation(
            "Missing event_source_name or content".to_owned(),
        ));
    }

    let source = registry::resolve(&command.event_source_name, sources).await?;
    let timestamp = clock.now();
    logs.insert(source.id, timestamp, &command.content).await
}

/// Handles `PruneEventLogs`: deletes the `count` oldest logs of an
/// existing source.
///
/// Pruning never creates the source; an unknown name is an error. A count
/// of zero is a successful no-op, and a count larger than the number of
/// existing logs deletes all of them.
///
/// # Errors
///
/// Returns `DomainError::Validation` for an empty name or negative count,
/// and `DomainError::NotFound` for an unknown source.
pub async fn handle_prune_event_logs(
    command: &PruneEventLogs,
    sources: &dyn SourceRepository,
    logs: &dyn LogRepository,
) -> Result<PruneReport, DomainError> {
    if command.event_source_name.is_empty() {
        return Err(DomainError::Validation(
            "Missing event_source_name".to_owned(),
        ));
    }
    if command.count < 0 {
        return Err(DomainError::Validation(
            "Invalid count: must be a non-negative integer".to_owned(),
        ));
    }

    let source = sources
        .find_by_name(&command.event_source_name)
        .await?
        .ok_or_else(|| DomainError::NotFound("Event source not found".to_owned()))?;

    let deleted = logs.delete_oldest(source.id, command.count).await?;
    Ok(PruneReport { deleted })
}

/// Handles `DeleteEventSource`: removes the source and, by cascade, all
/// of its logs.
///
/// # Errors
///
/// Returns `DomainError::NotFound` when no source has the given id.
pub async fn handle_delete_event_source(
    command: &DeleteEventSource,
    sources: &dyn SourceRepository,
) -> Result<(), DomainError> {
    let removed = sources.delete(command.event_source_id).await?;
    if removed {
        Ok(())
    } else {
        Err(DomainError::NotFound("Event source not found".to_owned()))
    }
}
