//! Event source registry — idempotent get-or-create by name.
//!
//! Creating a source and getting an existing one by that name are the
//! same operation; duplicate names never fail, they return the existing
//! row. The log writer depends on this module for implicit source
//! creation.

use logbook_core::error::DomainError;
use logbook_core::model::EventSource;
use logbook_core::repository::SourceRepository;

/// Resolves a source name to its row, creating the row on first use.
///
/// The create path is a conflict-ignoring insert on top of the store's
/// unique name constraint, so concurrent first-writers for the same name
/// converge on a single row. After the insert the row is re-read; a miss
/// at that point is a storage anomaly, not a normal condition.
///
/// # Errors
///
/// Returns `DomainError::Validation` for an empty name and
/// `DomainError::Integrity` when the re-read after insert finds nothing.
pub async fn resolve(
    name: &str,
    sources: &dyn SourceRepository,
) -> Result<EventSource, DomainError> {
    if name.is_empty() {
        return Err(DomainError::Validation(
            "Missing event source name".to_owned(),
        ));
    }

    if let Some(existing) = sources.find_by_name(name).await? {
        return Ok(existing);
    }

    sources.insert_if_absent(name).await?;

    sources.find_by_name(name).await?.ok_or_else(|| {
        DomainError::Integrity(format!("event source \"{name}\" not found after insert"))
    })
}
