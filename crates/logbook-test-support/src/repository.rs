//! Test repositories — in-memory and failing implementations of the
//! `SourceRepository` and `LogRepository` traits.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use logbook_core::error::DomainError;
use logbook_core::model::{EventLog, EventSource};
use logbook_core::repository::{LogRepository, SourceRepository};

#[derive(Debug, Default)]
struct Inner {
    sources: Vec<EventSource>,
    logs: Vec<EventLog>,
    next_source_id: i64,
    next_log_id: i64,
}

/// An in-memory store implementing both repository traits with the same
/// ordering and cascade semantics as the PostgreSQL repositories.
///
/// Share a single instance across both `Arc<dyn SourceRepository>` and
/// `Arc<dyn LogRepository>` slots so sources and logs stay consistent.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of logs currently held, across all sources.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn log_count(&self) -> usize {
        self.inner.lock().unwrap().logs.len()
    }
}

#[async_trait]
impl SourceRepository for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<EventSource>, DomainError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.sources.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<EventSource>, DomainError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.sources.iter().find(|s| s.name == name).cloned())
    }

    async fn list(&self) -> Result<Vec<EventSource>, DomainError> {
        let inner = self.inner.lock().unwrap();
        let mut sources = inner.sources.clone();
        sources.sort_by_key(|s| s.id);
        Ok(sources)
    }

    async fn insert_if_absent(&self, name: &str) -> Result<(), DomainError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.sources.iter().any(|s| s.name == name) {
            return Ok(());
        }
        inner.next_source_id += 1;
        let source = EventSource {
            id: inner.next_source_id,
            name: name.to_owned(),
        };
        inner.sources.push(source);
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.sources.len();
        inner.sources.retain(|s| s.id != id);
        if inner.sources.len() == before {
            return Ok(false);
        }
        inner.logs.retain(|l| l.event_source_id != id);
        Ok(true)
    }
}

#[async_trait]
impl LogRepository for InMemoryStore {
    async fn insert(
        &self,
        event_source_id: i64,
        timestamp: DateTime<Utc>,
        content: &str,
    ) -> Result<EventLog, DomainError> {
        let mut inner = self.inner.lock().unwrap();
        let source_name = inner
            .sources
            .iter()
            .find(|s| s.id == event_source_id)
            .map(|s| s.name.clone())
            .ok_or_else(|| {
                DomainError::Infrastructure(format!(
                    "foreign key violation: no event source {event_source_id}"
                ))
            })?;
        inner.next_log_id += 1;
        let log = EventLog {
            id: inner.next_log_id,
            event_source_id,
            timestamp,
            content: content.to_owned(),
            event_source_name: source_name,
        };
        inner.logs.push(log.clone());
        Ok(log)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<EventLog>, DomainError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.logs.iter().find(|l| l.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<EventLog>, DomainError> {
        let inner = self.inner.lock().unwrap();
        let mut logs = inner.logs.clone();
        logs.sort_by(|a, b| (b.timestamp, b.id).cmp(&(a.timestamp, a.id)));
        Ok(logs)
    }

    async fn list_by_source(&self, event_source_id: i64) -> Result<Vec<EventLog>, DomainError> {
        let inner = self.inner.lock().unwrap();
        let mut logs: Vec<EventLog> = inner
            .logs
            .iter()
            .filter(|l| l.event_source_id == event_source_id)
            .cloned()
            .collect();
        logs.sort_by(|a, b| (b.timestamp, b.id).cmp(&(a.timestamp, a.id)));
        Ok(logs)
    }

    async fn delete_oldest(&self, event_source_id: i64, count: i64) -> Result<u64, DomainError> {
        let mut inner = self.inner.lock().unwrap();
        let mut candidates: Vec<(DateTime<Utc>, i64)> = inner
            .logs
            .iter()
            .filter(|l| l.event_source_id == event_source_id)
            .map(|l| (l.timestamp, l.id))
            .collect();
        candidates.sort();
        let doomed: Vec<i64> = candidates
            .into_iter()
            .take(usize::try_from(count).unwrap_or(0))
            .map(|(_, id)| id)
            .collect();
        inner.logs.retain(|l| !doomed.contains(&l.id));
        Ok(doomed.len() as u64)
    }
}

/// Repositories that always fail with an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug, Default)]
pub struct FailingStore;

fn connection_refused() -> DomainError {
    DomainError::Infrastructure("connection refused".into())
}

#[async_trait]
impl SourceRepository for FailingStore {
    async fn find_by_id(&self, _id: i64) -> Result<Option<EventSource>, DomainError> {
        Err(connection_refused())
    }

    async fn find_by_name(&self, _name: &str) -> Result<Option<EventSource>, DomainError> {
        Err(connection_refused())
    }

    async fn list(&self) -> Result<Vec<EventSource>, DomainError> {
        Err(connection_refused())
    }

    async fn insert_if_absent(&self, _name: &str) -> Result<(), DomainError> {
        Err(connection_refused())
    }

    async fn delete(&self, _id: i64) -> Result<bool, DomainError> {
        Err(connection_refused())
    }
}

#[async_trait]
impl LogRepository for FailingStore {
    async fn insert(
        &self,
        _event_source_id: i64,
        _timestamp: DateTime<Utc>,
        _content: &str,
    ) -> Result<EventLog, DomainError> {
        Err(connection_refused())
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<EventLog>, DomainError> {
        Err(connection_refused())
    }

    async fn list_all(&self) -> Result<Vec<EventLog>, DomainError> {
        Err(connection_refused())
    }

    async fn list_by_source(&self, _event_source_id: i64) -> Result<Vec<EventLog>, DomainError> {
        Err(connection_refused())
    }

    async fn delete_oldest(&self, _event_source_id: i64, _count: i64) -> Result<u64, DomainError> {
        Err(connection_refused())
    }
}
