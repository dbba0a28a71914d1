//! `PostgreSQL` implementation of the `SourceRepository` trait.

use async_trait::async_trait;
use sqlx::PgPool;

use logbook_core::error::DomainError;
use logbook_core::model::EventSource;
use logbook_core::repository::SourceRepository;

use crate::infra;

/// PostgreSQL-backed event source repository.
#[derive(Debug, Clone)]
pub struct PgSourceRepository {
    pool: PgPool,
}

impl PgSourceRepository {
    /// Creates a new `PgSourceRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SourceRow {
    id: i64,
    name: String,
}

impl From<SourceRow> for EventSource {
    fn from(row: SourceRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

#[async_trait]
impl SourceRepository for PgSourceRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<EventSource>, DomainError> {
        let row = sqlx::query_as::<_, SourceRow>("SELECT id, name FROM event_sources WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(infra)?;
        Ok(row.map(EventSource::from))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<EventSource>, DomainError> {
        let row =
            sqlx::query_as::<_, SourceRow>("SELECT id, name FROM event_sources WHERE name = $1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await
                .map_err(infra)?;
        Ok(row.map(EventSource::from))
    }

    async fn list(&self) -> Result<Vec<EventSource>, DomainError> {
        let rows = sqlx::query_as::<_, SourceRow>("SELECT id, name FROM event_sources ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(infra)?;
        Ok(rows.into_iter().map(EventSource::from).collect())
    }

    async fn insert_if_absent(&self, name: &str) -> Result<(), DomainError> {
        // The UNIQUE constraint on name makes this safe under concurrent
        // first-writers; a losing writer's insert is silently skipped.
        sqlx::query("INSERT INTO event_sources (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(infra)?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        // Logs are removed by the ON DELETE CASCADE on event_logs.
        let result = sqlx::query("DELETE FROM event_sources WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(infra)?;
        Ok(result.rows_affected() > 0)
    }
}
