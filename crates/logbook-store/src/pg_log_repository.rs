//! `PostgreSQL` implementation of the `LogRepository` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use logbook_core::error::DomainError;
use logbook_core::model::EventLog;
use logbook_core::repository::LogRepository;

use crate::infra;

/// Joined projection shared by every log read.
const SELECT_LOG: &str = "SELECT el.id, el.event_source_id, el.timestamp, el.content, \
     es.name AS event_source_name \
     FROM event_logs el \
     JOIN event_sources es ON es.id = el.event_source_id";

/// PostgreSQL-backed event log repository.
#[derive(Debug, Clone)]
pub struct PgLogRepository {
    pool: PgPool,
}

impl PgLogRepository {
    /// Creates a new `PgLogRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_joined(&self, id: i64) -> Result<Option<EventLog>, DomainError> {
        let row = sqlx::query_as::<_, LogRow>(&format!("{SELECT_LOG} WHERE el.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(infra)?;
        Ok(row.map(EventLog::from))
    }
}

#[derive(sqlx::FromRow)]
struct LogRow {
    id: i64,
    event_source_id: i64,
    timestamp: DateTime<Utc>,
    content: String,
    event_source_name: String,
}

impl From<LogRow> for EventLog {
    fn from(row: LogRow) -> Self {
        Self {
            id: row.id,
            event_source_id: row.event_source_id,
            timestamp: row.timestamp,
            content: row.content,
            event_source_name: row.event_source_name,
        }
    }
}

#[async_trait]
impl LogRepository for PgLogRepository {
    async fn insert(
        &self,
        event_source_id: i64,
        timestamp: DateTime<Utc>,
        content: &str,
    ) -> Result<EventLog, DomainError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO event_logs (event_source_id, timestamp, content) \
             VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(event_source_id)
        .bind(timestamp)
        .bind(content)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::RowNotFound => {
                DomainError::WriteFailure("event log insert returned no id".to_owned())
            }
            other => infra(other),
        })?;

        self.fetch_joined(id).await?.ok_or_else(|| {
            DomainError::WriteFailure(format!("event log {id} not readable after insert"))
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<EventLog>, DomainError> {
        self.fetch_joined(id).await
    }

    async fn list_all(&self) -> Result<Vec<EventLog>, DomainError> {
        let rows = sqlx::query_as::<_, LogRow>(&format!(
            "{SELECT_LOG} ORDER BY el.timestamp DESC, el.id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(infra)?;
        Ok(rows.into_iter().map(EventLog::from).collect())
    }

    async fn list_by_source(&self, event_source_id: i64) -> Result<Vec<EventLog>, DomainError> {
        let rows = sqlx::query_as::<_, LogRow>(&format!(
            "{SELECT_LOG} WHERE el.event_source_id = $1 ORDER BY el.timestamp DESC, el.id DESC"
        ))
        .bind(event_source_id)
        .fetch_all(&self.pool)
        .await
        .map_err(infra)?;
        Ok(rows.into_iter().map(EventLog::from).collect())
    }

    async fn delete_oldest(&self, event_source_id: i64, count: i64) -> Result<u64, DomainError> {
        let result = sqlx::query(
            "DELETE FROM event_logs WHERE id IN ( \
                 SELECT id FROM event_logs \
                 WHERE event_source_id = $1 \
                 ORDER BY timestamp ASC, id ASC \
                 LIMIT $2)",
        )
        .bind(event_source_id)
        .bind(count)
        .execute(&self.pool)
        .await
        .map_err(infra)?;
        Ok(result.rows_affected())
    }
}
