//! Logbook Store — PostgreSQL repositories.
//!
//! Implements the `logbook-core` repository traits on top of a shared
//! `sqlx::PgPool`. The schema lives in the workspace `migrations/`
//! directory and is applied with `sqlx::migrate!`.

pub mod pg_log_repository;
pub mod pg_source_repository;

use logbook_core::error::DomainError;

pub(crate) fn infra(err: sqlx::Error) -> DomainError {
    DomainError::Infrastructure(err.to_string())
}
