//! Routes for event logs.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::delete, routing::get, routing::post};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use logbook_core::error::DomainError;
use logbook_core::model::EventLog;
use logbook_journal::application::{command_handlers, query_handlers};
use logbook_journal::domain::commands;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /event-logs.
///
/// Unknown fields (including any client-supplied `timestamp`) are
/// ignored; the server stamps its own clock.
#[derive(Debug, Deserialize)]
pub struct AppendEventLogRequest {
    /// Name of the source the log belongs to; created on first use.
    pub event_source_name: Option<String>,
    /// Log message body.
    pub content: Option<String>,
}

/// Request body for DELETE /event-logs/prune.
#[derive(Debug, Deserialize)]
pub struct PruneEventLogsRequest {
    /// Name of the source to prune. Must already exist.
    pub event_source_name: Option<String>,
    /// How many of the oldest logs to delete.
    pub count: Option<i64>,
}

/// Response body for DELETE /event-logs/prune.
#[derive(Debug, Serialize)]
pub struct PruneResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// Number of logs actually deleted.
    #[serde(rename = "deletedCount")]
    pub deleted_count: u64,
}

/// POST /event-logs
///
/// Creates the source implicitly on first use.
#[instrument(skip(state, request))]
async fn append_event_log(
    State(state): State<AppState>,
    Json(request): Json<AppendEventLogRequest>,
) -> Result<Json<EventLog>, ApiError> {
    let command = commands::AppendEventLog {
        correlation_id: Uuid::new_v4(),
        event_source_name: request.event_source_name.unwrap_or_default(),
        content: request.content.unwrap_or_default(),
    };

    info!(correlation_id = %command.correlation_id, "handling append_event_log command");

    let log = command_handlers::handle_append_event_log(
        &command,
        state.clock.as_ref(),
        state.sources.as_ref(),
        state.logs.as_ref(),
    )
    .await?;

    Ok(Json(log))
}

/// GET /event-logs
async fn list_event_logs(State(state): State<AppState>) -> Result<Json<Vec<EventLog>>, ApiError> {
    let logs = query_handlers::list_event_logs(state.logs.as_ref()).await?;
    Ok(Json(logs))
}

/// GET /event-logs/{id}
async fn get_event_log(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<EventLog>, ApiError> {
    let log = query_handlers::get_event_log_by_id(id, state.logs.as_ref()).await?;
    Ok(Json(log))
}

/// GET /event-logs/source/{event_source_id}
async fn list_event_logs_by_source(
    State(state): State<AppState>,
    Path(event_source_id): Path<i64>,
) -> Result<Json<Vec<EventLog>>, ApiError> {
    let logs =
        query_handlers::list_event_logs_by_source(event_source_id, state.logs.as_ref()).await?;
    Ok(Json(logs))
}

/// DELETE /event-logs/prune
///
/// Deletes the oldest `count` logs of an existing source.
#[instrument(skip(state, request))]
async fn prune_event_logs(
    State(state): State<AppState>,
    Json(request): Json<PruneEventLogsRequest>,
) -> Result<Json<PruneResponse>, ApiError> {
    let Some(count) = request.count else {
        return Err(DomainError::Validation("Missing count".to_owned()).into());
    };

    let command = commands::PruneEventLogs {
        correlation_id: Uuid::new_v4(),
        event_source_name: request.event_source_name.unwrap_or_default(),
        count,
    };

    info!(correlation_id = %command.correlation_id, "handling prune_event_logs command");

    let report = command_handlers::handle_prune_event_logs(
        &command,
        state.sources.as_ref(),
        state.logs.as_ref(),
    )
    .await?;

    Ok(Json(PruneResponse {
        message: format!("Pruned {} event log(s)", report.deleted),
        deleted_count: report.deleted,
    }))
}

/// Returns the router for the event log surface.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(append_event_log).get(list_event_logs))
        .route("/prune", delete(prune_event_logs))
        .route("/{id}", get(get_event_log))
        .route("/source/{event_source_id}", get(list_event_logs_by_source))
}
