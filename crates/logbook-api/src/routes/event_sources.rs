//! Routes for event sources.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get, routing::post};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use logbook_core::model::EventSource;
use logbook_journal::application::{command_handlers, query_handlers};
use logbook_journal::domain::commands;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /event-sources.
#[derive(Debug, Deserialize)]
pub struct CreateEventSourceRequest {
    /// The source name to register; absent or empty is rejected.
    pub name: Option<String>,
}

/// Acknowledgement body for DELETE /event-sources/{id}.
#[derive(Debug, Serialize)]
pub struct AckResponse {
    /// Human-readable confirmation.
    pub message: String,
}

/// POST /event-sources
///
/// Idempotent: posting an existing name returns the existing source.
#[instrument(skip(state, request))]
async fn create_event_source(
    State(state): State<AppState>,
    Json(request): Json<CreateEventSourceRequest>,
) -> Result<Json<EventSource>, ApiError> {
    let command = commands::CreateEventSource {
        correlation_id: Uuid::new_v4(),
        name: request.name.unwrap_or_default(),
    };

    info!(correlation_id = %command.correlation_id, "handling create_event_source command");

    let source =
        command_handlers::handle_create_event_source(&command, state.sources.as_ref()).await?;

    Ok(Json(source))
}

/// GET /event-sources
async fn list_event_sources(
    State(state): State<AppState>,
) -> Result<Json<Vec<EventSource>>, ApiError> {
    let sources = query_handlers::list_event_sources(state.sources.as_ref()).await?;
    Ok(Json(sources))
}

/// GET /event-sources/{id}
async fn get_event_source(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<EventSource>, ApiError> {
    let source = query_handlers::get_event_source_by_id(id, state.sources.as_ref()).await?;
    Ok(Json(source))
}

/// DELETE /event-sources/{id}
///
/// Deletes the source and all of its logs.
#[instrument(skip(state))]
async fn delete_event_source(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AckResponse>, ApiError> {
    let command = commands::DeleteEventSource {
        correlation_id: Uuid::new_v4(),
        event_source_id: id,
    };

    info!(correlation_id = %command.correlation_id, "handling delete_event_source command");

    command_handlers::handle_delete_event_source(&command, state.sources.as_ref()).await?;

    Ok(Json(AckResponse {
        message: "Event source deleted".to_owned(),
    }))
}

/// Returns the router for the event source surface.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_event_source).get(list_event_sources))
        .route("/{id}", get(get_event_source).delete(delete_event_source))
}
