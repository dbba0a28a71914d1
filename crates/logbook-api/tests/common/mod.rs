//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use logbook_core::clock::Clock;
use logbook_store::pg_log_repository::PgLogRepository;
use logbook_store::pg_source_repository::PgSourceRepository;
use logbook_test_support::SteppingClock;
use sqlx::PgPool;
use tower::ServiceExt;

use logbook_api::routes;
use logbook_api::state::AppState;

/// Build the full app router with real PostgreSQL repositories and a
/// deterministic stepping clock (one second per write, starting at a
/// fixed instant). Uses the same route structure as `main.rs`.
///
/// Clone the returned router per request; the state (including the
/// clock's tick counter) is shared across clones.
pub fn build_test_app(pool: PgPool) -> Router {
    let clock: Arc<dyn Clock> = Arc::new(SteppingClock::new(test_epoch(), 1));
    let sources = Arc::new(PgSourceRepository::new(pool.clone()));
    let logs = Arc::new(PgLogRepository::new(pool));
    let app_state = AppState::new(clock, sources, logs);

    Router::new()
        .merge(routes::health::router())
        .nest("/event-sources", routes::event_sources::router())
        .nest("/event-logs", routes::event_logs::router())
        .with_state(app_state)
}

/// First timestamp the test clock hands out.
pub fn test_epoch() -> chrono::DateTime<chrono::Utc> {
    chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap()
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a DELETE request, with an optional JSON body, and return the
/// response.
pub async fn delete_json(
    app: Router,
    uri: &str,
    body: Option<&serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method("DELETE").uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
