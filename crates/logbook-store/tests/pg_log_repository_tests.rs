//! Integration tests for `PgLogRepository`.

use chrono::{DateTime, Duration, TimeZone, Utc};
use logbook_core::repository::{LogRepository, SourceRepository};
use logbook_store::pg_log_repository::PgLogRepository;
use logbook_store::pg_source_repository::PgSourceRepository;
use sqlx::PgPool;

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
}

async fn seed_source(pool: &PgPool, name: &str) -> i64 {
    let repo = PgSourceRepository::new(pool.clone());
    repo.insert_if_absent(name).await.unwrap();
    repo.find_by_name(name).await.unwrap().unwrap().id
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_insert_returns_the_denormalized_row(pool: PgPool) {
    let source_id = seed_source(&pool, "Auth").await;
    let repo = PgLogRepository::new(pool);

    let log = repo
        .insert(source_id, base_time(), "login ok")
        .await
        .unwrap();

    assert!(log.id >= 1);
    assert_eq!(log.event_source_id, source_id);
    assert_eq!(log.content, "login ok");
    assert_eq!(log.event_source_name, "Auth");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_timestamp_precision_round_trip(pool: PgPool) {
    let source_id = seed_source(&pool, "Auth").await;
    let repo = PgLogRepository::new(pool);
    let written = base_time() + Duration::microseconds(123_456);

    let log = repo.insert(source_id, written, "login ok").await.unwrap();
    let loaded = repo.find_by_id(log.id).await.unwrap().unwrap();

    // PostgreSQL TIMESTAMPTZ has microsecond precision.
    assert_eq!(
        loaded.timestamp.timestamp_micros(),
        written.timestamp_micros()
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_find_by_id_returns_none_for_unknown_id(pool: PgPool) {
    let repo = PgLogRepository::new(pool);

    let found = repo.find_by_id(999_999).await.unwrap();

    assert!(found.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_list_all_orders_by_timestamp_descending(pool: PgPool) {
    let source_id = seed_source(&pool, "X").await;
    let repo = PgLogRepository::new(pool);

    for (offset, content) in [(0, "t1"), (1, "t2"), (2, "t3")] {
        repo.insert(source_id, base_time() + Duration::seconds(offset), content)
            .await
            .unwrap();
    }

    let logs = repo.list_all().await.unwrap();

    let contents: Vec<&str> = logs.iter().map(|l| l.content.as_str()).collect();
    assert_eq!(contents, vec!["t3", "t2", "t1"]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_list_all_breaks_timestamp_ties_by_descending_id(pool: PgPool) {
    let source_id = seed_source(&pool, "X").await;
    let repo = PgLogRepository::new(pool);

    for content in ["first", "second", "third"] {
        repo.insert(source_id, base_time(), content).await.unwrap();
    }

    let logs = repo.list_all().await.unwrap();

    // Same timestamp everywhere, so ids decide: newest insertion first.
    let contents: Vec<&str> = logs.iter().map(|l| l.content.as_str()).collect();
    assert_eq!(contents, vec!["third", "second", "first"]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_list_by_source_filters_and_orders(pool: PgPool) {
    let x_id = seed_source(&pool, "X").await;
    let y_id = seed_source(&pool, "Y").await;
    let repo = PgLogRepository::new(pool);

    repo.insert(x_id, base_time(), "x1").await.unwrap();
    repo.insert(y_id, base_time() + Duration::seconds(1), "y1")
        .await
        .unwrap();
    repo.insert(x_id, base_time() + Duration::seconds(2), "x2")
        .await
        .unwrap();

    let logs = repo.list_by_source(x_id).await.unwrap();

    let contents: Vec<&str> = logs.iter().map(|l| l.content.as_str()).collect();
    assert_eq!(contents, vec!["x2", "x1"]);

    let empty = repo.list_by_source(999_999).await.unwrap();
    assert!(empty.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_delete_oldest_removes_by_timestamp_ascending(pool: PgPool) {
    let source_id = seed_source(&pool, "X").await;
    let repo = PgLogRepository::new(pool);

    for (offset, content) in [(0, "t1"), (1, "t2"), (2, "t3")] {
        repo.insert(source_id, base_time() + Duration::seconds(offset), content)
            .await
            .unwrap();
    }

    let deleted = repo.delete_oldest(source_id, 2).await.unwrap();

    assert_eq!(deleted, 2);
    let remaining = repo.list_all().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].content, "t3");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_delete_oldest_breaks_timestamp_ties_by_ascending_id(pool: PgPool) {
    let source_id = seed_source(&pool, "X").await;
    let repo = PgLogRepository::new(pool);

    for content in ["first", "second", "third"] {
        repo.insert(source_id, base_time(), content).await.unwrap();
    }

    let deleted = repo.delete_oldest(source_id, 2).await.unwrap();

    // Equal timestamps: the lowest ids go first.
    assert_eq!(deleted, 2);
    let remaining = repo.list_all().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].content, "third");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_delete_oldest_boundary_counts(pool: PgPool) {
    let source_id = seed_source(&pool, "X").await;
    let repo = PgLogRepository::new(pool);

    for (offset, content) in [(0, "t1"), (1, "t2")] {
        repo.insert(source_id, base_time() + Duration::seconds(offset), content)
            .await
            .unwrap();
    }

    // count = 0 deletes nothing.
    assert_eq!(repo.delete_oldest(source_id, 0).await.unwrap(), 0);
    assert_eq!(repo.list_all().await.unwrap().len(), 2);

    // count beyond the total deletes exactly the total.
    assert_eq!(repo.delete_oldest(source_id, 10).await.unwrap(), 2);
    assert!(repo.list_all().await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_delete_oldest_never_touches_other_sources(pool: PgPool) {
    let x_id = seed_source(&pool, "X").await;
    let y_id = seed_source(&pool, "Y").await;
    let repo = PgLogRepository::new(pool);

    repo.insert(x_id, base_time(), "mine").await.unwrap();
    repo.insert(y_id, base_time(), "theirs").await.unwrap();

    let deleted = repo.delete_oldest(x_id, 5).await.unwrap();

    assert_eq!(deleted, 1);
    let remaining = repo.list_all().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].event_source_name, "Y");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_source_deletion_cascades_to_logs(pool: PgPool) {
    let source_repo = PgSourceRepository::new(pool.clone());
    let x_id = seed_source(&pool, "X").await;
    let y_id = seed_source(&pool, "Y").await;
    let repo = PgLogRepository::new(pool);

    repo.insert(x_id, base_time(), "doomed").await.unwrap();
    repo.insert(y_id, base_time(), "survivor").await.unwrap();

    assert!(source_repo.delete(x_id).await.unwrap());

    // The FK cascade removed exactly the deleted source's logs.
    let remaining = repo.list_all().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].event_source_name, "Y");
}
