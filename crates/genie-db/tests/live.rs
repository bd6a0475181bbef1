//! Live integration tests for genie-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, migrated Postgres database from the sqlx test
//! harness. `"../../migrations"` is relative to `crates/genie-db/`.

use chrono::{Duration, Utc};
use genie_db::{insert_comment_batch, list_comment_batches};
use serde_json::json;

#[sqlx::test(migrations = "../../migrations")]
async fn insert_then_list_round_trips_the_batch(pool: sqlx::PgPool) {
    let comments = json!([
        {"comment": "is this real", "sentimentAnalysis": {"positivePercentage": 75.0}, "isQuestion": true}
    ]);

    let id = insert_comment_batch(&pool, "vid", comments.clone(), 1, Utc::now())
        .await
        .expect("insert_comment_batch failed");

    let rows = list_comment_batches(&pool, "vid", 10)
        .await
        .expect("list_comment_batches failed");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, id);
    assert_eq!(rows[0].video_id, "vid");
    assert_eq!(rows[0].comment_count, 1);
    assert_eq!(rows[0].comments, comments);
}

#[sqlx::test(migrations = "../../migrations")]
async fn list_is_newest_first_and_scoped_to_video(pool: sqlx::PgPool) {
    let now = Utc::now();
    let older = insert_comment_batch(&pool, "vid", json!([]), 0, now - Duration::hours(1))
        .await
        .unwrap();
    let newer = insert_comment_batch(&pool, "vid", json!([]), 0, now)
        .await
        .unwrap();
    insert_comment_batch(&pool, "other", json!([]), 0, now)
        .await
        .unwrap();

    let rows = list_comment_batches(&pool, "vid", 10).await.unwrap();
    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![newer, older]);

    let limited = list_comment_batches(&pool, "vid", 1).await.unwrap();
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].id, newer);
}

#[sqlx::test(migrations = "../../migrations")]
async fn non_array_comments_are_rejected(pool: sqlx::PgPool) {
    let result = insert_comment_batch(&pool, "vid", json!({"not": "an array"}), 0, Utc::now()).await;
    assert!(result.is_err(), "object payload should violate the array check");
}
