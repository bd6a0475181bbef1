//! Database operations for the `comment_batches` table.

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;

use crate::DbError;

/// Upper bound applied to `list_comment_batches` limits.
pub const MAX_LIST_LIMIT: i64 = 500;

/// A row from the `comment_batches` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentBatchRow {
    pub id: i64,
    pub video_id: String,
    pub comments: Value,
    pub comment_count: i32,
    pub captured_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Insert the kept comments of one run and return the generated id.
///
/// `comments` is stored as JSONB and must be a JSON array; `comment_count`
/// is its length.
///
/// # Errors
///
/// Returns [`DbError::CountOutOfRange`] if the count does not fit an
/// `INTEGER`, or [`DbError::Sqlx`] if the insert fails.
pub async fn insert_comment_batch(
    pool: &PgPool,
    video_id: &str,
    comments: Value,
    comment_count: usize,
    captured_at: DateTime<Utc>,
) -> Result<i64, DbError> {
    let count = i32::try_from(comment_count).map_err(|_| DbError::CountOutOfRange(comment_count))?;

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO comment_batches (video_id, comments, comment_count, captured_at) \
         VALUES ($1, $2, $3, $4) \
         RETURNING id",
    )
    .bind(video_id)
    .bind(comments)
    .bind(count)
    .bind(captured_at)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Most recent batches for a video, newest first.
///
/// `limit` is clamped to `1..=MAX_LIST_LIMIT`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_comment_batches(
    pool: &PgPool,
    video_id: &str,
    limit: i64,
) -> Result<Vec<CommentBatchRow>, DbError> {
    let rows = sqlx::query_as::<_, CommentBatchRow>(
        "SELECT id, video_id, comments, comment_count, captured_at, created_at \
         FROM comment_batches \
         WHERE video_id = $1 \
         ORDER BY captured_at DESC, id DESC \
         LIMIT $2",
    )
    .bind(video_id)
    .bind(limit.clamp(1, MAX_LIST_LIMIT))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
