//! Postgres-backed [`CommentSink`].

use async_trait::async_trait;
use chrono::Utc;
use genie_pipeline::{CapabilityError, CommentSink, EnrichedComment};
use serde_json::Value;
use sqlx::PgPool;

pub(crate) struct PgCommentSink {
    pool: PgPool,
}

impl PgCommentSink {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// JSON array stored in `comment_batches.comments`.
pub(crate) fn batch_payload(comments: &[EnrichedComment]) -> Result<Value, CapabilityError> {
    serde_json::to_value(comments).map_err(|e| CapabilityError::Storage(e.to_string()))
}

#[async_trait]
impl CommentSink for PgCommentSink {
    async fn store(
        &self,
        video_id: &str,
        comments: &[EnrichedComment],
    ) -> Result<(), CapabilityError> {
        let payload = batch_payload(comments)?;
        let batch_id =
            genie_db::insert_comment_batch(&self.pool, video_id, payload, comments.len(), Utc::now())
                .await
                .map_err(|e| CapabilityError::Storage(e.to_string()))?;

        tracing::debug!(video_id, batch_id, count = comments.len(), "stored comment batch");
        Ok(())
    }
}
