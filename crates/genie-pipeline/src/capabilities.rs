//! Collaborator seams the pipeline is built from.
//!
//! Every remote dependency is injected as a trait object so a run can be
//! driven by the Google-backed clients in production and by in-memory stubs
//! in tests.

use async_trait::async_trait;

use crate::error::CapabilityError;
use crate::types::{CommentPage, EnrichedComment, Trend, VideoMetadata};

/// Remote source of video metadata and paginated comments.
#[async_trait]
pub trait CommentSource: Send + Sync {
    async fn fetch_video_metadata(&self, video_id: &str) -> Result<VideoMetadata, CapabilityError>;

    /// Fetch up to `page_size` comments. `cursor` is `None` for the first page.
    async fn fetch_comment_page(
        &self,
        video_id: &str,
        cursor: Option<&str>,
        page_size: u32,
    ) -> Result<CommentPage, CapabilityError>;
}

/// Document sentiment score in `[-1.0, 1.0]`.
#[async_trait]
pub trait SentimentScorer: Send + Sync {
    async fn score_sentiment(&self, text: &str) -> Result<f64, CapabilityError>;
}

/// Whether the token-level syntax of `text` contains a literal `?` token.
#[async_trait]
pub trait QuestionDetector: Send + Sync {
    async fn detect_question(&self, text: &str) -> Result<bool, CapabilityError>;
}

/// Entity mentions used for trend aggregation.
#[async_trait]
pub trait TrendExtractor: Send + Sync {
    async fn extract_trends(&self, text: &str) -> Result<Vec<Trend>, CapabilityError>;
}

/// Best-effort persistence of the kept comments of a run.
#[async_trait]
pub trait CommentSink: Send + Sync {
    async fn store(&self, video_id: &str, comments: &[EnrichedComment])
        -> Result<(), CapabilityError>;
}
