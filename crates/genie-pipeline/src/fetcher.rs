//! Metadata and comment-page retrieval under a per-call timeout.

use std::time::Duration;

use crate::capabilities::CommentSource;
use crate::error::{CapabilityError, PipelineError};
use crate::types::{CommentPage, VideoMetadata};

/// Per-call ceiling of the comment source.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page size for the next request given the remaining run budget.
#[must_use]
pub fn page_size_for(remaining_budget: u32) -> u32 {
    remaining_budget.clamp(1, MAX_PAGE_SIZE)
}

/// Fetches pages for one video. Any failure here aborts the run.
pub struct PageFetcher<'a> {
    source: &'a dyn CommentSource,
    video_id: &'a str,
    call_timeout: Duration,
}

impl<'a> PageFetcher<'a> {
    #[must_use]
    pub fn new(source: &'a dyn CommentSource, video_id: &'a str, call_timeout: Duration) -> Self {
        Self {
            source,
            video_id,
            call_timeout,
        }
    }

    /// # Errors
    ///
    /// Returns [`PipelineError::MetadataFetch`] on source failure or timeout.
    pub async fn fetch_metadata(&self) -> Result<VideoMetadata, PipelineError> {
        let call = self.source.fetch_video_metadata(self.video_id);
        let result = match tokio::time::timeout(self.call_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(CapabilityError::Timeout(self.call_timeout)),
        };
        result.map_err(|source| PipelineError::MetadataFetch {
            video_id: self.video_id.to_string(),
            source,
        })
    }

    /// Fetch page number `page` (1-based, for error context) starting at
    /// `cursor`, asking for at most `min(remaining_budget, 100)` items.
    ///
    /// Empty continuation tokens are normalised to `None`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::PageFetch`] on source failure or timeout.
    pub async fn fetch_page(
        &self,
        page: u32,
        cursor: Option<&str>,
        remaining_budget: u32,
    ) -> Result<CommentPage, PipelineError> {
        let page_size = page_size_for(remaining_budget);
        let call = self
            .source
            .fetch_comment_page(self.video_id, cursor, page_size);

        let result = match tokio::time::timeout(self.call_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(CapabilityError::Timeout(self.call_timeout)),
        };

        let mut fetched = result.map_err(|source| PipelineError::PageFetch {
            video_id: self.video_id.to_string(),
            page,
            source,
        })?;

        if fetched.next_cursor.as_deref().is_some_and(str::is_empty) {
            fetched.next_cursor = None;
        }

        tracing::debug!(
            video_id = self.video_id,
            page,
            page_size,
            items = fetched.items.len(),
            has_next = fetched.next_cursor.is_some(),
            "fetched comment page"
        );

        Ok(fetched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_size_is_capped_by_budget_and_ceiling() {
        assert_eq!(page_size_for(150), 100);
        assert_eq!(page_size_for(100), 100);
        assert_eq!(page_size_for(37), 37);
        assert_eq!(page_size_for(0), 1);
    }
}
