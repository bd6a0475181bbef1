//! Pipeline orchestration.

use std::collections::HashSet;
use std::sync::Arc;

use futures::stream::{self, StreamExt};

use crate::aggregate::RunningAggregate;
use crate::analyzer::ItemAnalyzer;
use crate::capabilities::{CommentSink, CommentSource};
use crate::error::PipelineError;
use crate::fetcher::PageFetcher;
use crate::normalize::normalize_comment;
use crate::report::build_report;
use crate::types::{EnrichedComment, PipelineConfig, RawComment, Report};

/// Per-page bookkeeping, logged after each page.
#[derive(Debug, Default)]
struct PageStats {
    fetched: usize,
    discarded: usize,
    failed: usize,
    kept: usize,
    over_budget: usize,
}

/// Comment analysis pipeline with injected collaborators.
///
/// Holds no per-run state, so one instance can serve concurrent runs.
pub struct Pipeline {
    source: Arc<dyn CommentSource>,
    analyzer: ItemAnalyzer,
    sink: Option<Arc<dyn CommentSink>>,
    config: PipelineConfig,
}

impl Pipeline {
    #[must_use]
    pub fn new(source: Arc<dyn CommentSource>, analyzer: ItemAnalyzer, config: PipelineConfig) -> Self {
        Self {
            source,
            analyzer,
            sink: None,
            config,
        }
    }

    /// Persist kept comments after each successful run (best-effort).
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn CommentSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Run the pipeline for one video.
    ///
    /// 1. Fetch video metadata.
    /// 2. Fetch comment pages until `max_comments` comments were analyzed or
    ///    the source runs out of pages.
    /// 3. Per page: normalize, drop link-bearing/empty comments, analyze the
    ///    rest with at most `page_concurrency` in flight, fold successes.
    /// 4. Build the report and hand the kept comments to the sink.
    ///
    /// A page that crosses the budget is still analyzed in full; only the
    /// first `max_comments` successes of the run are kept and counted.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] if the config is invalid or the metadata or
    /// any page fetch fails. Per-comment failures are logged and skipped.
    pub async fn run(&self, video_id: &str) -> Result<Report, PipelineError> {
        self.config.validate()?;
        let max_comments = self.config.max_comments;
        let fetcher = PageFetcher::new(self.source.as_ref(), video_id, self.config.call_timeout);

        let metadata = fetcher.fetch_metadata().await?;
        tracing::debug!(
            video_id,
            title = %metadata.title,
            reported_comments = metadata.reported_comment_count,
            "fetched video metadata"
        );

        let mut aggregate = RunningAggregate::default();
        let mut kept: Vec<EnrichedComment> = Vec::new();
        let mut cursor: Option<String> = None;
        let mut sent_cursors: HashSet<String> = HashSet::new();
        let mut page: u32 = 0;

        loop {
            page += 1;
            let remaining = max_comments.saturating_sub(aggregate.total_processed);
            let fetched = fetcher.fetch_page(page, cursor.as_deref(), remaining).await?;
            let next_cursor = fetched.next_cursor;

            let stats = self
                .analyze_page(video_id, fetched.items, &mut aggregate, &mut kept)
                .await;
            tracing::debug!(
                video_id,
                page,
                fetched = stats.fetched,
                discarded = stats.discarded,
                failed = stats.failed,
                kept = stats.kept,
                over_budget = stats.over_budget,
                total_processed = aggregate.total_processed,
                "analyzed comment page"
            );

            if aggregate.total_processed >= max_comments {
                tracing::debug!(video_id, max_comments, "comment budget reached");
                break;
            }
            match next_cursor {
                None => break,
                Some(next) if sent_cursors.contains(&next) => {
                    tracing::warn!(
                        video_id,
                        page,
                        "source returned an already used continuation token; stopping pagination"
                    );
                    break;
                }
                Some(next) => {
                    sent_cursors.insert(next.clone());
                    cursor = Some(next);
                }
            }
        }

        let report = build_report(metadata, &aggregate, kept);
        self.persist(video_id, &report.comments).await;

        tracing::info!(
            video_id,
            pages = page,
            processed = report.totals.total_processed,
            questions = report.totals.question_count,
            trends = report.metadata.trends.len(),
            "comment pipeline finished"
        );

        Ok(report)
    }

    /// Analyze one page and fold the successes.
    ///
    /// Results come back in page order through a bounded stream and are
    /// folded here, one at a time, so the aggregate has a single writer.
    async fn analyze_page(
        &self,
        video_id: &str,
        items: Vec<RawComment>,
        aggregate: &mut RunningAggregate,
        kept: &mut Vec<EnrichedComment>,
    ) -> PageStats {
        let mut stats = PageStats {
            fetched: items.len(),
            ..PageStats::default()
        };

        let texts: Vec<String> = items
            .iter()
            .filter_map(|item| normalize_comment(&item.text))
            .collect();
        stats.discarded = stats.fetched - texts.len();

        let analyzer = &self.analyzer;
        let mut results = std::pin::pin!(stream::iter(texts)
            .map(|text| async move {
                let outcome = analyzer.analyze(&text).await;
                (text, outcome)
            })
            .buffered(self.config.page_concurrency));

        while let Some((text, outcome)) = results.next().await {
            match outcome {
                Ok(result) => {
                    if aggregate.total_processed < self.config.max_comments {
                        aggregate.fold(&result);
                        kept.push(EnrichedComment::new(text, &result));
                        stats.kept += 1;
                    } else {
                        stats.over_budget += 1;
                    }
                }
                Err(e) => {
                    stats.failed += 1;
                    tracing::warn!(
                        video_id,
                        capability = %e.capability,
                        error = %e.source,
                        "comment analysis failed; skipping comment"
                    );
                }
            }
        }

        stats
    }

    async fn persist(&self, video_id: &str, comments: &[EnrichedComment]) {
        let Some(sink) = &self.sink else {
            return;
        };

        let timeout = self.config.call_timeout;
        match tokio::time::timeout(timeout, sink.store(video_id, comments)).await {
            Ok(Ok(())) => {
                tracing::debug!(video_id, count = comments.len(), "persisted comments");
            }
            Ok(Err(e)) => {
                tracing::warn!(video_id, error = %e, "failed to persist comments");
            }
            Err(_) => {
                tracing::warn!(video_id, ?timeout, "persisting comments timed out");
            }
        }
    }
}
