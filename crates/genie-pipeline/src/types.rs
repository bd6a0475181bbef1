use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::error::PipelineError;

/// Default run-wide comment budget.
pub const DEFAULT_MAX_COMMENTS: u32 = 150;
/// Default number of comments analyzed concurrently within one page.
pub const DEFAULT_PAGE_CONCURRENCY: usize = 10;
/// Default bound on each remote call.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// A comment as delivered by the source, before normalization.
#[derive(Debug, Clone)]
pub struct RawComment {
    /// Display text, possibly containing HTML entities and markup.
    pub text: String,
}

/// Video metadata, fetched once per run before any comment page.
#[derive(Debug, Clone)]
pub struct VideoMetadata {
    pub title: String,
    pub description: String,
    pub channel_title: String,
    /// Comment count as reported by the source, not the number analyzed.
    pub reported_comment_count: u64,
}

/// One page of raw comments plus the continuation token.
#[derive(Debug, Clone, Default)]
pub struct CommentPage {
    pub items: Vec<RawComment>,
    /// `None` when the source has no further pages.
    pub next_cursor: Option<String>,
}

/// An entity mention returned by trend extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Trend {
    pub name: String,
    pub category: String,
    pub salience: f64,
}

/// Fused result of the three analyses for one comment.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    /// In `[-1.0, 1.0]`.
    pub sentiment_score: f64,
    pub is_question: bool,
    pub trends: Vec<Trend>,
}

/// A kept comment as exposed to callers. Trends are only reported in aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedComment {
    pub comment: String,
    #[serde(rename = "sentimentAnalysis", serialize_with = "nested_positive_percentage")]
    pub positive_percentage: f64,
    pub is_question: bool,
}

impl EnrichedComment {
    /// Maps the sentiment score from `[-1, 1]` onto `[0, 100]`.
    #[must_use]
    pub fn new(comment: String, result: &AnalysisResult) -> Self {
        Self {
            comment,
            positive_percentage: (result.sentiment_score + 1.0) / 2.0 * 100.0,
            is_question: result.is_question,
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)] // signature fixed by serde
fn nested_positive_percentage<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct SentimentAnalysis {
        positive_percentage: f64,
    }

    SentimentAnalysis {
        positive_percentage: *value,
    }
    .serialize(serializer)
}

/// Read-only run parameters.
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    /// Maximum number of successfully analyzed comments kept per run.
    pub max_comments: u32,
    /// Maximum analyses in flight within one page.
    pub page_concurrency: usize,
    /// Bound on every remote call (metadata, page, each analysis).
    pub call_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_comments: DEFAULT_MAX_COMMENTS,
            page_concurrency: DEFAULT_PAGE_CONCURRENCY,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }
}

impl PipelineConfig {
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidConfig`] if any bound is zero.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.max_comments == 0 {
            return Err(PipelineError::InvalidConfig(
                "max_comments must be greater than zero".to_string(),
            ));
        }
        if self.page_concurrency == 0 {
            return Err(PipelineError::InvalidConfig(
                "page_concurrency must be greater than zero".to_string(),
            ));
        }
        if self.call_timeout.is_zero() {
            return Err(PipelineError::InvalidConfig(
                "call_timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Final counters of a run, kept alongside the report for callers and logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunTotals {
    pub total_processed: u32,
    pub question_count: u32,
    pub positive_count: u32,
    pub neutral_count: u32,
    pub negative_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMetadata {
    #[serde(rename = "videoTitle")]
    pub title: String,
    /// First 500 characters of the video description.
    #[serde(rename = "videoDescription")]
    pub description: String,
    #[serde(rename = "channelTitle")]
    pub channel_title: String,
    #[serde(rename = "commentCount")]
    pub reported_comment_count: u64,
    #[serde(rename = "numQuestions")]
    pub question_count: u32,
    #[serde(rename = "positivePercentage")]
    pub positive_percentage: f64,
    #[serde(rename = "neutralPercentage")]
    pub neutral_percentage: f64,
    #[serde(rename = "negativePercentage")]
    pub negative_percentage: f64,
    /// Trend names seen at least four times, with their counts.
    pub trends: BTreeMap<String, u32>,
}

/// The pipeline output. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub comments: Vec<EnrichedComment>,
    #[serde(skip)]
    pub totals: RunTotals,
}

/// What a caller receives: the report, or `{"error": "..."}`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RunResponse {
    Report(Box<Report>),
    Failed { error: String },
}

impl RunResponse {
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, RunResponse::Failed { .. })
    }
}

impl From<Result<Report, PipelineError>> for RunResponse {
    fn from(result: Result<Report, PipelineError>) -> Self {
        match result {
            Ok(report) => RunResponse::Report(Box::new(report)),
            Err(e) => RunResponse::Failed {
                error: e.to_string(),
            },
        }
    }
}
