//! Comment analysis pipeline.
//!
//! Fetches a bounded number of comments for a video page by page, analyzes
//! each one (sentiment, question detection, entity trends) with bounded
//! concurrency, folds the results into run-wide counters and returns a
//! [`Report`] with percentages, frequent trends and the cleaned comments.

pub mod aggregate;
pub mod analyzer;
pub mod capabilities;
pub mod error;
pub mod fetcher;
pub mod google;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod types;

pub use analyzer::{has_question_token, ItemAnalyzer};
pub use capabilities::{CommentSink, CommentSource, QuestionDetector, SentimentScorer, TrendExtractor};
pub use error::{AnalysisError, Capability, CapabilityError, PipelineError};
pub use google::{google_pipeline, run_pipeline, GoogleLanguage};
pub use normalize::normalize_comment;
pub use pipeline::Pipeline;
pub use types::{
    AnalysisResult, CommentPage, EnrichedComment, PipelineConfig, RawComment, Report,
    ReportMetadata, RunResponse, RunTotals, Trend, VideoMetadata,
};
