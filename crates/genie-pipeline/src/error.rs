use std::time::Duration;

use thiserror::Error;

/// Failure reported by an injected collaborator (comment source, analysis
/// back-end or persistence sink).
#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("YouTube error: {0}")]
    Youtube(#[from] genie_youtube::YoutubeError),

    #[error("Natural Language error: {0}")]
    Language(#[from] genie_language::LanguageError),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("{0}")]
    Other(String),
}

/// The three per-comment analyses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Sentiment,
    Syntax,
    Trends,
}

impl Capability {
    /// Required capabilities fail the whole comment; optional ones degrade.
    #[must_use]
    pub fn is_required(self) -> bool {
        match self {
            Capability::Sentiment | Capability::Syntax => true,
            Capability::Trends => false,
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capability::Sentiment => write!(f, "sentiment"),
            Capability::Syntax => write!(f, "syntax"),
            Capability::Trends => write!(f, "trends"),
        }
    }
}

/// A single comment could not be analyzed. Absorbed by the pipeline.
#[derive(Debug, Error)]
#[error("{capability} analysis failed: {source}")]
pub struct AnalysisError {
    pub capability: Capability,
    #[source]
    pub source: CapabilityError,
}

/// Run-aborting errors. No partial report is produced for any of these.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid pipeline config: {0}")]
    InvalidConfig(String),

    #[error("client setup failed: {0}")]
    ClientSetup(#[source] CapabilityError),

    #[error("metadata fetch failed for video {video_id}: {source}")]
    MetadataFetch {
        video_id: String,
        #[source]
        source: CapabilityError,
    },

    #[error("comment page fetch failed for video {video_id} (page {page}): {source}")]
    PageFetch {
        video_id: String,
        page: u32,
        #[source]
        source: CapabilityError,
    },
}
