//! Per-comment analysis: sentiment, question detection and trend extraction.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::capabilities::{QuestionDetector, SentimentScorer, TrendExtractor};
use crate::error::{AnalysisError, Capability, CapabilityError};
use crate::types::AnalysisResult;

/// `true` iff one of the syntax tokens is exactly `"?"`.
///
/// This is a token heuristic, not real question detection.
pub fn has_question_token<'a>(tokens: impl IntoIterator<Item = &'a str>) -> bool {
    tokens.into_iter().any(|t| t == "?")
}

/// Runs the three analyses for one comment concurrently.
#[derive(Clone)]
pub struct ItemAnalyzer {
    sentiment: Arc<dyn SentimentScorer>,
    questions: Arc<dyn QuestionDetector>,
    trends: Arc<dyn TrendExtractor>,
    call_timeout: Duration,
}

impl ItemAnalyzer {
    #[must_use]
    pub fn new(
        sentiment: Arc<dyn SentimentScorer>,
        questions: Arc<dyn QuestionDetector>,
        trends: Arc<dyn TrendExtractor>,
        call_timeout: Duration,
    ) -> Self {
        Self {
            sentiment,
            questions,
            trends,
            call_timeout,
        }
    }

    /// Analyze one normalized comment.
    ///
    /// Sentiment and syntax are required: the first of them to fail decides
    /// the returned error. Trend extraction is optional and falls back to an
    /// empty list.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError`] naming the failed required capability.
    pub async fn analyze(&self, comment: &str) -> Result<AnalysisResult, AnalysisError> {
        let timeout = self.call_timeout;

        let sentiment = bounded(
            Capability::Sentiment,
            timeout,
            self.sentiment.score_sentiment(comment),
        );
        let question = bounded(
            Capability::Syntax,
            timeout,
            self.questions.detect_question(comment),
        );
        let trends = optional(bounded(
            Capability::Trends,
            timeout,
            self.trends.extract_trends(comment),
        ));

        let (score, is_question, trends) = tokio::try_join!(sentiment, question, trends)?;

        Ok(AnalysisResult {
            sentiment_score: score.clamp(-1.0, 1.0),
            is_question,
            trends,
        })
    }
}

async fn bounded<T, F>(
    capability: Capability,
    timeout: Duration,
    call: F,
) -> Result<T, AnalysisError>
where
    F: Future<Output = Result<T, CapabilityError>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(source)) => Err(AnalysisError { capability, source }),
        Err(_) => Err(AnalysisError {
            capability,
            source: CapabilityError::Timeout(timeout),
        }),
    }
}

/// Optional capabilities degrade to `T::default()` instead of failing the item.
async fn optional<T, F>(call: F) -> Result<T, AnalysisError>
where
    T: Default,
    F: Future<Output = Result<T, AnalysisError>>,
{
    match call.await {
        Err(e) if !e.capability.is_required() => {
            tracing::warn!(
                capability = %e.capability,
                error = %e.source,
                "optional analysis failed; continuing without it"
            );
            Ok(T::default())
        }
        other => other,
    }
}
