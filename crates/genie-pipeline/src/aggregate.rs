//! Run-wide counters folded from per-comment results.

use std::collections::HashMap;

use crate::types::{AnalysisResult, RunTotals};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentBucket {
    Positive,
    Neutral,
    Negative,
}

impl SentimentBucket {
    /// Positive above zero, negative below, neutral at exactly zero.
    #[must_use]
    pub fn classify(score: f64) -> Self {
        if score > 0.0 {
            SentimentBucket::Positive
        } else if score < 0.0 {
            SentimentBucket::Negative
        } else {
            SentimentBucket::Neutral
        }
    }
}

/// Accumulator owned by the coordinator for one run.
///
/// `total_processed == positive_count + neutral_count + negative_count`
/// holds after every [`fold`](Self::fold).
#[derive(Debug, Clone, Default)]
pub struct RunningAggregate {
    pub total_processed: u32,
    pub question_count: u32,
    pub positive_count: u32,
    pub neutral_count: u32,
    pub negative_count: u32,
    /// Occurrences per trend name. Category and salience are not kept.
    pub trend_frequency: HashMap<String, u32>,
}

impl RunningAggregate {
    pub fn fold(&mut self, result: &AnalysisResult) {
        self.total_processed += 1;
        if result.is_question {
            self.question_count += 1;
        }
        match SentimentBucket::classify(result.sentiment_score) {
            SentimentBucket::Positive => self.positive_count += 1,
            SentimentBucket::Neutral => self.neutral_count += 1,
            SentimentBucket::Negative => self.negative_count += 1,
        }
        for trend in &result.trends {
            *self.trend_frequency.entry(trend.name.clone()).or_insert(0) += 1;
        }
    }

    #[must_use]
    pub fn totals(&self) -> RunTotals {
        RunTotals {
            total_processed: self.total_processed,
            question_count: self.question_count,
            positive_count: self.positive_count,
            neutral_count: self.neutral_count,
            negative_count: self.negative_count,
        }
    }
}
