//! Final report assembly: percentages, trend filtering, description cut.

use std::collections::{BTreeMap, HashMap};

use crate::aggregate::RunningAggregate;
use crate::types::{EnrichedComment, Report, ReportMetadata, VideoMetadata};

/// Trends mentioned fewer times than this are dropped as noise.
pub const MIN_TREND_FREQUENCY: u32 = 4;

/// Description length kept in the report, in `char`s.
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// `count / total * 100`, or exactly `0.0` when `total` is zero.
#[must_use]
pub fn percentage(count: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    f64::from(count) / f64::from(total) * 100.0
}

/// Keep trend entries seen at least `min_count` times.
#[must_use]
pub fn filter_trends(frequency: &HashMap<String, u32>, min_count: u32) -> BTreeMap<String, u32> {
    frequency
        .iter()
        .filter(|(_, count)| **count >= min_count)
        .map(|(name, count)| (name.clone(), *count))
        .collect()
}

/// First `max_chars` characters of `text` (not bytes, not graphemes).
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

#[must_use]
pub fn build_report(
    metadata: VideoMetadata,
    aggregate: &RunningAggregate,
    comments: Vec<EnrichedComment>,
) -> Report {
    let total = aggregate.total_processed;

    Report {
        metadata: ReportMetadata {
            title: metadata.title,
            description: truncate_chars(&metadata.description, DESCRIPTION_MAX_CHARS),
            channel_title: metadata.channel_title,
            reported_comment_count: metadata.reported_comment_count,
            question_count: aggregate.question_count,
            positive_percentage: percentage(aggregate.positive_count, total),
            neutral_percentage: percentage(aggregate.neutral_count, total),
            negative_percentage: percentage(aggregate.negative_count, total),
            trends: filter_trends(&aggregate.trend_frequency, MIN_TREND_FREQUENCY),
        },
        comments,
        totals: aggregate.totals(),
    }
}
