//! `YouTube` Data API response types.
//!
//! Only the fields comment-genie reads are modelled; everything else in the
//! payload is ignored by serde.

use serde::{Deserialize, Deserializer};

/// Google API error envelope: `{"error": {"code": 403, "message": "..."}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub(crate) error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub(crate) message: String,
}

// ---------------------------------------------------------------------------
// videos.list
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct VideoListResponse {
    #[serde(default)]
    pub(crate) items: Vec<VideoResource>,
}

/// One video from `videos.list?part=snippet,statistics`.
#[derive(Debug, Deserialize)]
pub struct VideoResource {
    pub id: String,
    pub snippet: VideoSnippet,
    #[serde(default)]
    pub statistics: VideoStatistics,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub channel_title: String,
}

/// Counters are decimal strings on the wire. `comment_count` is absent when
/// comments are disabled, which reads as zero here.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    #[serde(default, deserialize_with = "string_count")]
    pub comment_count: u64,
}

fn string_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Text(String),
        Number(u64),
    }

    match Option::<Count>::deserialize(deserializer)? {
        None => Ok(0),
        Some(Count::Number(n)) => Ok(n),
        Some(Count::Text(s)) => s.parse().map_err(serde::de::Error::custom),
    }
}

// ---------------------------------------------------------------------------
// commentThreads.list
// ---------------------------------------------------------------------------

/// One page of `commentThreads.list?part=snippet`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadListResponse {
    #[serde(default)]
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub items: Vec<CommentThread>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThread {
    pub id: String,
    pub snippet: CommentThreadSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadSnippet {
    pub top_level_comment: TopLevelComment,
}

#[derive(Debug, Deserialize)]
pub struct TopLevelComment {
    pub snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSnippet {
    /// HTML-rendered comment text (entities escaped, links as anchors).
    #[serde(default)]
    pub text_display: String,
}

impl CommentThread {
    /// The display text of the thread's top-level comment.
    #[must_use]
    pub fn text_display(&self) -> &str {
        &self.snippet.top_level_comment.snippet.text_display
    }
}
