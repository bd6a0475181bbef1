//! Request and response shapes for the `documents:*` methods.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnnotateRequest<'a> {
    pub(crate) document: Document<'a>,
    pub(crate) encoding_type: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct Document<'a> {
    #[serde(rename = "type")]
    pub(crate) doc_type: &'static str,
    pub(crate) content: &'a str,
}

impl<'a> AnnotateRequest<'a> {
    pub(crate) fn plain_text(content: &'a str) -> Self {
        Self {
            document: Document {
                doc_type: "PLAIN_TEXT",
                content,
            },
            encoding_type: "UTF8",
        }
    }
}

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
// analyzeSentiment
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SentimentResponse {
    pub(crate) document_sentiment: Sentiment,
}

/// Document-level sentiment. `score` is in `[-1.0, 1.0]`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Sentiment {
    #[serde(default)]
    pub score: f64,
}

// ---------------------------------------------------------------------------
// analyzeSyntax
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct SyntaxResponse {
    #[serde(default)]
    pub(crate) tokens: Vec<Token>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Token {
    pub text: TextSpan,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextSpan {
    pub content: String,
}

impl Token {
    #[must_use]
    pub fn content(&self) -> &str {
        &self.text.content
    }
}

// ---------------------------------------------------------------------------
// analyzeEntities
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct EntitiesResponse {
    #[serde(default)]
    pub(crate) entities: Vec<Entity>,
}

/// A named entity. `entity_type` is the API's `type` (e.g. `PERSON`, `OTHER`).
#[derive(Debug, Clone, Deserialize)]
pub struct Entity {
    pub name: String,
    #[serde(rename = "type", default)]
    pub entity_type: String,
    #[serde(default)]
    pub salience: f64,
}
