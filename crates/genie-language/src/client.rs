//! HTTP client for the Natural Language API `documents:*` methods.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::LanguageError;
use crate::types::{
    AnnotateRequest, EntitiesResponse, Entity, ErrorEnvelope, Sentiment, SentimentResponse,
    SyntaxResponse, Token,
};

const DEFAULT_BASE_URL: &str = "https://language.googleapis.com/v1/";

/// Natural Language API client.
///
/// One client serves all three analyses; it is cheap to share behind an `Arc`.
pub struct LanguageClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl LanguageClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`LanguageError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, LanguageError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`LanguageError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`LanguageError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, LanguageError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| LanguageError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Scores the overall sentiment of `text`.
    ///
    /// # Errors
    ///
    /// Returns [`LanguageError`] on transport, API or decoding failure.
    pub async fn analyze_sentiment(&self, text: &str) -> Result<Sentiment, LanguageError> {
        let response: SentimentResponse = self.annotate("analyzeSentiment", text).await?;
        Ok(response.document_sentiment)
    }

    /// Tokenizes `text` with part-of-speech information.
    ///
    /// # Errors
    ///
    /// Returns [`LanguageError`] on transport, API or decoding failure.
    pub async fn analyze_syntax(&self, text: &str) -> Result<Vec<Token>, LanguageError> {
        let response: SyntaxResponse = self.annotate("analyzeSyntax", text).await?;
        Ok(response.tokens)
    }

    /// Extracts named entities with their salience.
    ///
    /// # Errors
    ///
    /// Returns [`LanguageError`] on transport, API or decoding failure.
    pub async fn analyze_entities(&self, text: &str) -> Result<Vec<Entity>, LanguageError> {
        let response: EntitiesResponse = self.annotate("analyzeEntities", text).await?;
        Ok(response.entities)
    }

    /// `documents:{method}?key=..`. The `./` prefix stops `Url::join` from
    /// reading `documents:` as a URL scheme.
    fn method_url(&self, method: &str) -> Result<Url, LanguageError> {
        let mut url = self
            .base_url
            .join(&format!("./documents:{method}"))
            .map_err(|e| LanguageError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    async fn annotate<T: DeserializeOwned>(
        &self,
        method: &str,
        text: &str,
    ) -> Result<T, LanguageError> {
        let url = self.method_url(method)?;
        let response = self
            .client
            .post(url)
            .json(&AnnotateRequest::plain_text(text))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .ok()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| status.to_string());
            tracing::debug!(method, status = status.as_u16(), "Natural Language call failed");
            return Err(LanguageError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| LanguageError::Deserialize {
            context: format!("documents:{method}"),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_url_keeps_colon_path() {
        let client =
            LanguageClient::with_base_url("k", 30, "ua", "https://language.googleapis.com/v1")
                .unwrap();
        let url = client.method_url("analyzeSentiment").unwrap();
        assert_eq!(
            url.as_str(),
            "https://language.googleapis.com/v1/documents:analyzeSentiment?key=k"
        );
    }
}
