//! HTTP client for the `YouTube` Data API v3.
//!
//! Wraps `reqwest` with API key handling, Google error-envelope decoding and
//! typed response deserialization. Use [`YoutubeClient::with_base_url`] to
//! point at a mock server in tests.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::YoutubeError;
use crate::types::{CommentThreadListResponse, ErrorEnvelope, VideoListResponse, VideoResource};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

/// Largest `maxResults` accepted by `commentThreads.list`.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Client for the `YouTube` Data API.
pub struct YoutubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl YoutubeClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, YoutubeError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`YoutubeError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, YoutubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so `Url::join` appends the endpoint
        // instead of replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| YoutubeError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Fetches title, description, channel and statistics for one video.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::VideoNotFound`] if the API returns no item.
    /// - [`YoutubeError::Api`] on a non-2xx status.
    /// - [`YoutubeError::Http`] on network failure or timeout.
    /// - [`YoutubeError::Deserialize`] if the body does not match.
    pub async fn get_video(&self, video_id: &str) -> Result<VideoResource, YoutubeError> {
        let url = self.build_url(
            "videos",
            &[("part", "snippet,statistics"), ("id", video_id)],
        )?;
        let response: VideoListResponse = self
            .request_json(&url, &format!("videos(id={video_id})"))
            .await?;

        response
            .items
            .into_iter()
            .next()
            .ok_or_else(|| YoutubeError::VideoNotFound(video_id.to_string()))
    }

    /// Fetches one page of top-level comment threads.
    ///
    /// `max_results` is clamped to `1..=MAX_PAGE_SIZE`. Pass the previous
    /// page's `next_page_token` as `page_token` to continue.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::Api`] on a non-2xx status (e.g. comments disabled).
    /// - [`YoutubeError::Http`] on network failure or timeout.
    /// - [`YoutubeError::Deserialize`] if the body does not match.
    pub async fn get_comment_threads(
        &self,
        video_id: &str,
        page_token: Option<&str>,
        max_results: u32,
    ) -> Result<CommentThreadListResponse, YoutubeError> {
        let max_results = max_results.clamp(1, MAX_PAGE_SIZE).to_string();
        let mut params = vec![
            ("part", "snippet"),
            ("videoId", video_id),
            ("maxResults", max_results.as_str()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        let url = self.build_url("commentThreads", &params)?;
        let page: CommentThreadListResponse = self
            .request_json(&url, &format!("commentThreads(videoId={video_id})"))
            .await?;

        tracing::debug!(
            video_id,
            items = page.items.len(),
            has_next = page.next_page_token.is_some(),
            "fetched comment thread page"
        );

        Ok(page)
    }

    /// Builds `{base}{endpoint}?key=..&<extra>` with percent-encoded values.
    fn build_url(&self, endpoint: &str, extra: &[(&str, &str)]) -> Result<Url, YoutubeError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| YoutubeError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET request and decodes the JSON body.
    ///
    /// Non-2xx responses are decoded as a Google error envelope when
    /// possible so the caller sees the API's own message.
    async fn request_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, YoutubeError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .ok()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| status.to_string());
            return Err(YoutubeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| YoutubeError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}
