use thiserror::Error;

/// Errors returned by the `YouTube` Data API client.
#[derive(Debug, Error)]
pub enum YoutubeError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status and a Google error envelope.
    #[error("YouTube API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// `videos.list` returned no item for the requested id.
    #[error("video not found: {0}")]
    VideoNotFound(String),

    /// The base URL could not be parsed.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
