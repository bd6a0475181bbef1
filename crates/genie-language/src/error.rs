use thiserror::Error;

/// Errors returned by the Natural Language API client.
#[derive(Debug, Error)]
pub enum LanguageError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Natural Language API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
