use crate::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Only `genie analyze` needs the keys; see
    /// [`AppConfig::require_youtube_api_key`].
    pub youtube_api_key: Option<String>,
    pub language_api_key: Option<String>,
    /// Postgres URL for the comment sink. `None` disables persistence.
    pub database_url: Option<String>,
    pub max_comments: u32,
    pub page_concurrency: usize,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub youtube_base_url: String,
    pub language_base_url: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl AppConfig {
    /// The `YouTube` Data API key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `YOUTUBE_API_KEY` was not set.
    pub fn require_youtube_api_key(&self) -> Result<&str, ConfigError> {
        self.youtube_api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("YOUTUBE_API_KEY".to_string()))
    }

    /// The Natural Language API key, falling back to the `YouTube` key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if neither key was set.
    pub fn require_language_api_key(&self) -> Result<&str, ConfigError> {
        match self.language_api_key.as_deref() {
            Some(key) => Ok(key),
            None => self.require_youtube_api_key(),
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field(
                "youtube_api_key",
                &self.youtube_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "language_api_key",
                &self.language_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("max_comments", &self.max_comments)
            .field("page_concurrency", &self.page_concurrency)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("youtube_base_url", &self.youtube_base_url)
            .field("language_base_url", &self.language_base_url)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .finish()
    }
}
