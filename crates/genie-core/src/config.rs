use std::str::FromStr;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_YOUTUBE_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";
const DEFAULT_LANGUAGE_BASE_URL: &str = "https://language.googleapis.com/v1/";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// API keys are optional here; commands that call Google check them with
/// [`AppConfig::require_youtube_api_key`].
///
/// # Errors
///
/// Returns `ConfigError` if a value is invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let non_blank = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let youtube_api_key = non_blank("YOUTUBE_API_KEY");
    let language_api_key = non_blank("GOOGLE_LANGUAGE_API_KEY");
    let database_url = non_blank("DATABASE_URL");

    let env = parse_environment(&or_default("GENIE_ENV", "development"));
    let log_level = or_default("GENIE_LOG_LEVEL", "info");

    let max_comments: u32 = parse_positive(&lookup, "GENIE_MAX_COMMENTS", "150")?;
    let page_concurrency: usize = parse_positive(&lookup, "GENIE_PAGE_CONCURRENCY", "10")?;
    let request_timeout_secs: u64 = parse_positive(&lookup, "GENIE_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("GENIE_USER_AGENT", "comment-genie/0.1 (comment-analysis)");
    let youtube_base_url = or_default("GENIE_YOUTUBE_BASE_URL", DEFAULT_YOUTUBE_BASE_URL);
    let language_base_url = or_default("GENIE_LANGUAGE_BASE_URL", DEFAULT_LANGUAGE_BASE_URL);

    let db_max_connections: u32 = parse_value(&lookup, "GENIE_DB_MAX_CONNECTIONS", "5")?;
    let db_min_connections: u32 = parse_value(&lookup, "GENIE_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs: u64 =
        parse_value(&lookup, "GENIE_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    Ok(AppConfig {
        env,
        log_level,
        youtube_api_key,
        language_api_key,
        database_url,
        max_comments,
        page_concurrency,
        request_timeout_secs,
        user_agent,
        youtube_base_url,
        language_base_url,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
    })
}

fn parse_value<F, T>(lookup: &F, var: &str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(var).unwrap_or_else(|_| default.to_string());
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

/// Like [`parse_value`], but rejects zero.
fn parse_positive<F, T>(lookup: &F, var: &str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
    T: FromStr + Default + PartialEq,
    T::Err: std::fmt::Display,
{
    let value: T = parse_value(lookup, var, default)?;
    if value == T::default() {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(value)
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
