//! Shared configuration for the comment-genie workspace.

mod app_config;
mod config;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
