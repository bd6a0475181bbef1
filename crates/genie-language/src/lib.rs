//! Google Cloud Natural Language API client (sentiment, syntax, entities).

pub mod client;
pub mod error;
pub mod types;

pub use client::LanguageClient;
pub use error::LanguageError;
pub use types::{Entity, Sentiment, Token};
