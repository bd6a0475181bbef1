//! Client for the `YouTube` Data API v3 endpoints used by comment-genie:
//! video metadata lookup and paginated comment threads.

pub mod client;
pub mod error;
pub mod types;
mod video_id;

pub use client::{YoutubeClient, MAX_PAGE_SIZE};
pub use error::YoutubeError;
pub use types::{CommentThread, CommentThreadListResponse, VideoResource};
pub use video_id::extract_video_id;
