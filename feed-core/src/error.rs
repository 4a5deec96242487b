//! Error types for the feed

use thiserror::Error;

/// Feed-wide error type
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FeedError {
    pub fn config(msg: impl Into<String>) -> Self {
        FeedError::Config(msg.into())
    }
}

/// Result type alias for feed operations
pub type FeedResult<T> = Result<T, FeedError>;
