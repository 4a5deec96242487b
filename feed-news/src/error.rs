//! Error types for the news providers

use thiserror::Error;

/// Errors that can occur while fetching from a news provider
#[derive(Debug, Error)]
pub enum NewsError {
    /// Provider has no credential configured
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    /// HTTP request failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// API returned an error response
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },

    /// Failed to parse API response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Provider did not answer in time
    #[error("{provider} timed out after {millis}ms")]
    Timeout {
        /// Provider name
        provider: &'static str,
        /// Elapsed budget in milliseconds
        millis: u128,
    },
}

impl NewsError {
    /// Whether this error only means the provider is switched off
    pub fn is_not_configured(&self) -> bool {
        matches!(self, NewsError::NotConfigured(_))
    }
}

impl From<reqwest::Error> for NewsError {
    fn from(e: reqwest::Error) -> Self {
        NewsError::RequestFailed(e.to_string())
    }
}
