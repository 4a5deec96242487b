//! The capability every news provider exposes, plus shared HTTP plumbing

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};

use feed_core::Article;

use crate::error::NewsError;

/// A single upstream news source.
///
/// Implementations return normalized articles or a typed failure; turning a
/// failure into an empty contribution is the aggregator's job.
#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Fixed diagnostic name, reported in `_debug.sources`
    fn name(&self) -> &'static str;

    /// Whether the provider has what it needs to make a request
    fn is_configured(&self) -> bool {
        true
    }

    /// Fetch and normalize the provider's current articles
    async fn fetch_articles(&self) -> Result<Vec<Article>, NewsError>;
}

/// Build the HTTP client shared by the providers
pub fn build_http_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(10))
        .user_agent("Mozilla/5.0 (compatible; NewsFeed/1.0)")
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Send a request and return the body text of a successful response
pub(crate) async fn send_for_text(request: RequestBuilder) -> Result<String, NewsError> {
    let response = request.send().await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(NewsError::ApiError {
            status: status.as_u16(),
            message: truncate(&body, 200),
        });
    }

    Ok(response.text().await?)
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
