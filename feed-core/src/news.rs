//! News data structures for the unified feed

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A news article normalized from any provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Article title
    pub title: String,
    /// Brief summary, empty when the provider has none
    pub description: String,
    /// Canonical article URL (may be empty)
    pub url: String,
    /// Thumbnail URL
    pub image: Option<String>,
    /// Outlet or provider name
    pub source: String,
    /// Publication date
    pub published_at: DateTime<Utc>,
}

impl Article {
    /// Key used to detect the same story across providers.
    ///
    /// The URL when present, otherwise the title.
    pub fn dedup_key(&self) -> &str {
        let url = self.url.trim();
        if url.is_empty() {
            self.title.trim()
        } else {
            url
        }
    }
}

/// Per-provider diagnostics returned next to the feed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedDebug {
    /// Provider names in merge order
    pub sources: Vec<String>,
    /// Raw (pre-dedup) article count per provider, same order as `sources`
    pub counts: Vec<usize>,
}

/// Body of the news endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedResponse {
    /// Deduplicated articles, newest first
    pub data: Vec<Article>,
    #[serde(rename = "_debug")]
    pub debug: FeedDebug,
}
