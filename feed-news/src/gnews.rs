//! GNews API client
//!
//! Searches the GNews v4 index for recent English-language articles.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::Value;
use tracing::{info, instrument};

use feed_core::Article;

use crate::error::NewsError;
use crate::normalize::{extract_list, non_blank, normalize_timestamp};
use crate::provider::{build_http_client, send_for_text, NewsProvider};
use crate::types::GNewsArticle;

/// Diagnostic name of this provider
pub const GNEWS_PROVIDER: &str = "gnews";

const FALLBACK_SOURCE: &str = "GNews";
const SEARCH_QUERY: &str = r#"technology OR "artificial intelligence" OR jobs OR politics"#;

/// GNews API client
pub struct GNewsClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl GNewsClient {
    /// Create a new GNews client
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_client(build_http_client(), api_key)
    }

    /// Create a client that reuses an existing HTTP client
    pub fn with_client(client: Client, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            base_url: "https://gnews.io/api/v4".to_string(),
        }
    }
}

#[async_trait]
impl NewsProvider for GNewsClient {
    fn name(&self) -> &'static str {
        GNEWS_PROVIDER
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    #[instrument(skip(self), name = "gnews_fetch")]
    async fn fetch_articles(&self) -> Result<Vec<Article>, NewsError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(NewsError::NotConfigured(GNEWS_PROVIDER));
        };

        info!("Searching GNews: query='{}'", SEARCH_QUERY);

        let request = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("q", SEARCH_QUERY),
                ("lang", "en"),
                ("max", "10"),
                ("sortby", "publishedAt"),
                ("apikey", api_key),
            ]);

        let body = send_for_text(request).await?;
        parse_gnews_response(&body, Utc::now())
    }
}

/// Normalize a GNews search response body
pub fn parse_gnews_response(body: &str, now: DateTime<Utc>) -> Result<Vec<Article>, NewsError> {
    let payload: Value = serde_json::from_str(body)
        .map_err(|e| NewsError::ParseError(format!("GNews response: {}", e)))?;

    let records: Vec<GNewsArticle> = extract_list(&payload, "articles", GNEWS_PROVIDER);

    Ok(records
        .into_iter()
        .filter_map(|record| to_article(record, now))
        .collect())
}

fn to_article(record: GNewsArticle, now: DateTime<Utc>) -> Option<Article> {
    let title = non_blank(record.title)?;

    Some(Article {
        title,
        description: non_blank(record.description).unwrap_or_default(),
        url: non_blank(record.url).unwrap_or_default(),
        image: non_blank(record.image),
        source: record
            .source
            .and_then(|s| non_blank(s.name))
            .unwrap_or_else(|| FALLBACK_SOURCE.to_string()),
        published_at: normalize_timestamp(record.published_at.as_deref(), now),
    })
}
