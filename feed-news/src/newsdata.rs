//! NewsData.io API client

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::Value;
use tracing::{info, instrument};

use feed_core::Article;

use crate::error::NewsError;
use crate::normalize::{extract_list, non_blank, normalize_timestamp, strip_html};
use crate::provider::{build_http_client, send_for_text, NewsProvider};
use crate::types::NewsDataArticle;

/// Diagnostic name of this provider
pub const NEWSDATA_PROVIDER: &str = "newsdata";

const FALLBACK_SOURCE: &str = "NewsData.io";
const SEARCH_QUERY: &str = "technology OR AI OR jobs OR politics";

/// NewsData.io API client
pub struct NewsDataClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl NewsDataClient {
    /// Create a new NewsData.io client
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_client(build_http_client(), api_key)
    }

    /// Create a client that reuses an existing HTTP client
    pub fn with_client(client: Client, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            base_url: "https://newsdata.io/api/1".to_string(),
        }
    }
}

#[async_trait]
impl NewsProvider for NewsDataClient {
    fn name(&self) -> &'static str {
        NEWSDATA_PROVIDER
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    #[instrument(skip(self), name = "newsdata_fetch")]
    async fn fetch_articles(&self) -> Result<Vec<Article>, NewsError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(NewsError::NotConfigured(NEWSDATA_PROVIDER));
        };

        info!("Searching NewsData.io: query='{}'", SEARCH_QUERY);

        let request = self
            .client
            .get(format!("{}/news", self.base_url))
            .query(&[("apikey", api_key), ("q", SEARCH_QUERY), ("language", "en")]);

        let body = send_for_text(request).await?;
        parse_newsdata_response(&body, Utc::now())
    }
}

/// Normalize a NewsData.io `/news` response body
pub fn parse_newsdata_response(body: &str, now: DateTime<Utc>) -> Result<Vec<Article>, NewsError> {
    let payload: Value = serde_json::from_str(body)
        .map_err(|e| NewsError::ParseError(format!("NewsData response: {}", e)))?;

    let records: Vec<NewsDataArticle> = extract_list(&payload, "results", NEWSDATA_PROVIDER);

    Ok(records
        .into_iter()
        .filter_map(|record| to_article(record, now))
        .collect())
}

fn to_article(record: NewsDataArticle, now: DateTime<Utc>) -> Option<Article> {
    let title = non_blank(record.title)?;

    // Descriptions occasionally carry markup
    let description = non_blank(record.description)
        .map(|d| strip_html(&d))
        .unwrap_or_default();

    Some(Article {
        title,
        description,
        url: non_blank(record.link).unwrap_or_default(),
        image: non_blank(record.image_url),
        source: non_blank(record.source_name)
            .or_else(|| non_blank(record.source_id))
            .unwrap_or_else(|| FALLBACK_SOURCE.to_string()),
        published_at: normalize_timestamp(record.pub_date.as_deref(), now),
    })
}
