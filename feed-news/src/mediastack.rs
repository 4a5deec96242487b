//! MediaStack API client
//!
//! MediaStack answers some failures (bad key, plan limits) with HTTP 200 and
//! an `error` object instead of `data`, so the body is checked for both.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::Value;
use tracing::{info, instrument};

use feed_core::Article;

use crate::error::NewsError;
use crate::normalize::{extract_list, non_blank, normalize_timestamp};
use crate::provider::{build_http_client, send_for_text, NewsProvider};
use crate::types::{MediaStackArticle, MediaStackError};

/// Diagnostic name of this provider
pub const MEDIASTACK_PROVIDER: &str = "mediastack";

const FALLBACK_SOURCE: &str = "MediaStack";
const SEARCH_KEYWORDS: &str = "technology ai jobs politics";
const CATEGORIES: &str = "technology,business,general";

/// MediaStack API client
pub struct MediaStackClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl MediaStackClient {
    /// Create a new MediaStack client
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_client(build_http_client(), api_key)
    }

    /// Create a client that reuses an existing HTTP client
    pub fn with_client(client: Client, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            // Free plan only serves plain HTTP
            base_url: "http://api.mediastack.com/v1".to_string(),
        }
    }
}

#[async_trait]
impl NewsProvider for MediaStackClient {
    fn name(&self) -> &'static str {
        MEDIASTACK_PROVIDER
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    #[instrument(skip(self), name = "mediastack_fetch")]
    async fn fetch_articles(&self) -> Result<Vec<Article>, NewsError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(NewsError::NotConfigured(MEDIASTACK_PROVIDER));
        };

        info!(
            "Searching MediaStack: keywords='{}', categories='{}'",
            SEARCH_KEYWORDS, CATEGORIES
        );

        let request = self
            .client
            .get(format!("{}/news", self.base_url))
            .query(&[
                ("access_key", api_key),
                ("keywords", SEARCH_KEYWORDS),
                ("categories", CATEGORIES),
                ("languages", "en"),
                ("sort", "published_desc"),
                ("limit", "25"),
            ]);

        let body = send_for_text(request).await?;
        parse_mediastack_response(&body, Utc::now())
    }
}

/// Normalize a MediaStack `/news` response body
pub fn parse_mediastack_response(
    body: &str,
    now: DateTime<Utc>,
) -> Result<Vec<Article>, NewsError> {
    let payload: Value = serde_json::from_str(body)
        .map_err(|e| NewsError::ParseError(format!("MediaStack response: {}", e)))?;

    if let Some(error) = payload.get("error") {
        let error = MediaStackError::deserialize_lossy(error);
        return Err(NewsError::ApiError {
            status: 200,
            message: format!(
                "{}: {}",
                error.code.unwrap_or_else(|| "unknown".to_string()),
                error.message.unwrap_or_default()
            ),
        });
    }

    let records: Vec<MediaStackArticle> = extract_list(&payload, "data", MEDIASTACK_PROVIDER);

    Ok(records
        .into_iter()
        .filter_map(|record| to_article(record, now))
        .collect())
}

impl MediaStackError {
    fn deserialize_lossy(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or(MediaStackError {
            code: None,
            message: Some(value.to_string()),
        })
    }
}

fn to_article(record: MediaStackArticle, now: DateTime<Utc>) -> Option<Article> {
    let title = non_blank(record.title)?;

    Some(Article {
        title,
        description: non_blank(record.description).unwrap_or_default(),
        url: non_blank(record.url).unwrap_or_default(),
        image: non_blank(record.image),
        source: non_blank(record.source).unwrap_or_else(|| FALLBACK_SOURCE.to_string()),
        published_at: normalize_timestamp(record.published_at.as_deref(), now),
    })
}
