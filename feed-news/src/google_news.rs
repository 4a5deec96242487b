//! Google News RSS client
//!
//! Free fallback source: needs no credential, so it is the one provider that
//! is always attempted. Google News uses standard RSS 2.0.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use tracing::{info, instrument};

use feed_core::Article;

use crate::error::NewsError;
use crate::normalize::{extract_image_from_html, non_blank, normalize_timestamp, strip_html};
use crate::provider::{build_http_client, send_for_text, NewsProvider};

/// Diagnostic name of this provider
pub const GOOGLE_NEWS_PROVIDER: &str = "google_rss";

const FALLBACK_SOURCE: &str = "Google News";
const SEARCH_QUERY: &str = "technology OR AI OR jobs OR politics when:1d";

/// Google News RSS client
pub struct GoogleNewsClient {
    client: Client,
    base_url: String,
}

impl GoogleNewsClient {
    /// Create a new Google News client
    pub fn new() -> Self {
        Self::with_client(build_http_client())
    }

    /// Create a client that reuses an existing HTTP client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            base_url: "https://news.google.com/rss/search".to_string(),
        }
    }

    fn search_url(&self) -> String {
        format!(
            "{}?q={}&hl=en-US&gl=US&ceid=US:en",
            self.base_url,
            urlencoding::encode(SEARCH_QUERY)
        )
    }
}

impl Default for GoogleNewsClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NewsProvider for GoogleNewsClient {
    fn name(&self) -> &'static str {
        GOOGLE_NEWS_PROVIDER
    }

    #[instrument(skip(self), name = "google_news_fetch")]
    async fn fetch_articles(&self) -> Result<Vec<Article>, NewsError> {
        let url = self.search_url();
        info!("Fetching Google News RSS: {}", url);

        let body = send_for_text(self.client.get(&url)).await?;
        parse_google_news_feed(body.as_bytes(), Utc::now())
    }
}

/// Normalize a Google News RSS document
pub fn parse_google_news_feed(xml: &[u8], now: DateTime<Utc>) -> Result<Vec<Article>, NewsError> {
    let channel = rss::Channel::read_from(xml).map_err(|e| {
        NewsError::ParseError(format!("Failed to parse Google News RSS: {}", e))
    })?;

    Ok(channel
        .items()
        .iter()
        .filter_map(|item| to_article(item, now))
        .collect())
}

fn to_article(item: &rss::Item, now: DateTime<Utc>) -> Option<Article> {
    let raw_title = non_blank(item.title().map(str::to_string))?;

    // Titles look like "Headline - Outlet"; the <source> element is preferred
    // for the outlet but the suffix is dropped either way
    let (title, title_source) = split_google_title(&raw_title);
    let source = item
        .source()
        .and_then(|s| non_blank(s.title().map(str::to_string)))
        .or(title_source)
        .unwrap_or_else(|| FALLBACK_SOURCE.to_string());

    let description_html = item.description().unwrap_or_default();

    let image = item
        .enclosure()
        .filter(|e| e.mime_type().starts_with("image/"))
        .map(|e| e.url().to_string())
        .or_else(|| extract_media_content(item))
        .or_else(|| extract_image_from_html(description_html));

    Some(Article {
        title,
        description: strip_html(description_html),
        url: non_blank(item.link().map(str::to_string)).unwrap_or_default(),
        image,
        source,
        published_at: normalize_timestamp(item.pub_date(), now),
    })
}

/// Split "Headline - Outlet" into the headline and the outlet name
fn split_google_title(title: &str) -> (String, Option<String>) {
    match title.rfind(" - ") {
        Some(pos) if !title[..pos].trim().is_empty() => {
            let clean_title = title[..pos].trim().to_string();
            let source = non_blank(Some(title[pos + 3..].to_string()));
            (clean_title, source)
        }
        _ => (title.to_string(), None),
    }
}

/// Extract image from RSS media:content or media:thumbnail extensions
fn extract_media_content(item: &rss::Item) -> Option<String> {
    let media = item.extensions().get("media")?;

    if let Some(content_list) = media.get("content") {
        for content in content_list {
            if let Some(url) = content.attrs().get("url") {
                let medium = content.attrs().get("medium").map(|s| s.as_str());
                let mime = content.attrs().get("type").map(|s| s.as_str());

                if medium == Some("image") || mime.is_some_and(|m| m.starts_with("image/")) {
                    return Some(url.clone());
                }
            }
        }
    }

    media
        .get("thumbnail")?
        .iter()
        .find_map(|thumbnail| thumbnail.attrs().get("url").cloned())
}
