//! Provider-specific wire types for GNews, NewsData.io and MediaStack
//!
//! Every field is optional: providers routinely omit or null them, and the
//! adapters decide the fallbacks.

use serde::Deserialize;

// ============================================================================
// GNews Types
// ============================================================================

/// A single GNews search result
#[derive(Debug, Deserialize)]
pub struct GNewsArticle {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    /// Publication date (ISO 8601)
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    pub source: Option<GNewsSource>,
}

/// Outlet attached to a GNews result
#[derive(Debug, Deserialize)]
pub struct GNewsSource {
    pub name: Option<String>,
    pub url: Option<String>,
}

// ============================================================================
// NewsData.io Types
// ============================================================================

/// A single NewsData.io result
#[derive(Debug, Deserialize)]
pub struct NewsDataArticle {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub image_url: Option<String>,
    /// Publication date, `YYYY-MM-DD HH:MM:SS` in UTC
    #[serde(rename = "pubDate")]
    pub pub_date: Option<String>,
    pub source_name: Option<String>,
    pub source_id: Option<String>,
}

// ============================================================================
// MediaStack Types
// ============================================================================

/// A single MediaStack result
#[derive(Debug, Deserialize)]
pub struct MediaStackArticle {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    /// Publication date (ISO 8601 with offset)
    pub published_at: Option<String>,
    pub source: Option<String>,
}

/// Error object MediaStack returns in place of `data`
#[derive(Debug, Deserialize)]
pub struct MediaStackError {
    pub code: Option<String>,
    pub message: Option<String>,
}
