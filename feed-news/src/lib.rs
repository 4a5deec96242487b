//! News provider adapters for the unified feed
//!
//! This crate provides clients for fetching news from:
//! - GNews: keyed JSON search API
//! - NewsData.io: keyed JSON search API
//! - MediaStack: keyed JSON search API
//! - Google News: RSS search feed (no key required)
//!
//! Every client implements [`NewsProvider`] and normalizes its payload into
//! [`feed_core::Article`].

pub mod config;
pub mod error;
pub mod gnews;
pub mod google_news;
pub mod mediastack;
pub mod newsdata;
pub mod normalize;
pub mod provider;
pub mod types;

pub use config::ProviderCredentials;
pub use error::NewsError;
pub use gnews::{GNewsClient, GNEWS_PROVIDER};
pub use google_news::{GoogleNewsClient, GOOGLE_NEWS_PROVIDER};
pub use mediastack::{MediaStackClient, MEDIASTACK_PROVIDER};
pub use newsdata::{NewsDataClient, NEWSDATA_PROVIDER};
pub use provider::{build_http_client, NewsProvider};
