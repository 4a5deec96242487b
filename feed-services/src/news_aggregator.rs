//! News Aggregator Service
//!
//! Queries every provider concurrently on each call and merges the results
//! into one deduplicated, newest-first feed. Provider failures never leave
//! this module: each one is logged and contributes an empty list.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use feed_core::{Article, FeedDebug, FeedResponse};
use feed_news::{
    build_http_client, GNewsClient, GoogleNewsClient, MediaStackClient, NewsDataClient, NewsError,
    NewsProvider, ProviderCredentials,
};

/// Configuration for NewsAggregator
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Longest a single provider may take before it counts as failed
    pub provider_timeout: Duration,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            provider_timeout: Duration::from_secs(10),
        }
    }
}

/// Failures of the aggregation itself, as opposed to a single provider
#[derive(Debug, Error)]
pub enum AggregateError {
    /// A provider task ended without producing a result (e.g. runtime shutdown)
    #[error("Provider task '{provider}' did not complete: {message}")]
    TaskAborted {
        provider: &'static str,
        message: String,
    },
}

/// Fan-out/fan-in aggregator over a fixed, ordered set of providers
pub struct NewsAggregator {
    /// Providers in merge order; earlier ones win duplicate stories
    providers: Vec<Arc<dyn NewsProvider>>,
    config: AggregatorConfig,
}

impl NewsAggregator {
    /// Create an aggregator over the given providers, in merge order
    pub fn new(providers: Vec<Arc<dyn NewsProvider>>, config: AggregatorConfig) -> Self {
        Self { providers, config }
    }

    /// Create the standard aggregator: the keyed APIs first, the free RSS fallback last
    pub fn from_credentials(credentials: &ProviderCredentials, config: AggregatorConfig) -> Self {
        let client = build_http_client();
        let providers: Vec<Arc<dyn NewsProvider>> = vec![
            Arc::new(GNewsClient::with_client(
                client.clone(),
                credentials.gnews_api_key.clone(),
            )),
            Arc::new(NewsDataClient::with_client(
                client.clone(),
                credentials.newsdata_api_key.clone(),
            )),
            Arc::new(MediaStackClient::with_client(
                client.clone(),
                credentials.mediastack_api_key.clone(),
            )),
            Arc::new(GoogleNewsClient::with_client(client)),
        ];

        info!(
            "Initializing NewsAggregator with {} providers (timeout {}ms)",
            providers.len(),
            config.provider_timeout.as_millis()
        );
        Self::new(providers, config)
    }

    /// Provider names in merge order
    pub fn sources(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    /// Whether each provider is configured, in merge order
    pub fn provider_status(&self) -> Vec<(&'static str, bool)> {
        self.providers
            .iter()
            .map(|p| (p.name(), p.is_configured()))
            .collect()
    }

    /// Fetch from every provider concurrently and build the merged feed
    #[instrument(skip(self))]
    pub async fn aggregate(&self) -> Result<FeedResponse, AggregateError> {
        let timeout = self.config.provider_timeout;

        let handles: Vec<_> = self
            .providers
            .iter()
            .map(|provider| {
                let provider = Arc::clone(provider);
                tokio::spawn(async move { fetch_with_timeout(provider.as_ref(), timeout).await })
            })
            .collect();

        // join_all keeps declaration order regardless of completion order
        let outcomes = join_all(handles).await;

        let mut lists = Vec::with_capacity(self.providers.len());
        for (provider, joined) in self.providers.iter().zip(outcomes) {
            let name = provider.name();
            let articles = match joined {
                Ok(outcome) => settle(name, outcome),
                Err(e) if e.is_panic() => {
                    warn!("Provider {} panicked while fetching: {}", name, e);
                    Vec::new()
                }
                Err(e) => {
                    return Err(AggregateError::TaskAborted {
                        provider: name,
                        message: e.to_string(),
                    });
                }
            };
            info!("Provider {} returned {} articles", name, articles.len());
            lists.push(articles);
        }

        let counts: Vec<usize> = lists.iter().map(Vec::len).collect();
        let data = merge_articles(lists);

        info!(
            "Aggregated {} articles from {} providers",
            data.len(),
            self.providers.len()
        );

        Ok(FeedResponse {
            data,
            debug: FeedDebug {
                sources: self.sources(),
                counts,
            },
        })
    }
}

/// Race a provider against the timeout
async fn fetch_with_timeout(
    provider: &dyn NewsProvider,
    timeout: Duration,
) -> Result<Vec<Article>, NewsError> {
    match tokio::time::timeout(timeout, provider.fetch_articles()).await {
        Ok(result) => result,
        Err(_) => Err(NewsError::Timeout {
            provider: provider.name(),
            millis: timeout.as_millis(),
        }),
    }
}

/// Collapse a provider outcome into its contribution to the feed
fn settle(name: &str, outcome: Result<Vec<Article>, NewsError>) -> Vec<Article> {
    match outcome {
        Ok(articles) => articles,
        Err(e) if e.is_not_configured() => {
            debug!("Provider {} not configured, skipping", name);
            Vec::new()
        }
        Err(e) => {
            warn!("Provider {} failed: {}", name, e);
            Vec::new()
        }
    }
}

/// Concatenate provider lists in order, keep the first article per dedup key,
/// then order newest first.
///
/// The sort is stable, so articles with equal timestamps keep merge order.
pub fn merge_articles(lists: Vec<Vec<Article>>) -> Vec<Article> {
    let mut seen = HashSet::new();
    let mut merged: Vec<Article> = lists
        .into_iter()
        .flatten()
        .filter(|article| seen.insert(article.dedup_key().to_string()))
        .collect();

    merged.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};
    use std::time::Instant;

    enum Behavior {
        Articles(Vec<Article>),
        Fail,
        Unconfigured,
        Hang,
        Panic,
        Slow(Duration, Vec<Article>),
    }

    struct FakeProvider {
        name: &'static str,
        behavior: Behavior,
    }

    #[async_trait]
    impl NewsProvider for FakeProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        fn is_configured(&self) -> bool {
            !matches!(self.behavior, Behavior::Unconfigured)
        }

        async fn fetch_articles(&self) -> Result<Vec<Article>, NewsError> {
            match &self.behavior {
                Behavior::Articles(articles) => Ok(articles.clone()),
                Behavior::Fail => Err(NewsError::ApiError {
                    status: 503,
                    message: "upstream down".to_string(),
                }),
                Behavior::Unconfigured => Err(NewsError::NotConfigured(self.name)),
                Behavior::Hang => {
                    std::future::pending::<()>().await;
                    Ok(Vec::new())
                }
                Behavior::Panic => panic!("adapter bug"),
                Behavior::Slow(delay, articles) => {
                    tokio::time::sleep(*delay).await;
                    Ok(articles.clone())
                }
            }
        }
    }

    fn provider(name: &'static str, behavior: Behavior) -> Arc<dyn NewsProvider> {
        Arc::new(FakeProvider { name, behavior })
    }

    fn ts(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()
    }

    fn article(title: &str, url: &str, published_at: DateTime<Utc>) -> Article {
        Article {
            title: title.to_string(),
            description: String::new(),
            url: url.to_string(),
            image: None,
            source: "Test".to_string(),
            published_at,
        }
    }

    fn aggregator(providers: Vec<Arc<dyn NewsProvider>>) -> NewsAggregator {
        NewsAggregator::new(
            providers,
            AggregatorConfig {
                provider_timeout: Duration::from_millis(200),
            },
        )
    }

    fn titles(articles: &[Article]) -> Vec<&str> {
        articles.iter().map(|a| a.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_end_to_end_merge() {
        let agg = aggregator(vec![
            provider("a", Behavior::Articles(vec![article("A1", "https://x.com/1", ts(2))])),
            provider("b", Behavior::Articles(vec![article("A1-dup", "https://x.com/1", ts(1))])),
            provider("c", Behavior::Articles(vec![])),
            provider("d", Behavior::Articles(vec![article("D1", "https://x.com/2", ts(3))])),
        ]);

        let feed = agg.aggregate().await.unwrap();
        assert_eq!(titles(&feed.data), vec!["D1", "A1"]);
        assert_eq!(feed.debug.sources, vec!["a", "b", "c", "d"]);
        assert_eq!(feed.debug.counts, vec![1, 1, 0, 1]);
    }

    #[tokio::test]
    async fn test_all_providers_down_still_succeeds() {
        let agg = aggregator(vec![
            provider("a", Behavior::Unconfigured),
            provider("b", Behavior::Fail),
            provider("c", Behavior::Unconfigured),
            provider("d", Behavior::Fail),
        ]);

        let feed = agg.aggregate().await.unwrap();
        assert!(feed.data.is_empty());
        assert_eq!(feed.debug.counts, vec![0, 0, 0, 0]);
    }

    #[tokio::test]
    async fn test_single_failure_is_isolated() {
        let agg = aggregator(vec![
            provider("a", Behavior::Articles(vec![article("A1", "https://x.com/a", ts(1))])),
            provider("b", Behavior::Fail),
            provider("c", Behavior::Articles(vec![
                article("C1", "https://x.com/c1", ts(2)),
                article("C2", "https://x.com/c2", ts(4)),
            ])),
            provider("d", Behavior::Articles(vec![article("D1", "https://x.com/d", ts(3))])),
        ]);

        let feed = agg.aggregate().await.unwrap();
        assert_eq!(titles(&feed.data), vec!["C2", "D1", "C1", "A1"]);
        assert_eq!(feed.debug.counts, vec![1, 0, 2, 1]);
    }

    #[tokio::test]
    async fn test_hung_provider_times_out() {
        let agg = aggregator(vec![
            provider("a", Behavior::Hang),
            provider("b", Behavior::Articles(vec![article("B1", "https://x.com/b", ts(1))])),
        ]);

        let start = Instant::now();
        let feed = agg.aggregate().await.unwrap();
        assert!(start.elapsed() < Duration::from_secs(2));
        assert_eq!(titles(&feed.data), vec!["B1"]);
        assert_eq!(feed.debug.counts, vec![0, 1]);
    }

    #[tokio::test]
    async fn test_panicking_provider_is_isolated() {
        let agg = aggregator(vec![
            provider("a", Behavior::Panic),
            provider("b", Behavior::Articles(vec![article("B1", "https://x.com/b", ts(1))])),
        ]);

        let feed = agg.aggregate().await.unwrap();
        assert_eq!(titles(&feed.data), vec!["B1"]);
        assert_eq!(feed.debug.counts, vec![0, 1]);
    }

    #[tokio::test]
    async fn test_providers_run_concurrently() {
        let delay = Duration::from_millis(150);
        let agg = aggregator(
            ["a", "b", "c", "d"]
                .into_iter()
                .map(|name| provider(name, Behavior::Slow(delay, Vec::new())))
                .collect(),
        );

        let start = Instant::now();
        agg.aggregate().await.unwrap();
        // Sequential execution would need at least 4 x 150ms
        assert!(start.elapsed() < Duration::from_millis(450));
    }

    #[tokio::test]
    async fn test_order_follows_declaration_not_completion() {
        let agg = aggregator(vec![
            provider(
                "slow",
                Behavior::Slow(
                    Duration::from_millis(100),
                    vec![article("Slow", "https://x.com/same", ts(1))],
                ),
            ),
            provider("fast", Behavior::Articles(vec![article("Fast", "https://x.com/same", ts(5))])),
        ]);

        let feed = agg.aggregate().await.unwrap();
        assert_eq!(titles(&feed.data), vec!["Slow"]);
        assert_eq!(feed.debug.sources, vec!["slow", "fast"]);
        assert_eq!(feed.debug.counts, vec![1, 1]);
    }

    #[test]
    fn test_merge_dedups_by_title_without_url() {
        let merged = merge_articles(vec![
            vec![article("Same story", "https://x.com/1", ts(1))],
            vec![article("Same story", "", ts(2))],
            vec![article("Same story", "", ts(3))],
        ]);

        // url-less duplicates collapse onto each other, not onto the url-keyed one
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].url, "");
        assert_eq!(merged[0].published_at, ts(2));
        assert_eq!(merged[1].url, "https://x.com/1");
    }

    #[test]
    fn test_merge_sorts_newest_first() {
        let merged = merge_articles(vec![
            vec![article("old", "u1", ts(1)), article("new", "u2", ts(9))],
            vec![article("mid", "u3", ts(5))],
            vec![article("newer", "u4", ts(7))],
        ]);

        assert!(merged
            .windows(2)
            .all(|pair| pair[0].published_at >= pair[1].published_at));
        assert_eq!(titles(&merged), vec!["new", "newer", "mid", "old"]);
    }

    #[test]
    fn test_standard_provider_order() {
        let agg = NewsAggregator::from_credentials(
            &ProviderCredentials::default(),
            AggregatorConfig::default(),
        );
        assert_eq!(agg.sources(), vec!["gnews", "newsdata", "mediastack", "google_rss"]);
        assert_eq!(
            agg.provider_status(),
            vec![
                ("gnews", false),
                ("newsdata", false),
                ("mediastack", false),
                ("google_rss", true),
            ]
        );
    }
}
