//! Business logic services for the unified news feed
//!
//! This crate provides the service layer that fans out to every news
//! provider and folds their results into one feed.

pub mod news_aggregator;

pub use news_aggregator::{merge_articles, AggregateError, AggregatorConfig, NewsAggregator};
