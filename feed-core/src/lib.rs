//! Core types for the unified news feed
//!
//! This crate defines the shared data structures used across the feed,
//! including the normalized article record and the endpoint's response body.

pub mod error;
pub mod news;

pub use error::{FeedError, FeedResult};
pub use news::{Article, FeedDebug, FeedResponse};
