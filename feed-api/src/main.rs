//! Unified News Feed API Server
//!
//! HTTP API server that merges articles from several news providers.

mod config;
mod error;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use feed_services::{AggregatorConfig, NewsAggregator};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::AppConfig;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<NewsAggregator>,
    /// Include error chains in 500 responses
    pub expose_error_details: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local file
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,feed_api=debug")),
        )
        .init();

    info!("Starting Unified News Feed API");

    let config = AppConfig::from_env()?;

    for (var, present) in config.credentials.presence() {
        if present {
            info!("{} found in environment", var);
        } else {
            info!("{} not set - that provider will contribute no articles", var);
        }
    }

    let aggregator = NewsAggregator::from_credentials(
        &config.credentials,
        AggregatorConfig {
            provider_timeout: config.provider_timeout,
        },
    );

    let state = AppState {
        aggregator: Arc::new(aggregator),
        expose_error_details: config.expose_error_details,
    };

    let app = routes::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
