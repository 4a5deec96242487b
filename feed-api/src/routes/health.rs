//! Health check endpoints

use axum::{extract::State, response::Json, routing::get, Router};
use serde::Serialize;

use crate::AppState;

/// Configuration state of one provider
#[derive(Debug, Serialize)]
struct ProviderHealth {
    name: &'static str,
    configured: bool,
}

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    providers: Vec<ProviderHealth>,
}

/// Health check handler
///
/// Unconfigured providers are an expected state, so this always reports ok.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let providers = state
        .aggregator
        .provider_status()
        .into_iter()
        .map(|(name, configured)| ProviderHealth { name, configured })
        .collect();

    Json(HealthResponse {
        status: "ok",
        providers,
    })
}

/// Simple liveness check (always returns OK if server is running)
async fn liveness() -> &'static str {
    "OK"
}

/// Create health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
}
