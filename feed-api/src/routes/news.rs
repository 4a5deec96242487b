//! News feed endpoint

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tracing::{error, info};

use crate::error::{error_response, ApiError};
use crate::AppState;

/// Downstream caches may reuse a feed for five minutes
pub const CACHE_CONTROL_VALUE: &str = "public, max-age=300";

/// Create news routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/news", get(get_news))
}

/// GET /api/news - Merged feed from every configured provider
async fn get_news(State(state): State<AppState>) -> Response {
    match build_feed(&state).await {
        Ok(body) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "application/json"),
                (header::CACHE_CONTROL, CACHE_CONTROL_VALUE),
            ],
            body,
        )
            .into_response(),
        Err(e) => {
            error!("Failed to build news feed: {}", e);
            error_response(&e, state.expose_error_details)
        }
    }
}

async fn build_feed(state: &AppState) -> Result<Vec<u8>, ApiError> {
    let feed = state.aggregator.aggregate().await?;
    info!("Serving {} news articles", feed.data.len());
    Ok(serde_json::to_vec(&feed)?)
}
