//! API route definitions

mod health;
mod news;

use std::any::Any as StdAny;

use axum::{
    http::{header, Method},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::panic_response;
use crate::AppState;

/// Create all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(news::routes())
        .merge(health::routes())
}

/// Build the full application router
pub fn app(state: AppState) -> Router {
    // The feed is public and read-only
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let expose_details = state.expose_error_details;

    Router::new()
        .nest("/api", api_routes())
        .layer(CatchPanicLayer::custom(move |panic: Box<dyn StdAny + Send + 'static>| {
            panic_response(panic, expose_details)
        }))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
