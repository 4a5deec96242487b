//! Mapping of aggregation failures onto HTTP responses

use std::any::Any;
use std::error::Error as StdError;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use feed_services::AggregateError;

/// Errors that surface to API callers as a 500
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("News aggregation failed: {0}")]
    Aggregate(#[from] AggregateError),

    #[error("Failed to encode feed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Render an error as `{ "error": ... }`, adding `"stack"` when details are exposed
pub fn error_response(err: &ApiError, expose_details: bool) -> Response {
    let stack = expose_details.then(|| error_chain(err));
    internal_error(err.to_string(), stack)
}

/// Render a handler panic with the same body shape as [`error_response`]
pub fn panic_response(panic: Box<dyn Any + Send + 'static>, expose_details: bool) -> Response {
    let message = panic_message(panic.as_ref());
    tracing::error!("Request handler panicked: {}", message);

    let stack = expose_details.then(|| format!("panicked at: {}", message));
    internal_error(format!("News aggregation failed: {}", message), stack)
}

fn internal_error(message: String, stack: Option<String>) -> Response {
    let mut body = serde_json::json!({ "error": message });
    if let Some(stack) = stack {
        body["stack"] = serde_json::Value::String(stack);
    }
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn error_chain(err: &dyn StdError) -> String {
    let mut chain = format!("{:?}", err);
    let mut source = err.source();
    while let Some(cause) = source {
        chain.push_str("\ncaused by: ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    chain
}
