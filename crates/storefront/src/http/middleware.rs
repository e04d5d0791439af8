//! Request middleware
//!
//! Explicit chain wrapped around every service router:
//! `log_requests` -> `TimeoutLayer` -> routes, with optional permissive CORS
//! on the outside.

use std::time::Instant;

use axum::{extract::Request, middleware, middleware::Next, response::Response, Router};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer};

use crate::config::ServiceConfig;

/// Log method, path, status and elapsed time of every request
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    tracing::debug!(%method, %path, "Request started");

    let response = next.run(request).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    if response.status().is_server_error() {
        tracing::error!(%method, %path, status, elapsed_ms, "Request finished");
    } else {
        tracing::info!(%method, %path, status, elapsed_ms, "Request finished");
    }

    response
}

/// Wrap a router with the shared middleware chain.
///
/// When the timeout fires the handler future is dropped, which cancels any
/// in-flight store call it was awaiting.
pub fn with_middleware<S>(router: Router<S>, config: &ServiceConfig) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let router = router
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(middleware::from_fn(log_requests));

    if config.cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
