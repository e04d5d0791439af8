//! Inventory Service
//!
//! HTTP API over customer orders and their items.

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use storefront::{HealthCheck, OrderRepository, ServiceConfig};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod adapters;
pub mod application;
pub mod models;
pub mod routes;

use application::OrderService;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub order_service: Arc<OrderService>,
}

impl AppState {
    pub fn new(orders: Arc<dyn OrderRepository>) -> Self {
        Self {
            order_service: Arc::new(OrderService::new(orders)),
        }
    }
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthCheck)),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthCheck> {
    storefront::health("inventory", env!("CARGO_PKG_VERSION"))
}

/// Build the full inventory router
pub fn app(state: AppState, config: &ServiceConfig) -> Router {
    let openapi = routes::swagger::ApiDoc::openapi();

    let api = Router::new()
        .route("/health", get(health_check))
        .merge(routes::order::router());

    storefront::with_middleware(api, config)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .with_state(state)
}
