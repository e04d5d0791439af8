//! Catalog Service
//!
//! HTTP API over offers, categories and tags, with Postgres and in-memory
//! repository adapters.

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use storefront::{CategoryRepository, HealthCheck, OfferRepository, ServiceConfig, TagRepository};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod adapters;
pub mod application;
pub mod models;
pub mod routes;

use application::{CategoryService, OfferService, TagService};

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub offer_service: Arc<OfferService>,
    pub category_service: Arc<CategoryService>,
    pub tag_service: Arc<TagService>,
}

impl AppState {
    /// Wire services onto one set of repositories
    pub fn new(
        offers: Arc<dyn OfferRepository>,
        categories: Arc<dyn CategoryRepository>,
        tags: Arc<dyn TagRepository>,
    ) -> Self {
        Self {
            offer_service: Arc::new(OfferService::new(
                offers.clone(),
                categories.clone(),
                tags.clone(),
            )),
            category_service: Arc::new(CategoryService::new(categories, offers)),
            tag_service: Arc::new(TagService::new(tags)),
        }
    }

    /// State backed by an in-memory catalog
    pub fn in_memory(catalog: &adapters::MemoryCatalog) -> Self {
        Self::new(
            Arc::new(catalog.offers()),
            Arc::new(catalog.categories()),
            Arc::new(catalog.tags()),
        )
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
    storefront::health("catalog", env!("CARGO_PKG_VERSION"))
}

/// Build the full catalog router
pub fn app(state: AppState, config: &ServiceConfig) -> Router {
    let openapi = routes::swagger::ApiDoc::openapi();

    let api = Router::new()
        .route("/health", get(health_check))
        .merge(routes::offer::router())
        .merge(routes::category::router())
        .merge(routes::tag::router());

    storefront::with_middleware(api, config)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .with_state(state)
}
