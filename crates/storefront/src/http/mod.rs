//! Shared HTTP plumbing for the storefront services

mod error;
mod extract;
mod middleware;

pub use error::{ApiError, ErrorBody};
pub use extract::{ApiJson, ApiPath, ApiQuery};
pub use middleware::{log_requests, with_middleware};

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// Health check payload
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthCheck {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Build a health handler response for a named service
pub fn health(service: &str, version: &str) -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        service: service.to_string(),
        version: version.to_string(),
    })
}
