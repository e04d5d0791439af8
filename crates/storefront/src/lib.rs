//! Storefront Domain Library
//!
//! Core domain types and interfaces shared by the catalog and inventory
//! services.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Offer, Category, Tag, Price, Order, OrderItem
//!   - `value_objects/`: OfferFilter, TagMatchMode, ErrorMessage
//!   - `errors/`: DomainError (store/validation causes) and ServiceError
//!
//! - **Ports** (`ports/`): Repository traits implemented by the servers
//!
//! - **HTTP** (`http/`): Error-to-status mapping and the middleware chain
//!
//! - **Config** (`config`): Service configuration
//!
//! # Usage
//!
//! ```rust,ignore
//! use storefront::domain::{Offer, OfferFilter};
//! use storefront::ports::{OfferRepository, Repository};
//! ```

pub mod config;
pub mod domain;
pub mod http;
pub mod ports;

// Re-export commonly used types
pub use config::ServiceConfig;
pub use domain::{
    split_labels, Category, DomainError, ErrorMessage, Offer, OfferFilter, Order, OrderItem,
    Price, ServiceError, Tag, TagMatchMode,
};
pub use http::{
    health, with_middleware, ApiError, ApiJson, ApiPath, ApiQuery, ErrorBody, HealthCheck,
};
pub use ports::{CategoryRepository, OfferRepository, OrderRepository, Repository, TagRepository};
