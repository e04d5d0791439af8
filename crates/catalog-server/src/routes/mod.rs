//! Catalog API Routes
//!
//! - /api/v1/catalog/offers - Offer management and searches
//! - /api/v1/catalog/categories - Category management
//! - /api/v1/catalog/tags - Tag management

pub mod category;
pub mod offer;
pub mod swagger;
pub mod tag;
