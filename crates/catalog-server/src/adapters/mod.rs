//! Infrastructure Adapters
//!
//! Implementations of the catalog repository ports.

pub mod memory;
pub mod postgres;

// Re-exports
pub use memory::{MemoryCatalog, MemoryCategoryRepository, MemoryOfferRepository, MemoryTagRepository};
pub use postgres::{PgCategoryRepository, PgOfferRepository, PgTagRepository};
