//! Infrastructure Adapters
//!
//! Implementations of the order repository port.

pub mod memory;
pub mod postgres;

// Re-exports
pub use memory::MemoryOrderRepository;
pub use postgres::PgOrderRepository;
