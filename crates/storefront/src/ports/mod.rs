//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain layer
//! interacts with the backing store.
//!
//! Implementations of these traits live in the server crates.

pub mod repositories;

// Re-exports
pub use repositories::*;
