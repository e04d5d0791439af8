//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod category_repository;
mod offer_repository;
mod order_repository;
mod repository;
mod tag_repository;

pub use category_repository::*;
pub use offer_repository::*;
pub use order_repository::*;
pub use repository::*;
pub use tag_repository::*;
