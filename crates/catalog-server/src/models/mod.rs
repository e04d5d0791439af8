//! Catalog API Models
//!
//! Request/response DTOs and query parameters for the catalog routes.

mod category;
mod offer;
mod tag;

pub use category::*;
pub use offer::*;
pub use tag::*;
