//! Application Layer (Use Cases)
//!
//! Pre-condition checks and outcome translation between the routes and
//! the catalog repositories.

mod category_service;
mod offer_service;
mod tag_service;

pub use category_service::CategoryService;
pub use offer_service::OfferService;
pub use tag_service::TagService;
