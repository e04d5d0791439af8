//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Offer: sellable catalog item (owns prices and tag links)
//! - Category / Tag: catalog classification
//! - Price: amount owned by an offer
//! - Order / OrderItem: inventory aggregate

mod category;
mod offer;
mod order;
mod price;
mod tag;

pub use category::*;
pub use offer::*;
pub use order::*;
pub use price::*;
pub use tag::*;
