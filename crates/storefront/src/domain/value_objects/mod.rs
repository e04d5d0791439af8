//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod error_message;
mod offer_filter;
mod tag_match_mode;

pub use error_message::*;
pub use offer_filter::*;
pub use tag_match_mode::*;
