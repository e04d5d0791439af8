//! Inventory API Models

mod order;

pub use order::*;
