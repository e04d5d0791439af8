//! Inventory API Routes
//!
//! - /api/v1/inventory/orders - Order management and item changes

pub mod order;
pub mod swagger;
