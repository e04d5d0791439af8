//! Application Layer (Use Cases)
//!
//! Pre-condition checks and outcome translation between the routes and the
//! order repository.

mod order_service;

pub use order_service::OrderService;
