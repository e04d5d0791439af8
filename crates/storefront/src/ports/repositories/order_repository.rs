//! Order Repository Port
//!
//! Abstract interface for Order persistence operations.

use async_trait::async_trait;

use super::Repository;
use crate::domain::{errors::DomainError, Order};

/// Repository interface for Order aggregates (order + items)
#[async_trait]
pub trait OrderRepository: Repository<Order> {
    /// Find all Orders
    async fn find_all(&self) -> Result<Vec<Order>, DomainError>;

    /// Find all Orders placed by a customer
    async fn find_by_customer_email(&self, email: &str) -> Result<Vec<Order>, DomainError>;
}
