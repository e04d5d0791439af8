//! Category Repository Port

use async_trait::async_trait;

use super::Repository;
use crate::domain::{errors::DomainError, Category};

/// Repository interface for Category entities
#[async_trait]
pub trait CategoryRepository: Repository<Category> {
    /// Find all Categories
    async fn find_all(&self) -> Result<Vec<Category>, DomainError>;

    /// Find a Category by exact name
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, DomainError>;
}
