//! Tag Repository Port

use async_trait::async_trait;

use super::Repository;
use crate::domain::{errors::DomainError, Tag};

/// Repository interface for Tag entities
#[async_trait]
pub trait TagRepository: Repository<Tag> {
    /// Find all Tags
    async fn find_all(&self) -> Result<Vec<Tag>, DomainError>;

    /// Find a Tag by exact label
    async fn find_by_label(&self, label: &str) -> Result<Option<Tag>, DomainError>;
}
