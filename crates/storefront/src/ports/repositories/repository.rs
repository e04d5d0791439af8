//! Generic Repository Port
//!
//! The create/read/update/delete contract shared by every entity store.

use async_trait::async_trait;

use crate::domain::errors::DomainError;

/// Basic persistence operations for one entity type.
///
/// Store failures are always returned as `DomainError::Store`; no
/// implementation may report success for an operation that did not happen.
#[async_trait]
pub trait Repository<T>: Send + Sync
where
    T: Send + Sync + 'static,
{
    /// Persist a new entity and return it with its generated id
    async fn create(&self, entity: &T) -> Result<T, DomainError>;

    /// Find an entity by id
    async fn read(&self, id: i64) -> Result<Option<T>, DomainError>;

    /// Replace the stored entity carrying the same id.
    /// Returns `None` when no entity has that id.
    async fn update(&self, entity: &T) -> Result<Option<T>, DomainError>;

    /// Delete an entity by id. Returns `false` when nothing was removed.
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;

    /// Check if an entity exists
    async fn exists(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.read(id).await?.is_some())
    }
}
