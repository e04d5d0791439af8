//! Tag Application Service (Use Case)

use std::sync::Arc;

use storefront::{DomainError, ErrorMessage, ServiceError, Tag, TagRepository};

/// Application service for Tag operations
pub struct TagService {
    tags: Arc<dyn TagRepository>,
}

impl TagService {
    pub fn new(tags: Arc<dyn TagRepository>) -> Self {
        Self { tags }
    }

    /// Create a new Tag
    pub async fn create_tag(&self, label: String) -> Result<Tag, ServiceError> {
        let label = label.trim().to_string();
        if label.is_empty() {
            return Err(ServiceError::not_created(ErrorMessage::NullFields));
        }

        let created = self
            .tags
            .create(&Tag::new(label))
            .await
            .map_err(ServiceError::wrap(ServiceError::not_created, ErrorMessage::NotAdded))?;

        tracing::info!("Created Tag: {} ({})", created.label, created.id);
        Ok(created)
    }

    /// Get all Tags
    pub async fn find_all(&self) -> Result<Vec<Tag>, ServiceError> {
        self.tags
            .find_all()
            .await
            .map_err(ServiceError::wrap(ServiceError::not_found, ErrorMessage::NotFound))
    }

    /// Get a Tag by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Tag, ServiceError> {
        let wrap = ServiceError::wrap(ServiceError::not_found, ErrorMessage::NotFound);
        self.tags
            .read(id)
            .await
            .map_err(&wrap)?
            .ok_or_else(|| wrap(DomainError::not_found("Tag", id)))
    }

    /// Delete a Tag; offers lose the link
    pub async fn delete_tag(&self, id: i64) -> Result<(), ServiceError> {
        let deleted = self
            .tags
            .delete(id)
            .await
            .map_err(ServiceError::wrap(ServiceError::not_deleted, ErrorMessage::NotDeleted))?;

        if !deleted {
            return Err(ServiceError::not_deleted(ErrorMessage::NotDeleted)
                .because(DomainError::not_found("Tag", id)));
        }

        tracing::info!("Deleted Tag: {}", id);
        Ok(())
    }
}
