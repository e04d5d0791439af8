//! Category Application Service (Use Case)

use std::sync::Arc;

use storefront::{
    Category, CategoryRepository, DomainError, ErrorMessage, Offer, OfferRepository, ServiceError,
};

/// Application service for Category operations
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
    offers: Arc<dyn OfferRepository>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>, offers: Arc<dyn OfferRepository>) -> Self {
        Self { categories, offers }
    }

    /// Create a new Category
    pub async fn create_category(&self, name: String) -> Result<Category, ServiceError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ServiceError::not_created(ErrorMessage::NullFields));
        }

        let created = self
            .categories
            .create(&Category::new(name))
            .await
            .map_err(ServiceError::wrap(ServiceError::not_created, ErrorMessage::NotAdded))?;

        tracing::info!("Created Category: {} ({})", created.name, created.id);
        Ok(created)
    }

    /// Get all Categories
    pub async fn find_all(&self) -> Result<Vec<Category>, ServiceError> {
        self.categories
            .find_all()
            .await
            .map_err(ServiceError::wrap(ServiceError::not_found, ErrorMessage::NotFound))
    }

    /// Get a Category by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Category, ServiceError> {
        let wrap = ServiceError::wrap(ServiceError::not_found, ErrorMessage::NotFound);
        self.categories
            .read(id)
            .await
            .map_err(&wrap)?
            .ok_or_else(|| wrap(DomainError::not_found("Category", id)))
    }

    /// Get a Category by its unique name
    pub async fn find_by_name(&self, name: &str) -> Result<Category, ServiceError> {
        let wrap = ServiceError::wrap(ServiceError::not_found, ErrorMessage::NotFound);
        self.categories
            .find_by_name(name)
            .await
            .map_err(&wrap)?
            .ok_or_else(|| wrap(DomainError::not_found_str("Category", name)))
    }

    /// Offers placed in a Category
    pub async fn offers_of(&self, id: i64) -> Result<Vec<Offer>, ServiceError> {
        let wrap = ServiceError::wrap(ServiceError::not_found, ErrorMessage::NotFound);
        if !self.categories.exists(id).await.map_err(&wrap)? {
            return Err(wrap(DomainError::not_found("Category", id)));
        }
        self.offers.find_by_category(id).await.map_err(&wrap)
    }

    /// Delete a Category; its offers are detached, not removed
    pub async fn delete_category(&self, id: i64) -> Result<(), ServiceError> {
        let deleted = self
            .categories
            .delete(id)
            .await
            .map_err(ServiceError::wrap(ServiceError::not_deleted, ErrorMessage::NotDeleted))?;

        if !deleted {
            return Err(ServiceError::not_deleted(ErrorMessage::NotDeleted)
                .because(DomainError::not_found("Category", id)));
        }

        tracing::info!("Deleted Category: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryCatalog;
    use storefront::Repository;

    fn service(catalog: &MemoryCatalog) -> CategoryService {
        CategoryService::new(Arc::new(catalog.categories()), Arc::new(catalog.offers()))
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let catalog = MemoryCatalog::new();
        let service = service(&catalog);

        let books = service.create_category("books".to_string()).await.unwrap();
        assert_eq!(service.find_by_id(books.id).await.unwrap(), books);
        assert_eq!(service.find_by_name("books").await.unwrap(), books);

        let err = service.find_by_name("music").await.unwrap_err();
        assert!(err.is_missing_entity());
    }

    #[tokio::test]
    async fn test_blank_and_duplicate_names() {
        let catalog = MemoryCatalog::new();
        let service = service(&catalog);

        let blank = service.create_category("  ".to_string()).await.unwrap_err();
        assert_eq!(blank.message(), ErrorMessage::NullFields);

        service.create_category("books".to_string()).await.unwrap();
        let dup = service.create_category("books".to_string()).await.unwrap_err();
        assert!(dup.is_conflict());
        assert_eq!(service.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_offers_of_and_delete() {
        let catalog = MemoryCatalog::new();
        let service = service(&catalog);
        let books = service.create_category("books".to_string()).await.unwrap();

        let mut novel = Offer::new("Novel".to_string(), None, true);
        novel.category = Some(books.clone());
        let novel = catalog.offers().create(&novel).await.unwrap();
        catalog
            .offers()
            .create(&Offer::new("Pen".to_string(), None, true))
            .await
            .unwrap();

        let offers = service.offers_of(books.id).await.unwrap();
        assert_eq!(offers, vec![novel.clone()]);

        service.delete_category(books.id).await.unwrap();
        let detached = catalog.offers().read(novel.id).await.unwrap().unwrap();
        assert_eq!(detached.category, None);

        let err = service.delete_category(books.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotDeleted { .. }));
        assert!(service.offers_of(books.id).await.unwrap_err().is_missing_entity());
    }
}
