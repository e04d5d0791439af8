//! Offer Repository Port
//!
//! Abstract interface for Offer persistence operations.

use async_trait::async_trait;

use super::Repository;
use crate::domain::{errors::DomainError, Offer, OfferFilter};

/// Repository interface for Offer aggregates (offer + prices + tag links)
#[async_trait]
pub trait OfferRepository: Repository<Offer> {
    /// Find offers matching every populated field of the filter
    async fn find_filtered(&self, filter: &OfferFilter) -> Result<Vec<Offer>, DomainError>;

    /// Find all offers pointing at a category
    async fn find_by_category(&self, category_id: i64) -> Result<Vec<Offer>, DomainError>;

    /// Find all Offers
    async fn find_all(&self) -> Result<Vec<Offer>, DomainError> {
        self.find_filtered(&OfferFilter::default()).await
    }

    /// Find Offers by exact name
    async fn find_by_name(&self, name: &str) -> Result<Vec<Offer>, DomainError> {
        self.find_filtered(&OfferFilter::default().with_name(name))
            .await
    }
}
