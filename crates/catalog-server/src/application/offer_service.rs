//! Offer Application Service (Use Case)
//!
//! Validation, existence checks and outcome translation for offers.
//! Every collection change is a read-modify-write of the offer aggregate
//! followed by a single update.

use std::collections::HashMap;
use std::sync::Arc;

use storefront::{
    CategoryRepository, DomainError, ErrorMessage, Offer, OfferFilter, OfferRepository, Price,
    ServiceError, TagMatchMode, TagRepository,
};

/// Application service for Offer operations
pub struct OfferService {
    offers: Arc<dyn OfferRepository>,
    categories: Arc<dyn CategoryRepository>,
    tags: Arc<dyn TagRepository>,
}

impl OfferService {
    pub fn new(
        offers: Arc<dyn OfferRepository>,
        categories: Arc<dyn CategoryRepository>,
        tags: Arc<dyn TagRepository>,
    ) -> Self {
        Self {
            offers,
            categories,
            tags,
        }
    }

    /// Create a new Offer with its prices, tags and category
    pub async fn create_offer(&self, offer: Offer) -> Result<Offer, ServiceError> {
        if offer.name.trim().is_empty() {
            return Err(ServiceError::not_created(ErrorMessage::NullFields));
        }

        let wrap = ServiceError::wrap(ServiceError::not_created, ErrorMessage::NotAdded);
        validate_prices(&offer).map_err(&wrap)?;
        self.check_references(&offer).await.map_err(&wrap)?;

        let created = self.offers.create(&offer).await.map_err(&wrap)?;
        tracing::info!("Created Offer: {} ({})", created.name, created.id);

        Ok(created)
    }

    /// Replace an existing Offer (full-object update)
    pub async fn update_offer(&self, offer: Offer) -> Result<Offer, ServiceError> {
        if offer.name.trim().is_empty() {
            return Err(ServiceError::not_updated(ErrorMessage::NullFields));
        }

        let wrap = ServiceError::wrap(ServiceError::not_updated, ErrorMessage::NotUpdated);
        validate_prices(&offer).map_err(&wrap)?;

        if !self.offers.exists(offer.id).await.map_err(&wrap)? {
            return Err(wrap(DomainError::not_found("Offer", offer.id)));
        }
        self.check_references(&offer).await.map_err(&wrap)?;

        let updated = self
            .offers
            .update(&offer)
            .await
            .map_err(&wrap)?
            .ok_or_else(|| wrap(DomainError::not_found("Offer", offer.id)))?;

        tracing::info!("Updated Offer: {} ({})", updated.name, updated.id);
        Ok(updated)
    }

    /// Delete an Offer; deleting a missing id is an error
    pub async fn delete_offer(&self, id: i64) -> Result<(), ServiceError> {
        let wrap = ServiceError::wrap(ServiceError::not_deleted, ErrorMessage::NotDeleted);
        let deleted = self.offers.delete(id).await.map_err(&wrap)?;

        if !deleted {
            return Err(ServiceError::not_deleted(ErrorMessage::NotDeleted)
                .because(DomainError::not_found("Offer", id)));
        }

        tracing::info!("Deleted Offer: {}", id);
        Ok(())
    }

    /// Get an Offer by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Offer, ServiceError> {
        let wrap = ServiceError::wrap(ServiceError::not_found, ErrorMessage::NotFound);
        self.offers
            .read(id)
            .await
            .map_err(&wrap)?
            .ok_or_else(|| wrap(DomainError::not_found("Offer", id)))
    }

    /// Get all Offers
    pub async fn find_all(&self) -> Result<Vec<Offer>, ServiceError> {
        self.offers
            .find_all()
            .await
            .map_err(ServiceError::wrap(ServiceError::not_found, ErrorMessage::NotFound))
    }

    /// Find Offers carrying the given tag labels
    pub async fn find_by_tags(
        &self,
        labels: &[String],
        mode: TagMatchMode,
    ) -> Result<Vec<Offer>, ServiceError> {
        let filter = OfferFilter::default().with_tags(labels, mode);
        if filter.tags.is_empty() {
            return Err(ServiceError::not_found(ErrorMessage::NullFields));
        }
        self.search(&filter).await
    }

    /// Find (un)available Offers
    pub async fn find_by_availability(&self, available: bool) -> Result<Vec<Offer>, ServiceError> {
        self.search(&OfferFilter::default().with_availability(available))
            .await
    }

    /// Find Offers whose lowest price lies in `[min, max]`
    pub async fn find_by_price_range(&self, min: f64, max: f64) -> Result<Vec<Offer>, ServiceError> {
        let filter = OfferFilter::default().with_price_range(Some(min), Some(max));
        filter
            .validate()
            .map_err(ServiceError::wrap(ServiceError::not_found, ErrorMessage::NotFound))?;
        self.search(&filter).await
    }

    /// Find Offers matching a client-supplied filter map (intersection)
    pub async fn find_filtered_offers(
        &self,
        filter: &HashMap<String, String>,
    ) -> Result<Vec<Offer>, ServiceError> {
        let filter = OfferFilter::from_map(filter)
            .map_err(ServiceError::wrap(ServiceError::not_found, ErrorMessage::NotFound))?;
        self.search(&filter).await
    }

    /// Set the availability flag of an Offer
    pub async fn set_availability(&self, id: i64, available: bool) -> Result<Offer, ServiceError> {
        let updated = self
            .modify(id, ServiceError::not_updated, ErrorMessage::NotUpdated, |offer| {
                offer.available = available;
                Ok(())
            })
            .await?;

        tracing::info!("Offer {} availability set to {}", id, available);
        Ok(updated)
    }

    /// Append a price to an Offer
    pub async fn add_price(&self, id: i64, amount: f64) -> Result<Offer, ServiceError> {
        ensure_amount(amount, ErrorMessage::NotAdded)?;

        self.modify(id, ServiceError::not_updated, ErrorMessage::NotAdded, |offer| {
            offer.prices.push(Price::new(amount));
            Ok(())
        })
        .await
    }

    /// Change the latest price of an Offer, adding one if it has none
    pub async fn change_price(&self, id: i64, amount: f64) -> Result<Offer, ServiceError> {
        ensure_amount(amount, ErrorMessage::NotUpdated)?;

        self.modify(id, ServiceError::not_updated, ErrorMessage::NotUpdated, |offer| {
            match offer.prices.iter_mut().max_by_key(|p| p.id) {
                Some(latest) => latest.amount = amount,
                None => offer.prices.push(Price::new(amount)),
            }
            Ok(())
        })
        .await
    }

    /// Link an existing Tag to an Offer (no-op when already linked)
    pub async fn add_tag(&self, id: i64, tag_id: i64) -> Result<Offer, ServiceError> {
        let wrap = ServiceError::wrap(ServiceError::not_updated, ErrorMessage::NotAdded);
        let tag = self
            .tags
            .read(tag_id)
            .await
            .map_err(&wrap)?
            .ok_or_else(|| wrap(DomainError::not_found("Tag", tag_id)))?;

        self.modify(id, ServiceError::not_updated, ErrorMessage::NotAdded, |offer| {
            if !offer.has_tag(tag.id) {
                offer.tags.push(tag);
            }
            Ok(())
        })
        .await
    }

    /// Unlink a Tag from an Offer
    pub async fn remove_tag(&self, id: i64, tag_id: i64) -> Result<Offer, ServiceError> {
        self.modify(id, ServiceError::not_deleted, ErrorMessage::NotDeleted, |offer| {
            if !offer.has_tag(tag_id) {
                return Err(ServiceError::not_deleted(ErrorMessage::NotFound)
                    .because(DomainError::not_found("Tag", tag_id)));
            }
            offer.tags.retain(|t| t.id != tag_id);
            Ok(())
        })
        .await
    }

    /// Put an Offer into an existing Category
    pub async fn add_category(&self, id: i64, category_id: i64) -> Result<Offer, ServiceError> {
        let wrap = ServiceError::wrap(ServiceError::not_updated, ErrorMessage::NotAdded);
        let category = self
            .categories
            .read(category_id)
            .await
            .map_err(&wrap)?
            .ok_or_else(|| wrap(DomainError::not_found("Category", category_id)))?;

        self.modify(id, ServiceError::not_updated, ErrorMessage::NotAdded, |offer| {
            offer.category = Some(category);
            Ok(())
        })
        .await
    }

    /// Detach an Offer from its Category.
    ///
    /// When `category_id` is given it must name the offer's current category.
    pub async fn remove_category(
        &self,
        id: i64,
        category_id: Option<i64>,
    ) -> Result<Offer, ServiceError> {
        self.modify(id, ServiceError::not_deleted, ErrorMessage::NotDeleted, |offer| {
            let current = offer.category_id();
            let missing = match (current, category_id) {
                (None, Some(requested)) => Some(DomainError::not_found("Category", requested)),
                (None, None) => Some(DomainError::not_found_str("Category", "<none assigned>")),
                (Some(actual), Some(requested)) if actual != requested => {
                    Some(DomainError::not_found("Category", requested))
                }
                _ => None,
            };
            if let Some(cause) = missing {
                return Err(ServiceError::not_deleted(ErrorMessage::NotFound).because(cause));
            }
            offer.category = None;
            Ok(())
        })
        .await
    }

    async fn search(&self, filter: &OfferFilter) -> Result<Vec<Offer>, ServiceError> {
        self.offers
            .find_filtered(filter)
            .await
            .map_err(ServiceError::wrap(ServiceError::not_found, ErrorMessage::NotFound))
    }

    /// Read-modify-write of one offer
    async fn modify<F>(
        &self,
        id: i64,
        kind: fn(ErrorMessage) -> ServiceError,
        fallback: ErrorMessage,
        change: F,
    ) -> Result<Offer, ServiceError>
    where
        F: FnOnce(&mut Offer) -> Result<(), ServiceError> + Send,
    {
        let wrap = ServiceError::wrap(kind, fallback);

        let mut offer = self
            .offers
            .read(id)
            .await
            .map_err(&wrap)?
            .ok_or_else(|| wrap(DomainError::not_found("Offer", id)))?;

        change(&mut offer)?;

        self.offers
            .update(&offer)
            .await
            .map_err(&wrap)?
            .ok_or_else(|| wrap(DomainError::not_found("Offer", id)))
    }

    /// Referenced category and tags must exist
    async fn check_references(&self, offer: &Offer) -> Result<(), DomainError> {
        if let Some(category_id) = offer.category_id() {
            if !self.categories.exists(category_id).await? {
                return Err(DomainError::not_found("Category", category_id));
            }
        }
        for tag_id in offer.tag_ids() {
            if !self.tags.exists(tag_id).await? {
                return Err(DomainError::not_found("Tag", tag_id));
            }
        }
        Ok(())
    }
}

fn validate_prices(offer: &Offer) -> Result<(), DomainError> {
    match offer
        .prices
        .iter()
        .find(|p| !Price::is_valid_amount(p.amount))
    {
        Some(bad) => Err(DomainError::Validation(format!(
            "price amount must be a non-negative number, got {}",
            bad.amount
        ))),
        None => Ok(()),
    }
}

fn ensure_amount(amount: f64, message: ErrorMessage) -> Result<(), ServiceError> {
    if Price::is_valid_amount(amount) {
        Ok(())
    } else {
        Err(ServiceError::not_updated(message).because(DomainError::Validation(format!(
            "price amount must be a non-negative number, got {}",
            amount
        ))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryCatalog;
    use storefront::{Category, Repository, Tag};

    struct Fixture {
        catalog: MemoryCatalog,
        service: OfferService,
    }

    fn fixture() -> Fixture {
        let catalog = MemoryCatalog::new();
        let service = OfferService::new(
            Arc::new(catalog.offers()),
            Arc::new(catalog.categories()),
            Arc::new(catalog.tags()),
        );
        Fixture { catalog, service }
    }

    fn offer(name: &str, available: bool, prices: &[f64]) -> Offer {
        let mut offer = Offer::new(name.to_string(), None, available);
        offer.prices = prices.iter().map(|a| Price::new(*a)).collect();
        offer
    }

    async fn tag(fx: &Fixture, label: &str) -> Tag {
        fx.catalog
            .tags()
            .create(&Tag::new(label.to_string()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_then_read_round_trip() {
        let fx = fixture();
        let created = fx
            .service
            .create_offer(offer("Pen", false, &[1.5]))
            .await
            .unwrap();

        let read = fx.service.find_by_id(created.id).await.unwrap();
        assert_eq!(read, created);
        assert_eq!(read.name, "Pen");
    }

    #[tokio::test]
    async fn test_create_with_empty_name_touches_nothing() {
        let fx = fixture();
        let err = fx
            .service
            .create_offer(offer("   ", true, &[]))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::NotCreated { .. }));
        assert_eq!(err.message(), ErrorMessage::NullFields);
        assert!(fx.service.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_with_unknown_tag_is_not_found() {
        let fx = fixture();
        let mut draft = offer("Pen", true, &[]);
        draft.tags = vec![Tag {
            id: 99,
            label: "ghost".to_string(),
        }];

        let err = fx.service.create_offer(draft).await.unwrap_err();
        assert!(err.is_missing_entity());
        assert!(!err.is_store_failure());
    }

    #[tokio::test]
    async fn test_update_missing_offer_leaves_store_unchanged() {
        let fx = fixture();
        let existing = fx
            .service
            .create_offer(offer("Pen", true, &[]))
            .await
            .unwrap();

        let mut ghost = offer("Ghost", true, &[]);
        ghost.id = existing.id + 100;
        let err = fx.service.update_offer(ghost).await.unwrap_err();

        assert!(matches!(err, ServiceError::NotUpdated { .. }));
        assert_eq!(err.message(), ErrorMessage::NotFound);
        assert_eq!(fx.service.find_all().await.unwrap(), vec![existing]);
    }

    #[tokio::test]
    async fn test_update_replaces_whole_offer() {
        let fx = fixture();
        let created = fx
            .service
            .create_offer(offer("Pen", true, &[1.0, 2.0]))
            .await
            .unwrap();

        let replacement = Offer {
            name: "Fountain pen".to_string(),
            description: Some("Steel nib".to_string()),
            prices: vec![created.prices[1].clone()],
            ..created.clone()
        };
        let updated = fx.service.update_offer(replacement).await.unwrap();

        assert_eq!(updated.name, "Fountain pen");
        assert_eq!(updated.prices, vec![created.prices[1].clone()]);
    }

    #[tokio::test]
    async fn test_update_with_empty_name_is_null_fields() {
        let fx = fixture();
        let created = fx
            .service
            .create_offer(offer("Pen", true, &[]))
            .await
            .unwrap();

        let err = fx
            .service
            .update_offer(Offer {
                name: String::new(),
                ..created
            })
            .await
            .unwrap_err();
        assert_eq!(err.message(), ErrorMessage::NullFields);
    }

    #[tokio::test]
    async fn test_delete_then_read_is_absent() {
        let fx = fixture();
        let created = fx
            .service
            .create_offer(offer("Pen", true, &[]))
            .await
            .unwrap();

        fx.service.delete_offer(created.id).await.unwrap();
        let err = fx.service.find_by_id(created.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));

        let again = fx.service.delete_offer(created.id).await.unwrap_err();
        assert!(matches!(again, ServiceError::NotDeleted { .. }));
        assert!(again.is_missing_entity());
    }

    #[tokio::test]
    async fn test_set_availability() {
        let fx = fixture();
        let created = fx
            .service
            .create_offer(offer("Pen", false, &[]))
            .await
            .unwrap();

        fx.service.set_availability(created.id, true).await.unwrap();
        assert!(fx.service.find_by_id(created.id).await.unwrap().available);

        let available = fx.service.find_by_availability(true).await.unwrap();
        assert_eq!(available.len(), 1);
        assert!(fx.service.find_by_availability(false).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_and_change_price() {
        let fx = fixture();
        let created = fx
            .service
            .create_offer(offer("Pen", true, &[]))
            .await
            .unwrap();

        let changed = fx.service.change_price(created.id, 3.0).await.unwrap();
        assert_eq!(changed.prices.len(), 1);

        let added = fx.service.add_price(created.id, 5.0).await.unwrap();
        assert_eq!(added.prices.len(), 2);

        let changed = fx.service.change_price(created.id, 4.0).await.unwrap();
        let amounts: Vec<f64> = changed.prices.iter().map(|p| p.amount).collect();
        assert_eq!(amounts, vec![3.0, 4.0]);

        let err = fx.service.add_price(created.id, -1.0).await.unwrap_err();
        assert!(err.is_invalid_request());
    }

    #[tokio::test]
    async fn test_price_range_is_inclusive() {
        let fx = fixture();
        for (name, price) in [("a", 4.99), ("b", 5.0), ("c", 7.5), ("d", 10.0), ("e", 10.01)] {
            fx.service
                .create_offer(offer(name, true, &[price]))
                .await
                .unwrap();
        }
        fx.service.create_offer(offer("f", true, &[])).await.unwrap();

        let names: Vec<String> = fx
            .service
            .find_by_price_range(5.0, 10.0)
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.name)
            .collect();
        assert_eq!(names, vec!["b", "c", "d"]);

        let err = fx.service.find_by_price_range(10.0, 5.0).await.unwrap_err();
        assert!(err.is_invalid_request());
    }

    #[tokio::test]
    async fn test_price_range_rejects_nan_bound() {
        let fx = fixture();
        fx.service
            .create_offer(offer("cheap", true, &[3.0]))
            .await
            .unwrap();

        let err = fx
            .service
            .find_by_price_range(f64::NAN, 10.0)
            .await
            .unwrap_err();
        assert!(err.is_invalid_request());
    }

    #[tokio::test]
    async fn test_add_and_remove_tag() {
        let fx = fixture();
        let sale = tag(&fx, "sale").await;
        let created = fx
            .service
            .create_offer(offer("Pen", true, &[]))
            .await
            .unwrap();

        fx.service.add_tag(created.id, sale.id).await.unwrap();
        let twice = fx.service.add_tag(created.id, sale.id).await.unwrap();
        assert_eq!(twice.tags, vec![sale.clone()]);

        let found = fx
            .service
            .find_by_tags(&["sale".to_string()], TagMatchMode::All)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);

        let removed = fx.service.remove_tag(created.id, sale.id).await.unwrap();
        assert!(removed.tags.is_empty());

        let err = fx.service.remove_tag(created.id, sale.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotDeleted { .. }));
        assert!(err.is_missing_entity());

        let err = fx.service.add_tag(created.id, 999).await.unwrap_err();
        assert!(err.is_missing_entity());
    }

    #[tokio::test]
    async fn test_add_and_remove_category() {
        let fx = fixture();
        let books = fx
            .catalog
            .categories()
            .create(&Category::new("books".to_string()))
            .await
            .unwrap();
        let created = fx
            .service
            .create_offer(offer("Novel", true, &[]))
            .await
            .unwrap();

        let with = fx.service.add_category(created.id, books.id).await.unwrap();
        assert_eq!(with.category, Some(books.clone()));

        let err = fx
            .service
            .remove_category(created.id, Some(books.id + 1))
            .await
            .unwrap_err();
        assert!(err.is_missing_entity());

        let without = fx
            .service
            .remove_category(created.id, Some(books.id))
            .await
            .unwrap();
        assert_eq!(without.category, None);

        let err = fx.service.remove_category(created.id, None).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotDeleted { .. }));
    }

    #[tokio::test]
    async fn test_filtered_offers_intersect() {
        let fx = fixture();
        let sale = tag(&fx, "sale").await;

        let mut cheap_sale = offer("cheap-sale", true, &[12.0]);
        cheap_sale.tags = vec![sale.clone()];
        let mut pricey_sale = offer("pricey-sale", true, &[25.0]);
        pricey_sale.tags = vec![sale];

        fx.service.create_offer(cheap_sale).await.unwrap();
        fx.service.create_offer(pricey_sale).await.unwrap();
        fx.service
            .create_offer(offer("cheap-plain", true, &[15.0]))
            .await
            .unwrap();

        let everything = fx.service.find_filtered_offers(&HashMap::new()).await.unwrap();
        assert_eq!(everything, fx.service.find_all().await.unwrap());

        let filter: HashMap<String, String> = [
            ("minPrice", "10"),
            ("maxPrice", "20"),
            ("tags", "sale"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let names: Vec<String> = fx
            .service
            .find_filtered_offers(&filter)
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.name)
            .collect();
        assert_eq!(names, vec!["cheap-sale"]);
    }
}
