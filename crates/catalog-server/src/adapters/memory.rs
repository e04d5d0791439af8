//! In-memory catalog store
//!
//! Id-indexed tables with explicit foreign keys, mirroring the Postgres
//! schema: unique category names and tag labels, cascading deletes of
//! prices and tag links, `SET NULL` on category removal.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use storefront::{
    Category, CategoryRepository, DomainError, Offer, OfferFilter, OfferRepository, Price,
    Repository, Tag, TagRepository,
};

#[derive(Debug, Clone)]
struct OfferRecord {
    id: i64,
    name: String,
    description: Option<String>,
    available: bool,
    category_id: Option<i64>,
}

#[derive(Debug, Clone)]
struct PriceRecord {
    offer_id: i64,
    amount: f64,
}

#[derive(Debug, Default)]
struct Sequences {
    offer: i64,
    price: i64,
    category: i64,
    tag: i64,
}

fn next(seq: &mut i64) -> i64 {
    *seq += 1;
    *seq
}

#[derive(Debug, Default)]
struct CatalogTables {
    seq: Sequences,
    offers: BTreeMap<i64, OfferRecord>,
    prices: BTreeMap<i64, PriceRecord>,
    categories: BTreeMap<i64, Category>,
    tags: BTreeMap<i64, Tag>,
    /// (offer_id, tag_id)
    offer_tags: BTreeSet<(i64, i64)>,
}

impl CatalogTables {
    fn load(&self, record: &OfferRecord) -> Offer {
        let prices = self
            .prices
            .iter()
            .filter(|(_, p)| p.offer_id == record.id)
            .map(|(id, p)| Price {
                id: *id,
                amount: p.amount,
            })
            .collect();

        let tags = self
            .offer_tags
            .range((record.id, i64::MIN)..=(record.id, i64::MAX))
            .filter_map(|(_, tag_id)| self.tags.get(tag_id).cloned())
            .collect();

        Offer {
            id: record.id,
            name: record.name.clone(),
            description: record.description.clone(),
            available: record.available,
            prices,
            tags,
            category: record
                .category_id
                .and_then(|id| self.categories.get(&id).cloned()),
        }
    }

    /// Foreign key and check constraints for an offer write
    fn check_offer(&self, offer: &Offer) -> Result<(), DomainError> {
        if let Some(category_id) = offer.category_id() {
            if !self.categories.contains_key(&category_id) {
                return Err(DomainError::Store(format!(
                    "foreign key violation: category {} does not exist",
                    category_id
                )));
            }
        }
        for tag_id in offer.tag_ids() {
            if !self.tags.contains_key(&tag_id) {
                return Err(DomainError::Store(format!(
                    "foreign key violation: tag {} does not exist",
                    tag_id
                )));
            }
        }
        if let Some(bad) = offer.prices.iter().find(|p| !Price::is_valid_amount(p.amount)) {
            return Err(DomainError::Store(format!(
                "check violation: price amount {} out of range",
                bad.amount
            )));
        }
        Ok(())
    }

    /// Prices sent with an id must already belong to the offer
    fn check_price_owner(&self, offer: &Offer) -> Result<(), DomainError> {
        let foreign = offer.prices.iter().find(|p| {
            p.id > 0 && self.prices.get(&p.id).map(|r| r.offer_id) != Some(offer.id)
        });
        match foreign {
            Some(price) => Err(DomainError::Validation(format!(
                "price {} does not belong to offer {}",
                price.id, offer.id
            ))),
            None => Ok(()),
        }
    }

    fn write_children(&mut self, offer_id: i64, offer: &Offer) {
        let kept: BTreeSet<i64> = offer
            .prices
            .iter()
            .map(|p| p.id)
            .filter(|id| *id > 0)
            .collect();

        self.prices
            .retain(|id, p| p.offer_id != offer_id || kept.contains(id));

        for price in &offer.prices {
            if price.id > 0 {
                if let Some(existing) = self.prices.get_mut(&price.id) {
                    if existing.offer_id == offer_id {
                        existing.amount = price.amount;
                    }
                }
            } else {
                let id = next(&mut self.seq.price);
                self.prices.insert(
                    id,
                    PriceRecord {
                        offer_id,
                        amount: price.amount,
                    },
                );
            }
        }

        self.offer_tags.retain(|(o, _)| *o != offer_id);
        for tag_id in offer.tag_ids() {
            self.offer_tags.insert((offer_id, tag_id));
        }
    }
}

/// Shared in-memory catalog; hand out per-entity repositories from it
#[derive(Clone, Default)]
pub struct MemoryCatalog {
    tables: Arc<RwLock<CatalogTables>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offers(&self) -> MemoryOfferRepository {
        MemoryOfferRepository {
            tables: self.tables.clone(),
        }
    }

    pub fn categories(&self) -> MemoryCategoryRepository {
        MemoryCategoryRepository {
            tables: self.tables.clone(),
        }
    }

    pub fn tags(&self) -> MemoryTagRepository {
        MemoryTagRepository {
            tables: self.tables.clone(),
        }
    }
}

/// In-memory implementation of OfferRepository
pub struct MemoryOfferRepository {
    tables: Arc<RwLock<CatalogTables>>,
}

/// In-memory implementation of CategoryRepository
pub struct MemoryCategoryRepository {
    tables: Arc<RwLock<CatalogTables>>,
}

/// In-memory implementation of TagRepository
pub struct MemoryTagRepository {
    tables: Arc<RwLock<CatalogTables>>,
}

#[async_trait]
impl Repository<Offer> for MemoryOfferRepository {
    async fn create(&self, offer: &Offer) -> Result<Offer, DomainError> {
        let mut tables = self.tables.write().await;
        tables.check_offer(offer)?;

        let id = next(&mut tables.seq.offer);
        let record = OfferRecord {
            id,
            name: offer.name.clone(),
            description: offer.description.clone(),
            available: offer.available,
            category_id: offer.category_id(),
        };
        tables.offers.insert(id, record.clone());

        let fresh = Offer {
            prices: offer.prices.iter().map(|p| Price::new(p.amount)).collect(),
            ..offer.clone()
        };
        tables.write_children(id, &fresh);

        Ok(tables.load(&record))
    }

    async fn read(&self, id: i64) -> Result<Option<Offer>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.offers.get(&id).map(|r| tables.load(r)))
    }

    async fn update(&self, offer: &Offer) -> Result<Option<Offer>, DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.offers.contains_key(&offer.id) {
            return Ok(None);
        }
        tables.check_offer(offer)?;
        tables.check_price_owner(offer)?;

        let record = OfferRecord {
            id: offer.id,
            name: offer.name.clone(),
            description: offer.description.clone(),
            available: offer.available,
            category_id: offer.category_id(),
        };
        tables.offers.insert(offer.id, record.clone());
        tables.write_children(offer.id, offer);

        Ok(Some(tables.load(&record)))
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        if tables.offers.remove(&id).is_none() {
            return Ok(false);
        }
        tables.prices.retain(|_, p| p.offer_id != id);
        tables.offer_tags.retain(|(o, _)| *o != id);
        Ok(true)
    }
}

#[async_trait]
impl OfferRepository for MemoryOfferRepository {
    async fn find_filtered(&self, filter: &OfferFilter) -> Result<Vec<Offer>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .offers
            .values()
            .map(|r| tables.load(r))
            .filter(|o| filter.matches(o))
            .collect())
    }

    async fn find_by_category(&self, category_id: i64) -> Result<Vec<Offer>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .offers
            .values()
            .filter(|r| r.category_id == Some(category_id))
            .map(|r| tables.load(r))
            .collect())
    }
}

#[async_trait]
impl Repository<Category> for MemoryCategoryRepository {
    async fn create(&self, category: &Category) -> Result<Category, DomainError> {
        let mut tables = self.tables.write().await;
        if tables.categories.values().any(|c| c.name == category.name) {
            return Err(DomainError::Conflict(format!(
                "category name '{}' already exists",
                category.name
            )));
        }

        let id = next(&mut tables.seq.category);
        let stored = Category {
            id,
            name: category.name.clone(),
        };
        tables.categories.insert(id, stored.clone());
        Ok(stored)
    }

    async fn read(&self, id: i64) -> Result<Option<Category>, DomainError> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn update(&self, category: &Category) -> Result<Option<Category>, DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.categories.contains_key(&category.id) {
            return Ok(None);
        }
        if tables
            .categories
            .values()
            .any(|c| c.id != category.id && c.name == category.name)
        {
            return Err(DomainError::Conflict(format!(
                "category name '{}' already exists",
                category.name
            )));
        }
        tables.categories.insert(category.id, category.clone());
        Ok(Some(category.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        if tables.categories.remove(&id).is_none() {
            return Ok(false);
        }
        for offer in tables.offers.values_mut() {
            if offer.category_id == Some(id) {
                offer.category_id = None;
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl CategoryRepository for MemoryCategoryRepository {
    async fn find_all(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self.tables.read().await.categories.values().cloned().collect())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, DomainError> {
        Ok(self
            .tables
            .read()
            .await
            .categories
            .values()
            .find(|c| c.name == name)
            .cloned())
    }
}

#[async_trait]
impl Repository<Tag> for MemoryTagRepository {
    async fn create(&self, tag: &Tag) -> Result<Tag, DomainError> {
        let mut tables = self.tables.write().await;
        if tables.tags.values().any(|t| t.label == tag.label) {
            return Err(DomainError::Conflict(format!(
                "tag label '{}' already exists",
                tag.label
            )));
        }

        let id = next(&mut tables.seq.tag);
        let stored = Tag {
            id,
            label: tag.label.clone(),
        };
        tables.tags.insert(id, stored.clone());
        Ok(stored)
    }

    async fn read(&self, id: i64) -> Result<Option<Tag>, DomainError> {
        Ok(self.tables.read().await.tags.get(&id).cloned())
    }

    async fn update(&self, tag: &Tag) -> Result<Option<Tag>, DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.tags.contains_key(&tag.id) {
            return Ok(None);
        }
        if tables
            .tags
            .values()
            .any(|t| t.id != tag.id && t.label == tag.label)
        {
            return Err(DomainError::Conflict(format!(
                "tag label '{}' already exists",
                tag.label
            )));
        }
        tables.tags.insert(tag.id, tag.clone());
        Ok(Some(tag.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        if tables.tags.remove(&id).is_none() {
            return Ok(false);
        }
        tables.offer_tags.retain(|(_, t)| *t != id);
        Ok(true)
    }
}

#[async_trait]
impl TagRepository for MemoryTagRepository {
    async fn find_all(&self) -> Result<Vec<Tag>, DomainError> {
        Ok(self.tables.read().await.tags.values().cloned().collect())
    }

    async fn find_by_label(&self, label: &str) -> Result<Option<Tag>, DomainError> {
        Ok(self
            .tables
            .read()
            .await
            .tags
            .values()
            .find(|t| t.label == label)
            .cloned())
    }
}
