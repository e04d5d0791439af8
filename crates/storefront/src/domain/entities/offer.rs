//! Offer - A sellable catalog item
//!
//! The offer is the owning side of its prices and tag links, and holds the
//! foreign key to its category.

use serde::{Deserialize, Serialize};

use super::{Category, Price, Tag};

/// Offer - catalog aggregate root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub available: bool,
    pub prices: Vec<Price>,
    pub tags: Vec<Tag>,
    pub category: Option<Category>,
}

impl Offer {
    /// Create a new, not yet persisted Offer (id is assigned by the store)
    pub fn new(name: String, description: Option<String>, available: bool) -> Self {
        Self {
            id: 0,
            name,
            description,
            available,
            prices: Vec::new(),
            tags: Vec::new(),
            category: None,
        }
    }

    /// Lowest price of the offer, if it has any
    pub fn lowest_price(&self) -> Option<f64> {
        self.prices
            .iter()
            .map(|p| p.amount)
            .fold(None, |acc, amount| match acc {
                Some(min) if min <= amount => Some(min),
                _ => Some(amount),
            })
    }

    pub fn has_tag(&self, tag_id: i64) -> bool {
        self.tags.iter().any(|t| t.id == tag_id)
    }

    pub fn has_tag_label(&self, label: &str) -> bool {
        self.tags.iter().any(|t| t.label == label)
    }

    pub fn category_id(&self) -> Option<i64> {
        self.category.as_ref().map(|c| c.id)
    }

    pub fn tag_ids(&self) -> Vec<i64> {
        self.tags.iter().map(|t| t.id).collect()
    }
}
