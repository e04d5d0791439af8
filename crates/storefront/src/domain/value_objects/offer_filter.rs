//! OfferFilter - Dynamic predicate over offer attributes
//!
//! Every populated field narrows the result (intersection). An empty filter
//! matches every offer.

use std::collections::HashMap;

use crate::domain::entities::Offer;
use crate::domain::errors::DomainError;

use super::TagMatchMode;

pub const KEY_NAME: &str = "name";
pub const KEY_MIN_PRICE: &str = "minPrice";
pub const KEY_MAX_PRICE: &str = "maxPrice";
pub const KEY_CATEGORY: &str = "category";
pub const KEY_TAGS: &str = "tags";
pub const KEY_TAGS_MATCH: &str = "tagsMatch";
pub const KEY_AVAILABILITY: &str = "availability";

/// Search filter for offer queries
#[derive(Debug, Default, Clone, PartialEq)]
pub struct OfferFilter {
    /// Exact offer name
    pub name: Option<String>,
    /// Lower bound (inclusive) on the offer's lowest price
    pub min_price: Option<f64>,
    /// Upper bound (inclusive) on the offer's lowest price
    pub max_price: Option<f64>,
    /// Exact category name
    pub category: Option<String>,
    /// Tag labels, deduplicated
    pub tags: Vec<String>,
    /// Tag matching mode
    pub tags_match_mode: TagMatchMode,
    /// Availability flag
    pub available: Option<bool>,
}

impl OfferFilter {
    /// Build a filter from the string-keyed map sent by clients.
    ///
    /// Blank values are ignored; unknown keys and unparsable values are
    /// rejected.
    pub fn from_map(map: &HashMap<String, String>) -> Result<Self, DomainError> {
        let mut filter = Self::default();

        for (key, raw) in map {
            let value = raw.trim();
            if value.is_empty() {
                continue;
            }

            match key.as_str() {
                KEY_NAME => filter.name = Some(value.to_string()),
                KEY_MIN_PRICE => filter.min_price = Some(parse_price(key, value)?),
                KEY_MAX_PRICE => filter.max_price = Some(parse_price(key, value)?),
                KEY_CATEGORY => filter.category = Some(value.to_string()),
                KEY_TAGS => filter.tags = split_labels(value),
                KEY_TAGS_MATCH => {
                    filter.tags_match_mode = value.parse().map_err(DomainError::Validation)?
                }
                KEY_AVAILABILITY => {
                    filter.available = Some(value.parse().map_err(|_| {
                        DomainError::Validation(format!(
                            "{} must be true or false, got '{}'",
                            key, value
                        ))
                    })?)
                }
                other => {
                    return Err(DomainError::Validation(format!(
                        "Unknown filter key: {}",
                        other
                    )))
                }
            }
        }

        filter.validate()?;
        Ok(filter)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_tags(mut self, labels: &[String], mode: TagMatchMode) -> Self {
        self.tags = dedup_labels(labels.iter().map(|l| l.trim().to_string()));
        self.tags_match_mode = mode;
        self
    }

    pub fn with_availability(mut self, available: bool) -> Self {
        self.available = Some(available);
        self
    }

    /// Reject non-numeric or contradictory bounds
    pub fn validate(&self) -> Result<(), DomainError> {
        for bound in [self.min_price, self.max_price].into_iter().flatten() {
            if !bound.is_finite() {
                return Err(DomainError::Validation(format!(
                    "price bound must be a finite number, got {}",
                    bound
                )));
            }
        }
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(DomainError::Validation(format!(
                    "minimum price {} exceeds maximum price {}",
                    min, max
                )));
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.category.is_none()
            && self.tags.is_empty()
            && self.available.is_none()
    }

    /// Evaluate the filter against a fully loaded offer
    pub fn matches(&self, offer: &Offer) -> bool {
        if let Some(name) = &self.name {
            if &offer.name != name {
                return false;
            }
        }

        if self.min_price.is_some() || self.max_price.is_some() {
            let Some(lowest) = offer.lowest_price() else {
                return false;
            };
            if self.min_price.is_some_and(|min| lowest < min) {
                return false;
            }
            if self.max_price.is_some_and(|max| lowest > max) {
                return false;
            }
        }

        if let Some(category) = &self.category {
            match &offer.category {
                Some(c) if &c.name == category => {}
                _ => return false,
            }
        }

        if !self.tags.is_empty() {
            let hit = |label: &String| offer.has_tag_label(label);
            let ok = match self.tags_match_mode {
                TagMatchMode::All => self.tags.iter().all(hit),
                TagMatchMode::Any => self.tags.iter().any(hit),
            };
            if !ok {
                return false;
            }
        }

        if let Some(available) = self.available {
            if offer.available != available {
                return false;
            }
        }

        true
    }
}

/// Split a comma-separated tag list, trimming and dropping blanks
pub fn split_labels(raw: &str) -> Vec<String> {
    dedup_labels(raw.split(',').map(|s| s.trim().to_string()))
}

fn dedup_labels(labels: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for label in labels {
        if !label.is_empty() && !out.contains(&label) {
            out.push(label);
        }
    }
    out
}

fn parse_price(key: &str, value: &str) -> Result<f64, DomainError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DomainError::Validation(format!("{} must be a number, got '{}'", key, value)))
}
