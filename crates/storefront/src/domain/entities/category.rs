//! Category - Grouping of offers
//!
//! Offers point at their category; the category's offer list is a lookup,
//! never an owned collection.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

impl Category {
    pub fn new(name: String) -> Self {
        Self { id: 0, name }
    }
}
