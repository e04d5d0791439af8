//! Price - Amount attached to an Offer

use serde::{Deserialize, Serialize};

/// Price owned by exactly one offer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub id: i64,
    pub amount: f64,
}

impl Price {
    pub fn new(amount: f64) -> Self {
        Self { id: 0, amount }
    }

    /// Prices must be finite and non-negative
    pub fn is_valid_amount(amount: f64) -> bool {
        amount.is_finite() && amount >= 0.0
    }
}
