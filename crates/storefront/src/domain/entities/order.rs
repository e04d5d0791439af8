//! Order - Customer order with its items
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order - inventory aggregate root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub name: String,
    pub customer_email: String,
    pub description: Option<String>,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Line of an order, owned by exactly one order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
}

impl Order {
    /// Create a new Order with timestamps (id is assigned by the store)
    pub fn new(name: String, customer_email: String, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name,
            customer_email,
            description,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Position of the item matching `probe`: by id when it carries one,
    /// otherwise by name.
    pub fn position_of(&self, probe: &OrderItem) -> Option<usize> {
        if probe.id > 0 {
            self.items.iter().position(|i| i.id == probe.id)
        } else {
            self.items.iter().position(|i| i.name == probe.name)
        }
    }
}

impl OrderItem {
    pub fn new(name: String, description: Option<String>, quantity: i32) -> Self {
        Self {
            id: 0,
            name,
            description,
            quantity,
        }
    }
}
