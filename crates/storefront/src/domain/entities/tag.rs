//! Tag - Label shared by many offers

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub label: String,
}

impl Tag {
    pub fn new(label: String) -> Self {
        Self { id: 0, label }
    }
}
