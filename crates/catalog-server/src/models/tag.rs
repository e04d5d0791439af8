//! Tag DTOs

use serde::{Deserialize, Serialize};
use storefront::Tag;
use utoipa::ToSchema;

/// Create Tag request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTagRequest {
    #[serde(default)]
    pub label: String,
}

/// Tag response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TagResponse {
    pub id: i64,
    pub label: String,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            label: tag.label,
        }
    }
}
