//! ErrorMessage - Public-facing reason attached to service errors

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorMessage {
    NullFields,
    NotFound,
    NotUpdated,
    NotDeleted,
    NotAdded,
}

impl std::fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorMessage::NullFields => write!(f, "NULL_FIELDS"),
            ErrorMessage::NotFound => write!(f, "NOT_FOUND"),
            ErrorMessage::NotUpdated => write!(f, "NOT_UPDATED"),
            ErrorMessage::NotDeleted => write!(f, "NOT_DELETED"),
            ErrorMessage::NotAdded => write!(f, "NOT_ADDED"),
        }
    }
}
