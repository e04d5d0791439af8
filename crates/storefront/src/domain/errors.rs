//! Domain Errors
//!
//! Error types for domain and service operations.

use thiserror::Error;

use crate::domain::value_objects::ErrorMessage;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any failure reported by the backing store
    #[error("Store failure: {0}")]
    Store(String),
}

impl DomainError {
    pub fn not_found<T: AsRef<str>>(entity_type: T, id: i64) -> Self {
        Self::NotFound {
            entity_type: entity_type.as_ref().to_string(),
            id: id.to_string(),
        }
    }

    pub fn not_found_str<T: AsRef<str>>(entity_type: T, id: &str) -> Self {
        Self::NotFound {
            entity_type: entity_type.as_ref().to_string(),
            id: id.to_string(),
        }
    }

    pub fn store<E: std::fmt::Display>(err: E) -> Self {
        Self::Store(err.to_string())
    }

    pub fn is_store_failure(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

/// Outcome kinds raised by the service layer.
///
/// The public-facing `message` travels next to the `cause` that produced it,
/// so the HTTP layer can report the kind while logs keep the root cause.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not created ({message})")]
    NotCreated {
        message: ErrorMessage,
        #[source]
        cause: Option<DomainError>,
    },

    #[error("not found ({message})")]
    NotFound {
        message: ErrorMessage,
        #[source]
        cause: Option<DomainError>,
    },

    #[error("not updated ({message})")]
    NotUpdated {
        message: ErrorMessage,
        #[source]
        cause: Option<DomainError>,
    },

    #[error("not deleted ({message})")]
    NotDeleted {
        message: ErrorMessage,
        #[source]
        cause: Option<DomainError>,
    },
}

impl ServiceError {
    pub fn not_created(message: ErrorMessage) -> Self {
        Self::NotCreated {
            message,
            cause: None,
        }
    }

    pub fn not_found(message: ErrorMessage) -> Self {
        Self::NotFound {
            message,
            cause: None,
        }
    }

    pub fn not_updated(message: ErrorMessage) -> Self {
        Self::NotUpdated {
            message,
            cause: None,
        }
    }

    pub fn not_deleted(message: ErrorMessage) -> Self {
        Self::NotDeleted {
            message,
            cause: None,
        }
    }

    /// Attach the underlying cause
    pub fn because(self, err: DomainError) -> Self {
        match self {
            Self::NotCreated { message, .. } => Self::NotCreated {
                message,
                cause: Some(err),
            },
            Self::NotFound { message, .. } => Self::NotFound {
                message,
                cause: Some(err),
            },
            Self::NotUpdated { message, .. } => Self::NotUpdated {
                message,
                cause: Some(err),
            },
            Self::NotDeleted { message, .. } => Self::NotDeleted {
                message,
                cause: Some(err),
            },
        }
    }

    /// Adapter for `map_err`: wrap a domain error into `kind`, reporting
    /// NOT_FOUND when the cause is a missing entity and `fallback` otherwise.
    pub fn wrap(
        kind: fn(ErrorMessage) -> ServiceError,
        fallback: ErrorMessage,
    ) -> impl Fn(DomainError) -> ServiceError {
        move |err| {
            let message = match &err {
                DomainError::NotFound { .. } => ErrorMessage::NotFound,
                _ => fallback,
            };
            kind(message).because(err)
        }
    }

    /// Short name of the kind, as reported to clients
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotCreated { .. } => "NOT_CREATED",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::NotUpdated { .. } => "NOT_UPDATED",
            Self::NotDeleted { .. } => "NOT_DELETED",
        }
    }

    pub fn message(&self) -> ErrorMessage {
        match self {
            Self::NotCreated { message, .. }
            | Self::NotFound { message, .. }
            | Self::NotUpdated { message, .. }
            | Self::NotDeleted { message, .. } => *message,
        }
    }

    pub fn cause(&self) -> Option<&DomainError> {
        match self {
            Self::NotCreated { cause, .. }
            | Self::NotFound { cause, .. }
            | Self::NotUpdated { cause, .. }
            | Self::NotDeleted { cause, .. } => cause.as_ref(),
        }
    }

    pub fn is_store_failure(&self) -> bool {
        self.cause().is_some_and(DomainError::is_store_failure)
    }

    /// True when the request failed because an entity does not exist
    pub fn is_missing_entity(&self) -> bool {
        matches!(self, Self::NotFound { .. })
            || self.message() == ErrorMessage::NotFound
            || matches!(self.cause(), Some(DomainError::NotFound { .. }))
    }

    /// True when the store rejected a duplicate
    pub fn is_conflict(&self) -> bool {
        matches!(self.cause(), Some(DomainError::Conflict(_)))
    }

    /// True when the request itself was malformed
    pub fn is_invalid_request(&self) -> bool {
        self.message() == ErrorMessage::NullFields
            || matches!(self.cause(), Some(DomainError::Validation(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_cause_is_preserved_as_source() {
        let err = ServiceError::not_updated(ErrorMessage::NotUpdated)
            .because(DomainError::store("connection reset"));

        assert!(err.is_store_failure());
        assert_eq!(err.message(), ErrorMessage::NotUpdated);
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("Store failure: connection reset".to_string())
        );
    }

    #[test]
    fn test_wrap_picks_message_from_cause() {
        let wrap = ServiceError::wrap(ServiceError::not_updated, ErrorMessage::NotAdded);

        let missing = wrap(DomainError::not_found("Tag", 3));
        assert!(matches!(missing, ServiceError::NotUpdated { .. }));
        assert_eq!(missing.message(), ErrorMessage::NotFound);

        let store = wrap(DomainError::store("deadlock detected"));
        assert_eq!(store.message(), ErrorMessage::NotAdded);
        assert!(store.is_store_failure());
    }

    #[test]
    fn test_missing_entity_classification() {
        let by_kind = ServiceError::not_found(ErrorMessage::NotFound);
        let by_cause = ServiceError::not_deleted(ErrorMessage::NotDeleted)
            .because(DomainError::not_found("Offer", 7));
        let neither = ServiceError::not_created(ErrorMessage::NullFields);

        assert!(by_kind.is_missing_entity());
        assert!(by_cause.is_missing_entity());
        assert!(!neither.is_missing_entity());
        assert!(neither.is_invalid_request());
    }
}
