//! HTTP error mapping
//!
//! Translates service outcomes into status codes and JSON bodies.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{ErrorMessage, ServiceError};

/// Error body returned by every endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Outcome kind (NOT_CREATED, NOT_FOUND, NOT_UPDATED, NOT_DELETED), or
    /// INVALID_REQUEST when the path, query or body could not be read
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<ErrorMessage>,
    /// Root cause, when one is known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// HTTP representation of a failed request
#[derive(Debug)]
pub enum ApiError {
    /// The service ran and reported an outcome
    Service(ServiceError),
    /// The request never reached the service
    Rejected { status: StatusCode, detail: String },
}

impl ApiError {
    pub fn rejected(status: StatusCode, detail: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            detail: detail.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        let err = match self {
            Self::Service(err) => err,
            Self::Rejected { status, .. } => return *status,
        };
        if err.is_store_failure() {
            StatusCode::INTERNAL_SERVER_ERROR
        } else if err.is_conflict() {
            StatusCode::CONFLICT
        } else if err.is_invalid_request() {
            StatusCode::BAD_REQUEST
        } else if err.is_missing_entity() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            Self::Service(err) => ErrorBody {
                error: err.kind().to_string(),
                message: Some(err.message()),
                detail: err.cause().map(|c| c.to_string()),
            },
            Self::Rejected { detail, .. } => ErrorBody {
                error: "INVALID_REQUEST".to_string(),
                message: None,
                detail: Some(detail.clone()),
            },
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self::Service(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = self.body();

        match &self {
            Self::Service(err) if status.is_server_error() => {
                tracing::error!(kind = err.kind(), cause = ?body.detail, "Request failed: {}", err);
            }
            Self::Service(err) => {
                tracing::warn!(kind = err.kind(), cause = ?body.detail, "Request rejected: {}", err);
            }
            Self::Rejected { detail, .. } => {
                tracing::warn!(status = status.as_u16(), "Malformed request: {}", detail);
            }
        }

        (status, Json(body)).into_response()
    }
}
