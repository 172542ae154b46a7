//! Mapping of application errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::foundation::{DomainError, MarketplaceError, ValidationError};

/// Standard error body for every API failure.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable code, e.g. `SLOT_UNAVAILABLE`.
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
        }
    }
}

/// Error returned from every route handler.
#[derive(Debug)]
pub struct ApiError(pub MarketplaceError);

impl From<MarketplaceError> for ApiError {
    fn from(err: MarketplaceError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err.into())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            MarketplaceError::Validation(_) | MarketplaceError::InvalidSignature(_) => StatusCode::BAD_REQUEST,
            MarketplaceError::Unauthenticated => StatusCode::UNAUTHORIZED,
            MarketplaceError::Forbidden(_) => StatusCode::FORBIDDEN,
            MarketplaceError::NotFound { .. } => StatusCode::NOT_FOUND,
            MarketplaceError::Conflict { .. } | MarketplaceError::InvalidState { .. } => StatusCode::CONFLICT,
            MarketplaceError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            MarketplaceError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = ErrorResponse::new(self.0.code().to_string(), self.0.to_string());

        match &self.0 {
            MarketplaceError::Validation(err) => body.field = Some(err.field().to_string()),
            MarketplaceError::Infrastructure(err) => {
                tracing::error!(code = %err.code, error = %err, "Request failed on infrastructure error");
                body.message = "Internal server error".to_string();
            }
            MarketplaceError::Upstream { provider, message, .. } => {
                tracing::warn!(provider = *provider, error = %message, "Upstream provider failure");
            }
            _ => {}
        }

        (status, Json(body)).into_response()
    }
}
