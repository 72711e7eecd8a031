//! Error types for the gateway
//!
//! `GatewayError` is what callers see. `CacheError` only travels between a
//! cache backend and the `CacheStore` facade, which absorbs it.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Gateway Error Enum ==
/// Unified caller-visible error type.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Upstream credential is missing; no network call was made
    #[error("{0}")]
    NotConfigured(String),

    /// Timeout, connection error or non-2xx from an upstream API
    #[error("Failed to fetch {subject}: {cause}")]
    UpstreamFailed { subject: String, cause: String },

    /// A primary object in an upstream payload is structurally invalid
    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// True for the "service unavailable" class: missing credentials and
    /// failed upstream fetches.
    pub fn is_service_unavailable(&self) -> bool {
        matches!(
            self,
            GatewayError::NotConfigured(_) | GatewayError::UpstreamFailed { .. }
        )
    }

    fn status(&self) -> StatusCode {
        match self {
            GatewayError::NotConfigured(_) | GatewayError::UpstreamFailed { .. } => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            GatewayError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Cache Error Enum ==
/// Failure inside a single cache backend.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The backend rejected or failed the operation
    #[error("Cache backend error: {0}")]
    Backend(String),

    /// The backend did not answer in time
    #[error("Cache backend timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        CacheError::Backend(err.to_string())
    }
}

// == Result Type Aliases ==
/// Convenience Result type for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Result type for cache backend operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;
