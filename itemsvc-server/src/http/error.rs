//! API error types with IntoResponse
//!
//! Failure bodies are fixed plain-text strings; the underlying cause is
//! only ever logged.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::store::StoreError;

/// Body for a failed `/items` query.
pub const FETCH_ITEMS_FAILED: &str = "Error fetching items";

/// Body for anything that blew up past routing.
pub const INTERNAL_FAILURE: &str = "Something broke!";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Reading `items` failed (500, logged)
    FetchItems(StoreError),

    /// Unhandled failure downstream of routing (500, logged)
    Internal { message: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match &self {
            Self::FetchItems(e) => {
                tracing::error!("Error fetching items: {}", e);
                FETCH_ITEMS_FAILED
            }
            Self::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                INTERNAL_FAILURE
            }
        };

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        Self::FetchItems(e)
    }
}
