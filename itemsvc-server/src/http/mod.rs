//! HTTP server layer
//!
//! Axum server with:
//! - `GET /` greeting and `GET /items`
//! - Configurable CORS (off / allow-all / single origin)
//! - Request tracing and logging
//! - Panics mapped to a plain 500
//! - Graceful shutdown

pub mod error;
pub mod pipeline;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerError};
