//! itemsvc-server: read-only HTTP view over the `items` table
//!
//! Serves a greeting on `/` and the full contents of `items` on `/items`,
//! with a configurable cross-origin policy. The store is injected through
//! the [`store::ItemStore`] trait so handlers never touch a global handle.

pub mod config;
pub mod http;
pub mod store;

pub use config::{ConfigError, CorsMode, ServerConfig, StoreConfig};
pub use http::{build_router, run_server, AppState, ServerError};
pub use store::{Item, ItemStore, StoreError};
