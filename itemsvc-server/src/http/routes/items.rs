//! Items endpoint
//!
//! The whole table on every call, unpaged and unsorted.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::store::Item;

/// GET /items
async fn list_items(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Item>>, ApiError> {
    let items = state.store.fetch_items().await?;
    Ok(Json(items))
}

/// Item routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/items", get(list_items))
}
