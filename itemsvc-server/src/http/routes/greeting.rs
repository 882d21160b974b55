//! Greeting endpoint

use std::sync::Arc;

use axum::{extract::State, routing::get, Router};

use crate::http::server::AppState;

/// GET /
async fn greeting(State(state): State<Arc<AppState>>) -> String {
    state.greeting.clone()
}

/// Greeting routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(greeting))
}
