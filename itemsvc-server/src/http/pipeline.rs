//! Request pipeline
//!
//! Layers wrapped around the router, outermost first:
//!
//! 1. panic catcher - maps a panic to `500 Something broke!`
//! 2. trace span    - pass-through
//! 3. CORS          - answers preflight itself; absent when CORS is off
//! 4. request log   - pass-through
//!
//! `Router::layer` wraps whatever is already there, so [`apply`] adds them
//! innermost first.

use std::any::Any;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use crate::config::CorsMode;

/// Wrap `router` in the full pipeline.
pub fn apply<S>(router: Router<S>, cors: &CorsMode) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let mut router = router.layer(middleware::from_fn(log_request));

    if let Some(cors) = cors_layer(cors) {
        router = router.layer(cors);
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
}

/// The CORS layer for `mode`, `None` when CORS is off.
pub fn cors_layer(mode: &CorsMode) -> Option<CorsLayer> {
    let origin = match mode {
        CorsMode::Off => return None,
        CorsMode::AllowAll => AllowOrigin::any(),
        // `list` rejects a wildcard entry
        CorsMode::AllowOrigin(origin) if origin == "*" => AllowOrigin::any(),
        // Unlike `exact`, `list` omits the header for non-matching origins
        CorsMode::AllowOrigin(origin) => AllowOrigin::list([origin.clone()]),
    };

    Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(AnyOrigin)
            .allow_headers(AnyOrigin),
    )
}

async fn log_request(request: Request, next: Next) -> Response {
    tracing::info!(
        method = %request.method(),
        path = %request.uri().path(),
        "request received"
    );
    next.run(request).await
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };

    ApiError::Internal { message }.into_response()
}
