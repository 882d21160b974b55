//! Axum server setup
//!
//! Server skeleton with:
//! - Store injected through router state
//! - Explicit request pipeline (see [`super::pipeline`])
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use super::{pipeline, routes};
use crate::config::{CorsMode, ServerConfig};
use crate::store::ItemStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ItemStore>,
    /// Body of `GET /`
    pub greeting: String,
}

impl AppState {
    pub fn new(store: Arc<dyn ItemStore>, greeting: impl Into<String>) -> Self {
        Self {
            store,
            greeting: greeting.into(),
        }
    }
}

/// Build the application router with all routes and the request pipeline.
pub fn build_router(state: AppState, cors: &CorsMode) -> Router {
    let routes = Router::new()
        .merge(routes::greeting::router())
        .merge(routes::items::router())
        .fallback(routes::not_found)
        // Known path, wrong method: same 404 as an unknown path
        .method_not_allowed_fallback(routes::not_found)
        .with_state(Arc::new(state));

    pipeline::apply(routes, cors)
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let store = MySqlItemStore::connect(&StoreConfig::default());
/// run_server(Arc::new(store), ServerConfig::default()).await?;
/// ```
pub async fn run_server(
    store: Arc<dyn ItemStore>,
    config: ServerConfig,
) -> Result<(), ServerError> {
    match &config.cors {
        CorsMode::Off => tracing::info!("CORS: disabled"),
        CorsMode::AllowAll => {
            tracing::warn!("CORS: Permissive mode enabled - all origins allowed")
        }
        CorsMode::AllowOrigin(origin) => {
            tracing::info!(origin = ?origin, "CORS: single origin allowed")
        }
    }

    let app = build_router(AppState::new(store, config.greeting), &config.cors);

    // Bind listener
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Backend app listening at http://{}", config.bind_addr);

    // Run with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryItemStore;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn greeting_is_plain_text() {
        let state = AppState::new(Arc::new(MemoryItemStore::default()), "Hello, World!");
        let app = build_router(state, &CorsMode::AllowAll);

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("text/plain"), "{content_type}");

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Hello, World!");
    }

    #[tokio::test]
    async fn bind_conflict_is_io_error() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let config = ServerConfig {
            bind_addr: taken.local_addr().unwrap(),
            ..ServerConfig::default()
        };

        let err = run_server(Arc::new(MemoryItemStore::default()), config)
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::Io(_)));
    }
}
