//! Service configuration
//!
//! Plain structs; the CLI fills them from flags and environment variables
//! (`DB_HOST`, `DB_USER`, `CORS_MODE`, ...). Nothing here reads the process
//! environment, so tests can build configs directly.

use std::net::SocketAddr;
use std::time::Duration;

use axum::http::HeaderValue;

/// Greeting served on `GET /` unless overridden.
pub const DEFAULT_GREETING: &str = "Hello, World!";

/// Configuration errors surfaced at startup
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("CORS mode 'allow-origin' requires an origin")]
    MissingOrigin,

    #[error("invalid CORS origin '{0}'")]
    InvalidOrigin(String),
}

/// MySQL connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Option<String>,
    pub database: String,
    /// Pool size. 1 keeps a single persistent connection.
    pub max_connections: u32,
    /// How long a request waits for a connection before failing.
    pub acquire_timeout: Duration,
}

impl StoreConfig {
    /// Pick the password: `DB_PASSWORD` first, then `MYSQL_ROOT_PASSWORD`.
    pub fn resolve_password(
        password: Option<String>,
        root_password: Option<String>,
    ) -> Option<String> {
        password
            .filter(|p| !p.is_empty())
            .or(root_password.filter(|p| !p.is_empty()))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            user: "admin".to_string(),
            password: None,
            database: "mydatabase".to_string(),
            max_connections: 1,
            acquire_timeout: Duration::from_secs(3),
        }
    }
}

/// Cross-origin policy applied to every route, preflight included
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsMode {
    /// No CORS headers at all
    Off,
    /// `Access-Control-Allow-Origin: *`
    #[default]
    AllowAll,
    /// Only this exact origin is echoed back
    AllowOrigin(HeaderValue),
}

impl CorsMode {
    /// Build the `allow-origin` variant, validating the origin as a header value.
    ///
    /// `*` is treated as [`CorsMode::AllowAll`].
    pub fn allow_origin(origin: &str) -> Result<Self, ConfigError> {
        let origin = origin.trim();
        if origin.is_empty() {
            return Err(ConfigError::MissingOrigin);
        }
        if origin == "*" {
            return Ok(Self::AllowAll);
        }
        HeaderValue::from_str(origin)
            .map(Self::AllowOrigin)
            .map_err(|_| ConfigError::InvalidOrigin(origin.to_string()))
    }
}

/// HTTP server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:3000)
    pub bind_addr: SocketAddr,

    /// Body of `GET /`
    pub greeting: String,

    pub cors: CorsMode,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            greeting: DEFAULT_GREETING.to_string(),
            cors: CorsMode::default(),
        }
    }
}
