//! HTTP server command
//!
//! Every flag doubles as an environment variable, so a container only
//! needs `DB_HOST`, `DB_PASSWORD` and friends set.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use itemsvc_server::config::DEFAULT_GREETING;
use itemsvc_server::store::MySqlItemStore;
use itemsvc_server::{run_server, ConfigError, CorsMode, ServerConfig, StoreConfig};

/// Cross-origin policy as accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorsArg {
    /// No CORS headers
    Off,
    /// Any origin
    AllowAll,
    /// Only the origin given by --cors-origin
    AllowOrigin,
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "BIND_ADDR", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// Response body for GET /
    #[arg(long, env = "GREETING", default_value = DEFAULT_GREETING)]
    pub greeting: String,

    /// Cross-origin policy
    #[arg(long, env = "CORS_MODE", value_enum, default_value = "allow-all")]
    pub cors: CorsArg,

    /// Origin allowed when --cors is allow-origin
    #[arg(long, env = "CORS_ORIGIN")]
    pub cors_origin: Option<String>,

    /// MySQL host
    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    pub db_host: String,

    /// MySQL port
    #[arg(long, env = "DB_PORT", default_value_t = 3306)]
    pub db_port: u16,

    /// MySQL user
    #[arg(long, env = "DB_USER", default_value = "admin")]
    pub db_user: String,

    /// MySQL password (falls back to MYSQL_ROOT_PASSWORD)
    #[arg(long, env = "DB_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,

    #[arg(long, env = "MYSQL_ROOT_PASSWORD", hide = true, hide_env_values = true)]
    pub mysql_root_password: Option<String>,

    /// Database name
    #[arg(long, env = "DB_NAME", default_value = "mydatabase")]
    pub db_name: String,

    /// Connection pool size (1 = one persistent connection)
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 1)]
    pub db_max_connections: u32,

    /// Seconds a request waits for a database connection before failing
    #[arg(long, env = "DB_ACQUIRE_TIMEOUT", default_value_t = 3)]
    pub db_acquire_timeout: u64,
}

impl ServeArgs {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            host: self.db_host.clone(),
            port: self.db_port,
            user: self.db_user.clone(),
            password: StoreConfig::resolve_password(
                self.db_password.clone(),
                self.mysql_root_password.clone(),
            ),
            database: self.db_name.clone(),
            max_connections: self.db_max_connections,
            acquire_timeout: Duration::from_secs(self.db_acquire_timeout),
        }
    }

    pub fn server_config(&self) -> Result<ServerConfig, ConfigError> {
        let cors = match self.cors {
            CorsArg::Off => CorsMode::Off,
            CorsArg::AllowAll => CorsMode::AllowAll,
            CorsArg::AllowOrigin => {
                CorsMode::allow_origin(self.cors_origin.as_deref().unwrap_or_default())?
            }
        };

        Ok(ServerConfig {
            bind_addr: self.bind,
            greeting: self.greeting.clone(),
            cors,
        })
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let server_config = args
        .server_config()
        .context("Invalid CORS configuration")?;
    let store_config = args.store_config();

    tracing::info!(
        db_host = %store_config.host,
        db_name = %store_config.database,
        "Starting itemsvc on {}",
        args.bind
    );

    // Never blocks: the reachability check runs in the background
    let store = MySqlItemStore::connect(&store_config);

    // Run server (blocks until shutdown)
    run_server(Arc::new(store), server_config)
        .await
        .context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ServeArgs {
        ServeArgs::try_parse_from(std::iter::once("serve").chain(args.iter().copied()))
            .expect("args should parse")
    }

    #[test]
    fn store_config_prefers_db_password() {
        let args = parse(&[
            "--db-host",
            "mysql-service",
            "--db-password",
            "app-secret",
            "--mysql-root-password",
            "root-secret",
        ]);
        let config = args.store_config();
        assert_eq!(config.host, "mysql-service");
        assert_eq!(config.password.as_deref(), Some("app-secret"));
    }

    #[test]
    fn acquire_timeout_from_flag() {
        let args = parse(&["--db-acquire-timeout", "7"]);
        assert_eq!(args.store_config().acquire_timeout, Duration::from_secs(7));
    }

    #[tokio::test]
    async fn serves_greeting_while_database_refuses_connections() {
        // Reserve a free port, then hand it to the server
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let bind = format!("127.0.0.1:{}", port);
        let args = parse(&[
            "-b",
            &bind,
            "--cors",
            "off",
            "--greeting",
            "Hello, World!",
            "--db-host",
            "127.0.0.1",
            "--db-port",
            "1",
            "--db-acquire-timeout",
            "30",
        ]);
        let server = tokio::spawn(run_serve(args));

        let client = reqwest::Client::new();
        let url = format!("http://{}/", bind);
        let body = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                if let Ok(response) = client.get(&url).send().await {
                    break response.text().await.unwrap();
                }
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
        })
        .await
        .expect("server should listen without waiting for the database");

        assert_eq!(body, "Hello, World!");
        server.abort();
    }

    #[test]
    fn store_config_uses_root_password_when_unset() {
        let args = parse(&["--db-password", "", "--mysql-root-password", "root-secret"]);
        assert_eq!(args.store_config().password.as_deref(), Some("root-secret"));
    }

    #[test]
    fn allow_origin_needs_origin() {
        let args = parse(&["--cors", "allow-origin", "--cors-origin", ""]);
        assert!(matches!(
            args.server_config(),
            Err(ConfigError::MissingOrigin)
        ));

        let args = parse(&["--cors", "allow-origin", "--cors-origin", "http://frontend:80"]);
        let config = args.server_config().unwrap();
        assert!(matches!(config.cors, CorsMode::AllowOrigin(_)));
    }

    #[test]
    fn cors_off_and_greeting() {
        let args = parse(&["--cors", "off", "--greeting", "Hello, Jeevan!", "-b", "127.0.0.1:8080"]);
        let config = args.server_config().unwrap();
        assert_eq!(config.cors, CorsMode::Off);
        assert_eq!(config.greeting, "Hello, Jeevan!");
        assert_eq!(config.bind_addr.port(), 8080);
    }
}
