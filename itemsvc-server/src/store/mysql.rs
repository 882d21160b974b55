//! MySQL-backed item store
//!
//! Uses a lazily connected sqlx pool. With the default size of 1 this is
//! the single persistent connection: no idle timeout, no lifetime limit.
//! Connection failures never stop the process; they surface per request,
//! bounded by `StoreConfig::acquire_timeout`.

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};

use super::row::row_to_item;
use super::{Item, ItemStore, StoreError, SELECT_ITEMS};
use crate::config::StoreConfig;

/// Item store over a MySQL pool
#[derive(Debug, Clone)]
pub struct MySqlItemStore {
    pool: MySqlPool,
}

impl MySqlItemStore {
    /// Build the store without touching the network.
    pub fn new(config: &StoreConfig) -> Self {
        let mut options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .database(&config.database);
        if let Some(password) = &config.password {
            options = options.password(password);
        }

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_lazy_with(options);

        Self { pool }
    }

    /// Open a connection once so startup can report reachability.
    pub async fn probe(&self) -> Result<(), StoreError> {
        self.pool.acquire().await?;
        Ok(())
    }

    /// Build the store and probe the database in the background.
    ///
    /// Returns immediately so the server can bind right away. The probe
    /// result is only logged; later `/items` requests fail on their own.
    /// Must be called inside a Tokio runtime.
    pub fn connect(config: &StoreConfig) -> Self {
        let store = Self::new(config);
        let probe = store.clone();
        let host = config.host.clone();
        let database = config.database.clone();

        tokio::spawn(async move {
            match probe.probe().await {
                Ok(()) => tracing::info!(%host, %database, "Connected to the database"),
                Err(e) => tracing::error!(
                    %host,
                    %database,
                    "Error connecting to the database: {}",
                    e
                ),
            }
        });

        store
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

#[async_trait]
impl ItemStore for MySqlItemStore {
    async fn fetch_items(&self) -> Result<Vec<Item>, StoreError> {
        let rows = sqlx::query(SELECT_ITEMS).fetch_all(&self.pool).await?;
        let items = rows
            .iter()
            .map(row_to_item)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(count = items.len(), "fetched items");
        Ok(items)
    }
}
