//! Store layer - the `items` table behind a trait
//!
//! Handlers receive an `Arc<dyn ItemStore>` through router state:
//! - [`MySqlItemStore`]: sqlx pool against the real database
//! - [`MemoryItemStore`]: fixed rows, for tests and local runs

pub mod memory;
pub mod mysql;
pub mod row;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use memory::MemoryItemStore;
pub use mysql::MySqlItemStore;

/// The one query the service ever runs.
pub const SELECT_ITEMS: &str = "SELECT * FROM items";

/// Store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Read access to the `items` table
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Every row of `items`, in the order the store returns them.
    async fn fetch_items(&self) -> Result<Vec<Item>, StoreError>;
}

/// One row of `items`, columns kept verbatim and in column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(Map<String, Value>);

impl Item {
    pub fn new(columns: Map<String, Value>) -> Self {
        Self(columns)
    }

    /// The `name` column, when present and textual.
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }
}

impl From<Map<String, Value>> for Item {
    fn from(columns: Map<String, Value>) -> Self {
        Self(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn item_serializes_as_plain_object_in_column_order() {
        let item: Item = serde_json::from_value(json!({"name": "Widget", "id": 1})).unwrap();
        assert_eq!(
            serde_json::to_string(&item).unwrap(),
            r#"{"name":"Widget","id":1}"#
        );
        assert_eq!(item.name(), Some("Widget"));
    }

    #[test]
    fn name_ignores_non_text_values() {
        let item: Item = serde_json::from_value(json!({"id": 2, "name": null})).unwrap();
        assert_eq!(item.name(), None);
        assert_eq!(item.get("id"), Some(&json!(2)));
    }
}
