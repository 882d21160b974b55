//! In-memory item store

use async_trait::async_trait;

use super::{Item, ItemStore, StoreError};

/// Serves a fixed row set, or fails every call when built with [`MemoryItemStore::failing`].
#[derive(Debug, Clone, Default)]
pub struct MemoryItemStore {
    items: Vec<Item>,
    failure: Option<String>,
}

impl MemoryItemStore {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items,
            failure: None,
        }
    }

    /// A store whose every fetch fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            failure: Some(reason.into()),
        }
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn fetch_items(&self) -> Result<Vec<Item>, StoreError> {
        match &self.failure {
            Some(reason) => Err(StoreError::Unavailable(reason.clone())),
            None => Ok(self.items.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn returns_rows_in_insertion_order() {
        let rows: Vec<Item> = serde_json::from_value(json!([
            {"id": 2, "name": "Gadget"},
            {"id": 1, "name": "Widget"}
        ]))
        .unwrap();
        let store = MemoryItemStore::new(rows.clone());

        assert_eq!(store.fetch_items().await.unwrap(), rows);
    }

    #[tokio::test]
    async fn failing_store_errors() {
        let store = MemoryItemStore::failing("connection refused");
        let err = store.fetch_items().await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(ref r) if r == "connection refused"));
    }
}
