//! Items command - the list view a browser frontend would show
//!
//! One GET to `<endpoint>/items`, then one `- <name>` line per item.
//! Fetch failures are logged and otherwise swallowed: nothing is printed
//! and the command still succeeds.
//!
//! ```bash
//! itemsvc items --endpoint http://backend-service:3000
//! itemsvc items --json | jq '.[].id'
//! ```

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use reqwest::Client;

use itemsvc_server::Item;

/// Arguments for the items command
#[derive(Parser, Debug)]
pub struct ItemsArgs {
    /// Base URL of the items service
    #[arg(long, env = "ITEMS_ENDPOINT", default_value = "http://localhost:3000")]
    pub endpoint: String,

    /// Print the fetched items as JSON instead of a list
    #[arg(long)]
    pub json: bool,
}

/// Fetch and print items
pub async fn run_items(args: ItemsArgs) -> Result<()> {
    let items = match fetch_items(&Client::new(), &args.endpoint).await {
        Ok(items) => items,
        Err(e) => {
            tracing::error!("Error fetching data: {:#}", e);
            return Ok(());
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        print!("{}", render_list(&items));
    }

    Ok(())
}

async fn fetch_items(client: &Client, endpoint: &str) -> Result<Vec<Item>> {
    let url = format!("{}/items", endpoint.trim_end_matches('/'));
    tracing::debug!(%url, "Fetching data from backend");

    let response = client
        .get(&url)
        .send()
        .await
        .context("Failed to connect to items service")?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(anyhow!("{}: {}", status, error_text));
    }

    let items: Vec<Item> = response.json().await.context("Failed to parse response")?;
    tracing::debug!(count = items.len(), "Fetched data");
    Ok(items)
}

/// One `- <name>` line per item; blank name when the field is missing.
pub fn render_list(items: &[Item]) -> String {
    items
        .iter()
        .map(|item| format!("- {}\n", item.name().unwrap_or_default()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use itemsvc_server::store::MemoryItemStore;
    use itemsvc_server::{build_router, AppState, CorsMode};
    use serde_json::json;

    async fn spawn_service(store: MemoryItemStore) -> String {
        let app = build_router(AppState::new(Arc::new(store), "hi"), &CorsMode::AllowAll);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn renders_one_line_per_item() {
        let items: Vec<Item> = serde_json::from_value(json!([
            {"id": 1, "name": "Widget"},
            {"id": 2},
            {"id": 3, "name": "Gadget"}
        ]))
        .unwrap();

        assert_eq!(render_list(&items), "- Widget\n- \n- Gadget\n");
        assert_eq!(render_list(&[]), "");
    }

    #[tokio::test]
    async fn fetches_from_running_service() {
        let rows: Vec<Item> =
            serde_json::from_value(json!([{"id": 1, "name": "Widget"}])).unwrap();
        let endpoint = spawn_service(MemoryItemStore::new(rows.clone())).await;

        let items = fetch_items(&Client::new(), &format!("{}/", endpoint))
            .await
            .unwrap();
        assert_eq!(items, rows);
    }

    #[tokio::test]
    async fn server_error_is_reported() {
        let endpoint = spawn_service(MemoryItemStore::failing("down")).await;

        let err = fetch_items(&Client::new(), &endpoint).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("500"), "{message}");
        assert!(message.contains("Error fetching items"), "{message}");
    }

    #[tokio::test]
    async fn fetch_failure_does_not_fail_command() {
        let args = ItemsArgs {
            endpoint: "http://127.0.0.1:1".into(),
            json: false,
        };
        assert!(run_items(args).await.is_ok());
    }
}
