//! itemsvc CLI
//!
//! - `serve`: run the items HTTP service against MySQL
//! - `items`: fetch `/items` from a running service and list item names

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(name = "itemsvc", version, about = "Read-only items service")]
struct Cli {
    /// Enable debug logging (RUST_LOG still wins when set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP service
    Serve(commands::ServeArgs),
    /// Fetch items from a running service and list their names
    Items(commands::ItemsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Items(args) => commands::run_items(args).await?,
    }

    Ok(())
}
