//! Command implementations for the itemsvc CLI

pub mod items;
pub mod serve;

pub use items::{run_items, ItemsArgs};
pub use serve::{run_serve, ServeArgs};
