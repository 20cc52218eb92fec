//! Ticket store abstraction and JSON-file implementation for ticketd.
//!
//! This crate provides the data-access layer:
//! - The `TicketRepo` trait: list, get, create, replace, update, delete
//! - The query/filter/sort/paginate pipeline behind `list`
//! - `JsonStore`, a durable single-file JSON-backed implementation

pub mod error;
pub mod json;
pub mod repo;

pub use error::{StoreError, StoreResult};
pub use json::JsonStore;
pub use repo::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, TicketPage, TicketQuery, TicketRepo};

use std::sync::Arc;
use ticketd_core::config::StoreConfig;

/// Create a ticket repository from configuration.
pub async fn from_config(config: &StoreConfig) -> StoreResult<Arc<dyn TicketRepo>> {
    let store = JsonStore::open(&config.path).await?;
    Ok(Arc::new(store) as Arc<dyn TicketRepo>)
}
