//! Core domain types and shared logic for the ticketd tracker.
//!
//! This crate defines the canonical data model used across all other crates:
//! - The `Ticket` record and its `Status`/`Priority` enumerations
//! - Client payload types and the validation rule set
//! - Configuration types

pub mod config;
pub mod error;
pub mod payload;
pub mod ticket;

pub use config::{AppConfig, ServerConfig, StoreConfig};
pub use error::{Error, Result};
pub use payload::{TicketDraft, TicketPayload};
pub use ticket::{Priority, Status, Ticket};
