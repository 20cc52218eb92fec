//! HTTP API server for the ticketd tracker.
//!
//! This crate provides the HTTP control plane:
//! - Ticket CRUD endpoints
//! - Listing with filtering, text search and pagination
//! - Health check

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
