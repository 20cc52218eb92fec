//! Application state shared across handlers.

use std::sync::Arc;
use ticketd_core::AppConfig;
use ticketd_store::TicketRepo;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Ticket repository.
    pub repo: Arc<dyn TicketRepo>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(config: AppConfig, repo: Arc<dyn TicketRepo>) -> Self {
        Self {
            config: Arc::new(config),
            repo,
        }
    }
}
