//! Server test utilities.

use std::sync::Arc;
use tempfile::TempDir;
use ticketd_core::AppConfig;
use ticketd_server::{AppState, create_router};
use ticketd_store::{JsonStore, TicketRepo};

/// A test server wrapper with all dependencies.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestServer {
    pub router: axum::Router,
    pub state: AppState,
    _temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestServer {
    /// Create a new test server with a temporary backing file.
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("db.json");

        let repo: Arc<dyn TicketRepo> = Arc::new(
            JsonStore::open(&db_path)
                .await
                .expect("Failed to open ticket store"),
        );

        let config = AppConfig::for_testing(db_path);
        let state = AppState::new(config, repo);
        let router = create_router(state.clone());

        Self {
            router,
            state,
            _temp_dir: temp_dir,
        }
    }

    /// Get access to the underlying repository.
    pub fn repo(&self) -> Arc<dyn TicketRepo> {
        self.state.repo.clone()
    }
}
