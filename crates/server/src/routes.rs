//! Route configuration.

use crate::handlers;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check (intentionally open for load balancers/k8s probes)
        .route("/health", get(handlers::health_check))
        // Ticket collection
        .route(
            "/api/tickets",
            get(handlers::list_tickets).post(handlers::create_ticket),
        )
        // Single ticket
        .route(
            "/api/tickets/{id}",
            get(handlers::get_ticket)
                .put(handlers::replace_ticket)
                .patch(handlers::update_ticket)
                .delete(handlers::delete_ticket),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
