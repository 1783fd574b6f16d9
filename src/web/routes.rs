//! Route definitions

use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Filter hook points
        .route("/filters/search-results", post(handlers::filter_search_results))
        .route("/filters/browse-results", post(handlers::filter_browse_results))
        .route("/filters/action-links", post(handlers::filter_action_links))
        .route("/filters/tabs", post(handlers::filter_tabs))
        // Vendor tab support
        .route("/tab-args", post(handlers::tab_args))
        .route("/notice", get(handlers::notice))
        // API routes
        .route("/health", get(handlers::health))
        // Add middleware
        .layer(cors)
        // Add state
        .with_state(state)
}
