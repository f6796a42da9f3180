//! Route definitions for the Business Administration Platform

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Protected routes - quotation management
        .nest("/quotations", quotation_routes())
}

/// Quotation routes (protected)
fn quotation_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_quotations))
        .route("/import", post(handlers::import_quotation))
        .route("/:quotation_no", get(handlers::get_quotation))
        .route_layer(middleware::from_fn(auth_middleware))
}
