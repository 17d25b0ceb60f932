use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;

/// All application routes
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // Rules API
        .route("/api/rules", get(handlers::rules::list_all))
        .route("/api/rules/create", post(handlers::rules::create))
        .route("/api/rules/evaluate", post(handlers::rules::evaluate))
        .route("/api/rules/combine", post(handlers::rules::combine))
        .route("/api/rules/:id", get(handlers::rules::get_by_id))
}
