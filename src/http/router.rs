//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Reference data maintenance
        .route("/airports", get(handlers::list_airports).put(handlers::upsert_airport))
        .route("/airports/{id}", delete(handlers::delete_airport))
        .route("/aircraft", get(handlers::list_aircraft).put(handlers::upsert_aircraft))
        .route("/aircraft/{id}", delete(handlers::delete_aircraft))
        .route(
            "/aircraft/{id}/config",
            get(handlers::get_aircraft_config).put(handlers::put_aircraft_config),
        )
        .route("/fleet/types", get(handlers::get_fleet_types))
        .route("/routes", get(handlers::list_routes).put(handlers::upsert_route))
        .route("/routes/{id}", delete(handlers::delete_route))
        .route("/charters", get(handlers::list_charters).put(handlers::upsert_charter))
        .route("/charters/{id}", delete(handlers::delete_charter))
        // Weekly template
        .route("/template", get(handlers::get_week))
        .route("/template/{day}", get(handlers::get_day).put(handlers::put_day))
        .route("/template/{day}/copy", post(handlers::copy_day))
        // Dispatch board
        .route("/boards/{date}", get(handlers::get_board).put(handlers::put_board))
        .route("/boards/{date}/copy-previous-pool", post(handlers::copy_previous_pool))
        .route("/boards/{date}/validate-leg", post(handlers::validate_leg))
        .route("/boards/{date}/template-draft", post(handlers::template_draft))
        .route("/boards/{date}/program", get(handlers::get_program));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use std::sync::Arc;

    #[test]
    fn test_router_creation() {
        let repo =
            Arc::new(LocalRepository::new()) as Arc<dyn crate::db::repository::FullRepository>;
        let state = AppState::new(repo);
        let _router = create_router(state);
        // If we got here, router was created successfully
    }
}
