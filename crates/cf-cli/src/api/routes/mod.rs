//! API route handlers

pub mod activity;
pub mod health;
pub mod summary;

use axum::{
    Router,
    http::{Method, header},
    routing::{delete, get},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::state::AppState;

/// Create the API router
pub fn create_router(state: AppState, enable_cors: bool) -> Router {
    let mut router = Router::new()
        .route("/api/health", get(health::health_check))
        .route(
            "/api/activities",
            get(activity::list_activities).post(activity::create_activity),
        )
        .route("/api/activities/:id", delete(activity::delete_activity))
        .route("/api/summary", get(summary::get_summary))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        router = router.layer(cors_layer());
    }

    router
}

/// Permissive CORS for a browser front end served from another origin.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::ACCEPT])
}
