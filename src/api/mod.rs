use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

mod admin;
mod ask;
mod courses;
mod error;
mod ingest;
mod observability;
mod system;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

pub fn router(state: AppState) -> Router {
    let cors_origins = state.config.server.cors_allowed_origins.clone();

    let api_router = Router::new()
        .route("/courses", get(courses::list_courses))
        .route("/compare", get(courses::compare_courses))
        .route("/meta", get(courses::get_meta))
        .route("/ask", post(ask::ask))
        .route("/ingest", post(ingest::ingest_csv))
        .route("/cache/clear", post(admin::clear_cache))
        .route("/health", get(system::health))
        .route("/metrics", get(observability::get_metrics))
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}
