pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::catalog::handlers as catalog_handlers;
use crate::matching::handlers as matching_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Matching API
        .route("/api/v1/match", post(matching_handlers::handle_match))
        .route(
            "/api/v1/match/upload",
            post(matching_handlers::handle_match_upload)
                .layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/api/v1/skills/extract",
            post(matching_handlers::handle_extract_skills),
        )
        // Catalogue API
        .route("/api/v1/jobs", get(catalog_handlers::handle_list_jobs))
        .route("/api/v1/jobs/:id", get(catalog_handlers::handle_get_job))
        .route("/api/v1/courses", get(catalog_handlers::handle_list_courses))
        .with_state(state)
}
