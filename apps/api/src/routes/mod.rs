pub mod health;

use axum::{extract::DefaultBodyLimit, routing::{get, post}, Router};

use crate::resume::handlers;
use crate::state::AppState;

/// Multipart framing on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/resumes/parse", post(handlers::handle_parse_resume))
        .route(
            "/api/v1/resumes/display-text",
            post(handlers::handle_display_text),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
