//! Route definitions for the AI relay endpoints.

use axum::routing::post;
use axum::Router;

use crate::handlers::ai;
use crate::state::AppState;

/// Routes mounted at `/ai`.
///
/// ```text
/// POST /format             format_stream (streamed text/plain)
/// POST /generate-post      generate_post
/// POST /generate-tutorial  generate_tutorial
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/format", post(ai::format_stream))
        .route("/generate-post", post(ai::generate_post))
        .route("/generate-tutorial", post(ai::generate_tutorial))
}
