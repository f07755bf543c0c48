//! Route definitions for site settings and social links.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Routes mounted at `/settings`.
///
/// ```text
/// GET  /            get_all (cached)
/// PUT  /            update
/// POST /reset       reset
/// GET  /{section}   get_section
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(settings::get_all).put(settings::update))
        .route("/reset", post(settings::reset))
        .route("/{section}", get(settings::get_section))
}

/// Routes mounted at `/social-links`.
///
/// ```text
/// GET    /       list_links
/// PUT    /       replace_links
/// POST   /       create_link
/// PUT    /{id}   update_link
/// DELETE /{id}   delete_link
/// ```
pub fn social_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(settings::list_links)
                .put(settings::replace_links)
                .post(settings::create_link),
        )
        .route(
            "/{id}",
            put(settings::update_link).delete(settings::delete_link),
        )
}
