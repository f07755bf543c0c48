//! Route definitions for the `/posts` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::posts;
use crate::state::AppState;

/// Routes mounted at `/posts`.
///
/// ```text
/// GET    /              list_published
/// POST   /              create
/// GET    /all           list_all
/// GET    /stats         stats
/// GET    /categories    categories
/// GET    /tags          tags
/// GET    /slug/{slug}   get_by_slug
/// GET    /{id}          get_by_id
/// PUT    /{id}          update
/// DELETE /{id}          delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(posts::list_published).post(posts::create))
        .route("/all", get(posts::list_all))
        .route("/stats", get(posts::stats))
        .route("/categories", get(posts::categories))
        .route("/tags", get(posts::tags))
        .route("/slug/{slug}", get(posts::get_by_slug))
        .route(
            "/{id}",
            get(posts::get_by_id).put(posts::update).delete(posts::delete),
        )
}
