//! Route definitions for the `/scripts` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::scripts;
use crate::state::AppState;

/// Routes mounted at `/scripts`.
///
/// ```text
/// GET    /       list
/// POST   /       create
/// GET    /{id}   get_by_id
/// PUT    /{id}   update
/// DELETE /{id}   delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(scripts::list).post(scripts::create))
        .route(
            "/{id}",
            get(scripts::get_by_id)
                .put(scripts::update)
                .delete(scripts::delete),
        )
}
