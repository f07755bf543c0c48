//! Route definitions for the `/tutorials` resource, including the
//! premium unlock gate.

use axum::routing::get;
use axum::Router;

use crate::handlers::{tutorials, unlock};
use crate::state::AppState;

/// Routes mounted at `/tutorials`.
///
/// ```text
/// GET    /               list_published
/// POST   /               create
/// GET    /all            list_all
/// GET    /categories     categories
/// GET    /unlock-code    generate_code
/// GET    /unlocked       unlocked_list
/// GET    /slug/{slug}    get_by_slug
/// GET    /{id}           get_by_id
/// PUT    /{id}           update
/// DELETE /{id}           delete
/// GET    /{id}/unlock    unlock::check
/// POST   /{id}/unlock    unlock::attempt
/// DELETE /{id}/unlock    unlock::revoke
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tutorials::list_published).post(tutorials::create))
        .route("/all", get(tutorials::list_all))
        .route("/categories", get(tutorials::categories))
        .route("/unlock-code", get(unlock::generate_code))
        .route("/unlocked", get(unlock::unlocked_list))
        .route("/slug/{slug}", get(tutorials::get_by_slug))
        .route(
            "/{id}",
            get(tutorials::get_by_id)
                .put(tutorials::update)
                .delete(tutorials::delete),
        )
        .route(
            "/{id}/unlock",
            get(unlock::check)
                .post(unlock::attempt)
                .delete(unlock::revoke),
        )
}
