//! Route definitions, one module per resource.

pub mod ai;
pub mod auth;
pub mod health;
pub mod posts;
pub mod scripts;
pub mod settings;
pub mod tutorials;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                        login (public)
///
/// /posts                             list published (public), create (auth)
/// /posts/all                         full list incl. drafts (auth)
/// /posts/stats                       dashboard counts (auth)
/// /posts/categories                  distinct categories (public)
/// /posts/tags                        distinct tags (public)
/// /posts/slug/{slug}                 published detail (public)
/// /posts/{id}                        get (auth), update, delete
///
/// /tutorials                         list published w/ steps (public), create (auth)
/// /tutorials/all                     full list incl. drafts (auth)
/// /tutorials/categories              distinct categories (public)
/// /tutorials/unlock-code             generate a fresh code (auth)
/// /tutorials/unlocked                unlocked ids for a visitor (public)
/// /tutorials/slug/{slug}             published detail (public)
/// /tutorials/{id}                    get (auth), update, delete
/// /tutorials/{id}/unlock             check (GET), attempt (POST), revoke (DELETE, auth)
///
/// /scripts                           list w/ search (public), create (auth)
/// /scripts/{id}                      get (auth), update, delete
///
/// /settings                          merged document (public), upsert (auth)
/// /settings/reset                    restore defaults (auth)
/// /settings/{section}                one section (public)
///
/// /social-links                      list (public), replace-all (auth), add (auth)
/// /social-links/{id}                 update, delete (auth)
///
/// /ai/format                         streaming rewrite (auth)
/// /ai/generate-post                  structured post draft (auth)
/// /ai/generate-tutorial              structured tutorial draft (auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/posts", posts::router())
        .nest("/tutorials", tutorials::router())
        .nest("/scripts", scripts::router())
        .nest("/settings", settings::router())
        .nest("/social-links", settings::social_router())
        .nest("/ai", ai::router())
}
