//! Handlers for the `/posts` resource.
//!
//! Public reads serve published posts only; the dashboard (authed)
//! surface sees drafts, fetches by id, and gets aggregate stats.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use devdocs_core::error::CoreError;
use devdocs_core::slug::slugify;
use devdocs_core::types::DbId;
use devdocs_db::models::post::{CreatePost, UpdatePost};
use devdocs_db::repositories::PostRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the public post list.
#[derive(Debug, serde::Deserialize)]
pub struct PostListParams {
    pub category: Option<String>,
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Generate a slug from a title, rejecting titles with no usable
/// characters.
fn slug_from_title(title: &str) -> Result<String, AppError> {
    let slug = slugify(title);
    if slug.is_empty() {
        return Err(AppError::BadRequest(
            "Title must contain at least one alphanumeric character".to_string(),
        ));
    }
    Ok(slug)
}

/// GET /posts?category=&q=&limit=&offset=
///
/// List published posts, newest first.
pub async fn list_published(
    State(state): State<AppState>,
    Query(params): Query<PostListParams>,
) -> AppResult<impl IntoResponse> {
    let posts = PostRepo::list_published(
        &state.pool,
        params.category.as_deref(),
        params.q.as_deref(),
        params.limit,
        params.offset,
    )
    .await?;

    Ok(Json(DataResponse { data: posts }))
}

/// GET /posts/all
///
/// List every post including drafts (dashboard view).
pub async fn list_all(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let posts = PostRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: posts }))
}

/// GET /posts/stats
///
/// Post counts for the dashboard overview.
pub async fn stats(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let stats = PostRepo::stats(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// GET /posts/categories
///
/// Distinct categories for filter menus.
pub async fn categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = PostRepo::categories(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /posts/tags
///
/// Distinct tags across all posts.
pub async fn tags(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tags = PostRepo::tags(&state.pool).await?;
    Ok(Json(DataResponse { data: tags }))
}

/// GET /posts/slug/{slug}
///
/// Get a published post by slug (public detail page).
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let post = PostRepo::find_published_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByKey {
                entity: "Post",
                key: slug.clone(),
            })
        })?;

    Ok(Json(DataResponse { data: post }))
}

/// GET /posts/{id}
///
/// Get any post by id (dashboard edit screen).
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let post = PostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Post", id }))?;

    Ok(Json(DataResponse { data: post }))
}

/// POST /posts
///
/// Create a new post. The slug is generated from the title.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePost>,
) -> AppResult<impl IntoResponse> {
    if input.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }
    if input.content.trim().is_empty() {
        return Err(AppError::BadRequest("Content is required".to_string()));
    }

    let slug = slug_from_title(&input.title)?;
    let post = PostRepo::create(&state.pool, &slug, &input).await?;

    tracing::info!(
        user = %auth.username,
        post_id = post.id,
        slug = %post.slug,
        "Post created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: post })))
}

/// PUT /posts/{id}
///
/// Update a post. The slug is regenerated when the title changes.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePost>,
) -> AppResult<impl IntoResponse> {
    let slug = match &input.title {
        Some(title) => Some(slug_from_title(title)?),
        None => None,
    };

    let post = PostRepo::update(&state.pool, id, slug.as_deref(), &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Post", id }))?;

    tracing::info!(user = %auth.username, post_id = id, "Post updated");

    Ok(Json(DataResponse { data: post }))
}

/// DELETE /posts/{id}
///
/// Delete a post.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = PostRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Post", id }));
    }

    tracing::info!(user = %auth.username, post_id = id, "Post deleted");

    Ok(StatusCode::NO_CONTENT)
}
