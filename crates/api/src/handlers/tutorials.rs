//! Handlers for the `/tutorials` resource.
//!
//! Public reads use the projection without the unlock code; whether a
//! premium tutorial's steps are rendered is decided client-side from
//! the unlock endpoints in [`super::unlock`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use devdocs_core::error::CoreError;
use devdocs_core::slug::slugify;
use devdocs_core::types::DbId;
use devdocs_db::models::tutorial::{CreateTutorial, UpdateTutorial};
use devdocs_db::repositories::TutorialRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the public tutorial list.
#[derive(Debug, serde::Deserialize)]
pub struct TutorialListParams {
    pub category: Option<String>,
}

fn slug_from_title(title: &str) -> Result<String, AppError> {
    let slug = slugify(title);
    if slug.is_empty() {
        return Err(AppError::BadRequest(
            "Title must contain at least one alphanumeric character".to_string(),
        ));
    }
    Ok(slug)
}

/// GET /tutorials?category=
///
/// List published tutorials with their steps, newest first.
pub async fn list_published(
    State(state): State<AppState>,
    Query(params): Query<TutorialListParams>,
) -> AppResult<impl IntoResponse> {
    let tutorials =
        TutorialRepo::list_published(&state.pool, params.category.as_deref()).await?;
    Ok(Json(DataResponse { data: tutorials }))
}

/// GET /tutorials/all
///
/// List every tutorial including drafts (dashboard view).
pub async fn list_all(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let tutorials = TutorialRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: tutorials }))
}

/// GET /tutorials/categories
///
/// Distinct categories for filter menus.
pub async fn categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = TutorialRepo::categories(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /tutorials/slug/{slug}
///
/// Get a published tutorial by slug (public detail page).
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let tutorial = TutorialRepo::find_published_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByKey {
                entity: "Tutorial",
                key: slug.clone(),
            })
        })?;

    Ok(Json(DataResponse { data: tutorial }))
}

/// GET /tutorials/{id}
///
/// Get any tutorial with steps by id (dashboard edit screen).
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let tutorial = TutorialRepo::find_with_steps(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Tutorial", id }))?;

    Ok(Json(DataResponse { data: tutorial }))
}

/// POST /tutorials
///
/// Create a tutorial with its steps. The slug is generated from the
/// title; steps get dense 1-based order from their list position.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTutorial>,
) -> AppResult<impl IntoResponse> {
    if input.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }

    let slug = slug_from_title(&input.title)?;
    let tutorial = TutorialRepo::create(&state.pool, &slug, &input).await?;

    tracing::info!(
        user = %auth.username,
        tutorial_id = tutorial.tutorial.id,
        slug = %tutorial.tutorial.slug,
        steps = tutorial.steps.len(),
        "Tutorial created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: tutorial })))
}

/// PUT /tutorials/{id}
///
/// Update a tutorial. When `steps` is present the step list is replaced
/// wholesale; an empty-string `unlock_code` clears the stored code.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTutorial>,
) -> AppResult<impl IntoResponse> {
    let slug = match &input.title {
        Some(title) => Some(slug_from_title(title)?),
        None => None,
    };

    let tutorial = TutorialRepo::update(&state.pool, id, slug.as_deref(), &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Tutorial", id }))?;

    tracing::info!(
        user = %auth.username,
        tutorial_id = id,
        steps_replaced = input.steps.is_some(),
        "Tutorial updated"
    );

    Ok(Json(DataResponse { data: tutorial }))
}

/// DELETE /tutorials/{id}
///
/// Delete a tutorial (steps and unlock records cascade).
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = TutorialRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Tutorial", id }));
    }

    tracing::info!(user = %auth.username, tutorial_id = id, "Tutorial deleted");

    Ok(StatusCode::NO_CONTENT)
}
