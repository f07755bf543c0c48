//! Handlers for the `/scripts` resource (project script reference cards).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use devdocs_core::error::CoreError;
use devdocs_core::types::DbId;
use devdocs_db::models::project_script::{CreateProjectScript, UpdateProjectScript};
use devdocs_db::repositories::ProjectScriptRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the script list.
#[derive(Debug, serde::Deserialize)]
pub struct ScriptListParams {
    pub q: Option<String>,
}

/// GET /scripts?q=
///
/// List project script entries, optionally filtered by a search term.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ScriptListParams>,
) -> AppResult<impl IntoResponse> {
    let scripts = ProjectScriptRepo::list(&state.pool, params.q.as_deref()).await?;
    Ok(Json(DataResponse { data: scripts }))
}

/// GET /scripts/{id}
///
/// Get one entry by id (dashboard edit screen).
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let script = ProjectScriptRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "ProjectScript", id }))?;

    Ok(Json(DataResponse { data: script }))
}

/// POST /scripts
///
/// Create a new project script entry.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateProjectScript>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }

    let script = ProjectScriptRepo::create(&state.pool, &input).await?;

    tracing::info!(
        user = %auth.username,
        script_id = script.id,
        name = %script.name,
        "Project script created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: script })))
}

/// PUT /scripts/{id}
///
/// Update a project script entry.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProjectScript>,
) -> AppResult<impl IntoResponse> {
    let script = ProjectScriptRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "ProjectScript", id }))?;

    tracing::info!(user = %auth.username, script_id = id, "Project script updated");

    Ok(Json(DataResponse { data: script }))
}

/// DELETE /scripts/{id}
///
/// Delete a project script entry.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ProjectScriptRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "ProjectScript", id }));
    }

    tracing::info!(user = %auth.username, script_id = id, "Project script deleted");

    Ok(StatusCode::NO_CONTENT)
}
