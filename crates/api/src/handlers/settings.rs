//! Handlers for site settings and social links.
//!
//! The merged settings document (every section over its default, plus
//! the ordered social links) is what public pages render from, so it is
//! served through the TTL cache on `AppState`. Every mutation
//! invalidates the cache explicitly; the TTL is only a backstop.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value;

use devdocs_core::error::CoreError;
use devdocs_core::settings::{default_section, default_settings, validate_section};
use devdocs_core::types::DbId;
use devdocs_db::models::setting::UpdateSettings;
use devdocs_db::models::social_link::SocialLinkInput;
use devdocs_db::repositories::{SettingsRepo, SocialLinkRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Assemble the merged settings document: defaults overlaid with stored
/// sections, plus the ordered social links under `"social"`.
async fn load_settings(state: &AppState) -> Result<Value, AppError> {
    let mut merged = default_settings();

    for row in SettingsRepo::list_all(&state.pool).await? {
        merged.insert(row.section, row.data);
    }

    let social = SocialLinkRepo::list(&state.pool).await?;
    merged.insert("social".to_string(), serde_json::to_value(social).unwrap_or_default());

    Ok(Value::Object(merged))
}

/// GET /settings
///
/// The full merged settings document (cached).
pub async fn get_all(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    if let Some(cached) = state.settings_cache.get().await {
        return Ok(Json(DataResponse { data: cached }));
    }

    let settings = load_settings(&state).await?;
    state.settings_cache.store(settings.clone()).await;

    Ok(Json(DataResponse { data: settings }))
}

/// GET /settings/{section}
///
/// One section's data, falling back to the server-side default.
pub async fn get_section(
    State(state): State<AppState>,
    Path(section): Path<String>,
) -> AppResult<impl IntoResponse> {
    validate_section(&section).map_err(AppError::BadRequest)?;

    let data = match SettingsRepo::get_section(&state.pool, &section).await? {
        Some(row) => row.data,
        None => default_section(&section),
    };

    Ok(Json(DataResponse { data }))
}

/// PUT /settings
///
/// Upsert one or more sections, then invalidate the cache and return
/// the freshly merged document.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateSettings>,
) -> AppResult<impl IntoResponse> {
    if input.sections.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "At least one settings section is required".into(),
        )));
    }

    for section in input.sections.keys() {
        validate_section(section).map_err(AppError::BadRequest)?;
    }

    for (section, data) in &input.sections {
        SettingsRepo::upsert_section(&state.pool, section, data).await?;
    }

    state.settings_cache.invalidate().await;

    tracing::info!(
        user = %auth.username,
        sections = input.sections.len(),
        "Settings updated"
    );

    let settings = load_settings(&state).await?;
    state.settings_cache.store(settings.clone()).await;

    Ok(Json(DataResponse { data: settings }))
}

/// POST /settings/reset
///
/// Restore every section to its server-side default.
pub async fn reset(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    SettingsRepo::reset(&state.pool, &default_settings()).await?;
    state.settings_cache.invalidate().await;

    tracing::info!(user = %auth.username, "Settings reset to defaults");

    let settings = load_settings(&state).await?;
    Ok(Json(DataResponse { data: settings }))
}

// ---------------------------------------------------------------------------
// Social links
// ---------------------------------------------------------------------------

fn validate_link(link: &SocialLinkInput) -> Result<(), AppError> {
    if link.platform.trim().is_empty() {
        return Err(AppError::BadRequest("Platform is required".to_string()));
    }
    if link.url.trim().is_empty() {
        return Err(AppError::BadRequest("URL is required".to_string()));
    }
    Ok(())
}

/// GET /social-links
///
/// All links in display order.
pub async fn list_links(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let links = SocialLinkRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: links }))
}

/// PUT /social-links
///
/// Replace the full link list; display order follows list position.
pub async fn replace_links(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<Vec<SocialLinkInput>>,
) -> AppResult<impl IntoResponse> {
    for link in &input {
        validate_link(link)?;
    }

    let links = SocialLinkRepo::replace_all(&state.pool, &input).await?;
    state.settings_cache.invalidate().await;

    tracing::info!(user = %auth.username, count = links.len(), "Social links replaced");

    Ok(Json(DataResponse { data: links }))
}

/// POST /social-links
///
/// Append a link after the current highest display order.
pub async fn create_link(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SocialLinkInput>,
) -> AppResult<impl IntoResponse> {
    validate_link(&input)?;

    let link = SocialLinkRepo::create(&state.pool, &input).await?;
    state.settings_cache.invalidate().await;

    tracing::info!(user = %auth.username, link_id = link.id, "Social link added");

    Ok((StatusCode::CREATED, Json(DataResponse { data: link })))
}

/// PUT /social-links/{id}
///
/// Update a link's platform, URL, or icon.
pub async fn update_link(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SocialLinkInput>,
) -> AppResult<impl IntoResponse> {
    validate_link(&input)?;

    let link = SocialLinkRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "SocialLink", id }))?;

    state.settings_cache.invalidate().await;

    tracing::info!(user = %auth.username, link_id = id, "Social link updated");

    Ok(Json(DataResponse { data: link }))
}

/// DELETE /social-links/{id}
///
/// Remove a link.
pub async fn delete_link(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = SocialLinkRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "SocialLink", id }));
    }

    state.settings_cache.invalidate().await;

    tracing::info!(user = %auth.username, link_id = id, "Social link deleted");

    Ok(StatusCode::NO_CONTENT)
}
