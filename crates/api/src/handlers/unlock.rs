//! Handlers for the premium tutorial unlock gate.
//!
//! The gate is deliberately forgiving toward the visitor:
//!
//! - The unlock *check* never fails visibly. Any lookup error is logged
//!   and reported as "not unlocked" (fail-closed).
//! - The unlock *attempt* returns a `{success, message}` outcome rather
//!   than an HTTP error for every expected case, and its failure
//!   messages do not reveal whether the tutorial exists.
//! - A wrong code is expected control flow: it is not logged as an
//!   error and there is no attempt counting or lockout.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use devdocs_core::error::CoreError;
use devdocs_core::types::DbId;
use devdocs_core::unlock::{codes_match, generate_unlock_code};
use devdocs_db::repositories::{TutorialRepo, UnlockRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters carrying the anonymous visitor identifier.
#[derive(Debug, Deserialize)]
pub struct VisitorParams {
    pub visitor_id: String,
}

/// Request body for an unlock attempt.
#[derive(Debug, Deserialize)]
pub struct UnlockAttempt {
    pub visitor_id: String,
    pub code: String,
}

/// Response for the unlock status check.
#[derive(Debug, Serialize)]
pub struct UnlockStatus {
    pub unlocked: bool,
}

/// Outcome of an unlock attempt.
#[derive(Debug, Serialize)]
pub struct UnlockOutcome {
    pub success: bool,
    pub message: String,
}

/// A freshly generated unlock code for the editor to assign.
#[derive(Debug, Serialize)]
pub struct GeneratedCode {
    pub code: String,
}

fn require_visitor_id(visitor_id: &str) -> Result<&str, AppError> {
    let visitor_id = visitor_id.trim();
    if visitor_id.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "visitor_id is required".into(),
        )));
    }
    Ok(visitor_id)
}

fn failure(message: &str) -> Json<DataResponse<UnlockOutcome>> {
    Json(DataResponse {
        data: UnlockOutcome {
            success: false,
            message: message.to_string(),
        },
    })
}

/// GET /tutorials/{id}/unlock?visitor_id=
///
/// Whether this visitor may see the tutorial's content. Non-premium
/// tutorials are always unlocked; lookup errors are treated as locked
/// rather than surfaced.
pub async fn check(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<VisitorParams>,
) -> AppResult<impl IntoResponse> {
    let visitor_id = require_visitor_id(&params.visitor_id)?;

    let unlocked = match unlock_status(&state, id, visitor_id).await {
        Ok(unlocked) => unlocked,
        Err(e) => {
            tracing::warn!(
                error = %e,
                tutorial_id = id,
                "Unlock lookup failed, treating tutorial as locked"
            );
            false
        }
    };

    Ok(Json(DataResponse {
        data: UnlockStatus { unlocked },
    }))
}

async fn unlock_status(
    state: &AppState,
    tutorial_id: DbId,
    visitor_id: &str,
) -> Result<bool, sqlx::Error> {
    let Some(tutorial) = TutorialRepo::find_by_id(&state.pool, tutorial_id).await? else {
        return Ok(false);
    };
    if !tutorial.is_premium {
        return Ok(true);
    }
    UnlockRepo::exists(&state.pool, tutorial_id, visitor_id).await
}

/// POST /tutorials/{id}/unlock
///
/// Attempt to unlock a premium tutorial with a shared code. On success
/// the unlock is recorded idempotently: repeating the attempt (or
/// racing it from two tabs) succeeds without a duplicate-row error.
pub async fn attempt(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UnlockAttempt>,
) -> AppResult<impl IntoResponse> {
    let visitor_id = require_visitor_id(&input.visitor_id)?;

    let supplied = input.code.trim();
    if supplied.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "code is required".into(),
        )));
    }

    let tutorial = match TutorialRepo::find_by_id(&state.pool, id).await {
        Ok(tutorial) => tutorial,
        Err(e) => {
            tracing::error!(error = %e, tutorial_id = id, "Unlock attempt lookup failed");
            return Ok(failure("Something went wrong. Please try again."));
        }
    };

    // Missing and non-premium collapse into one message so the attempt
    // endpoint does not reveal which tutorials exist.
    let Some(tutorial) = tutorial else {
        return Ok(failure("Tutorial not found or not premium."));
    };
    if !tutorial.is_premium {
        return Ok(failure("Tutorial not found or not premium."));
    }

    let Some(stored) = tutorial
        .unlock_code
        .as_deref()
        .map(str::trim)
        .filter(|code| !code.is_empty())
    else {
        // Premium with no code is a data-entry error state: nothing can
        // unlock it via this path.
        return Ok(failure("This tutorial has no access code configured."));
    };

    if !codes_match(supplied, stored) {
        return Ok(failure("Invalid code. Check the code and try again."));
    }

    if let Err(e) = UnlockRepo::record(&state.pool, id, visitor_id).await {
        tracing::error!(error = %e, tutorial_id = id, "Failed to record unlock");
        return Ok(failure("Something went wrong. Please try again."));
    }

    tracing::info!(tutorial_id = id, "Tutorial unlocked");

    Ok(Json(DataResponse {
        data: UnlockOutcome {
            success: true,
            message: "Tutorial unlocked!".to_string(),
        },
    }))
}

/// GET /tutorials/unlocked?visitor_id=
///
/// Tutorial ids this visitor has unlocked.
pub async fn unlocked_list(
    State(state): State<AppState>,
    Query(params): Query<VisitorParams>,
) -> AppResult<impl IntoResponse> {
    let visitor_id = require_visitor_id(&params.visitor_id)?;
    let ids = UnlockRepo::tutorial_ids_for_visitor(&state.pool, visitor_id).await?;
    Ok(Json(DataResponse { data: ids }))
}

/// DELETE /tutorials/{id}/unlock?visitor_id=
///
/// Revoke a visitor's unlock (admin/testing path).
pub async fn revoke(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<VisitorParams>,
) -> AppResult<impl IntoResponse> {
    let visitor_id = require_visitor_id(&params.visitor_id)?;
    let deleted = UnlockRepo::delete(&state.pool, id, visitor_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "TutorialUnlock",
            id,
        }));
    }

    tracing::info!(user = %auth.username, tutorial_id = id, "Unlock revoked");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /tutorials/unlock-code
///
/// Generate a fresh unlock code for the editor to assign to a tutorial.
pub async fn generate_code(_auth: AuthUser) -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse {
        data: GeneratedCode {
            code: generate_unlock_code(),
        },
    }))
}
