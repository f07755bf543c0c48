//! Handlers for the AI relay endpoints.
//!
//! `/ai/format` is a pure pass-through pump: provider fragments flow
//! through a bounded channel into the response body in arrival order,
//! so the dashboard editor sees a live-typing effect. The other two
//! endpoints are non-streaming structured generation.
//!
//! Input validation happens before any upstream work, and a missing
//! provider key answers 503 without touching the network.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use devdocs_ai::generate::{
    parse_generated_post, parse_generated_tutorial, post_user_prompt, tutorial_user_prompt,
    DEFAULT_FORMAT_INSTRUCTION, GENERATE_POST_SYSTEM, GENERATE_TUTORIAL_SYSTEM,
};
use devdocs_ai::stream::relay;
use devdocs_ai::{AiClient, Endpoint};
use devdocs_core::error::CoreError;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /ai/format`.
#[derive(Debug, Deserialize)]
pub struct FormatRequest {
    pub text: Option<String>,
    pub instruction: Option<String>,
}

/// Request body for the structured generation endpoints.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub prompt: Option<String>,
    /// Provider endpoint selector; defaults to the coding endpoint.
    #[serde(default)]
    pub endpoint: Option<Endpoint>,
}

/// The configured AI client, or 503 when the deployment has no key.
fn require_client(state: &AppState) -> Result<Arc<AiClient>, AppError> {
    state.ai.clone().ok_or_else(|| {
        AppError::Core(CoreError::NotConfigured(
            "AI capabilities are not configured (missing API key)".into(),
        ))
    })
}

/// A required, non-empty text field, or 400.
fn require_text<'a>(value: &'a Option<String>, what: &str) -> Result<&'a str, AppError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Core(CoreError::Validation(format!("{what} is required"))))
}

/// POST /ai/format
///
/// Rewrite raw text into a structured article, streaming the result
/// back as plain text with no fixed content length. An upstream failure
/// mid-stream aborts the response body (the client must treat an abrupt
/// end as failure); a client disconnect tears down the provider request.
pub async fn format_stream(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<FormatRequest>,
) -> AppResult<Response> {
    let text = require_text(&input.text, "Text content")?;
    let client = require_client(&state)?;

    let instruction = input
        .instruction
        .as_deref()
        .map(str::trim)
        .filter(|i| !i.is_empty())
        .unwrap_or(DEFAULT_FORMAT_INSTRUCTION);

    let upstream = client
        .chat_stream(Endpoint::Coding, instruction, text)
        .await?;

    tracing::info!(chars = text.len(), "AI format stream started");

    let body = Body::from_stream(relay(upstream));

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(body)
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    Ok(response)
}

/// POST /ai/generate-post
///
/// Generate a complete blog post draft as a single JSON document.
pub async fn generate_post(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<GenerateRequest>,
) -> AppResult<impl IntoResponse> {
    let prompt = require_text(&input.prompt, "Prompt")?;
    let client = require_client(&state)?;
    let endpoint = input.endpoint.unwrap_or_default();

    let raw = client
        .chat(endpoint, GENERATE_POST_SYSTEM, &post_user_prompt(prompt))
        .await?;

    let post = parse_generated_post(&raw)?;

    tracing::info!(title = %post.title, "AI post draft generated");

    Ok(Json(DataResponse { data: post }))
}

/// POST /ai/generate-tutorial
///
/// Generate a complete tutorial draft (title, metadata, steps) as a
/// single JSON document.
pub async fn generate_tutorial(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<GenerateRequest>,
) -> AppResult<impl IntoResponse> {
    let prompt = require_text(&input.prompt, "Prompt")?;
    let client = require_client(&state)?;

    let raw = client
        .chat(
            Endpoint::Coding,
            GENERATE_TUTORIAL_SYSTEM,
            &tutorial_user_prompt(prompt),
        )
        .await?;

    let tutorial = parse_generated_tutorial(&raw)?;

    tracing::info!(
        title = %tutorial.title,
        steps = tutorial.steps.len(),
        "AI tutorial draft generated"
    );

    Ok(Json(DataResponse { data: tutorial }))
}
