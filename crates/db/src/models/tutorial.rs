//! Tutorial and tutorial-step models and DTOs.
//!
//! Two projections of the tutorials table exist: the full [`Tutorial`]
//! (dashboard reads, includes the unlock code) and [`PublicTutorial`]
//! (public reads, unlock code omitted so the shared secret never leaves
//! the server on an unauthenticated path).

use devdocs_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A full row from the `tutorials` table (dashboard projection).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tutorial {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub estimated_time: Option<String>,
    pub is_premium: bool,
    pub unlock_code: Option<String>,
    pub published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public projection of a tutorial row — excludes the unlock code.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublicTutorial {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub estimated_time: Option<String>,
    pub is_premium: bool,
    pub published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `tutorial_steps` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TutorialStep {
    pub id: DbId,
    pub tutorial_id: DbId,
    /// 1-based, dense, unique within the tutorial.
    pub step_order: i32,
    pub title: String,
    pub content: String,
    pub youtube_url: Option<String>,
}

/// A tutorial plus its ordered steps (dashboard projection).
#[derive(Debug, Serialize)]
pub struct TutorialWithSteps {
    #[serde(flatten)]
    pub tutorial: Tutorial,
    pub steps: Vec<TutorialStep>,
}

/// A tutorial plus its ordered steps (public projection).
#[derive(Debug, Serialize)]
pub struct PublicTutorialWithSteps {
    #[serde(flatten)]
    pub tutorial: PublicTutorial,
    pub steps: Vec<TutorialStep>,
}

/// DTO for one step in a create/update request. The order index is
/// derived from the position in the list, not supplied by the client.
#[derive(Debug, Deserialize)]
pub struct StepInput {
    pub title: String,
    pub content: String,
    pub youtube_url: Option<String>,
}

/// DTO for creating a new tutorial. The slug is generated from the
/// title; steps are inserted with dense 1-based order.
#[derive(Debug, Deserialize)]
pub struct CreateTutorial {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub estimated_time: Option<String>,
    pub is_premium: Option<bool>,
    pub unlock_code: Option<String>,
    pub published: Option<bool>,
    pub steps: Option<Vec<StepInput>>,
}

/// DTO for updating an existing tutorial.
///
/// When `steps` is present the step list is replaced wholesale
/// (delete-all-then-reinsert). An empty-string `unlock_code` clears the
/// stored code.
#[derive(Debug, Deserialize)]
pub struct UpdateTutorial {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub estimated_time: Option<String>,
    pub is_premium: Option<bool>,
    pub unlock_code: Option<String>,
    pub published: Option<bool>,
    pub steps: Option<Vec<StepInput>>,
}
