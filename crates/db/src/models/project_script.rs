//! Project script models and DTOs.
//!
//! A project script entry is a quick-reference card: the project name,
//! its filesystem path, and a JSON list of labelled shell commands.

use devdocs_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `project_scripts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectScript {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub path: String,
    /// JSON array of `{ "label": ..., "command": ... }` objects.
    pub scripts: serde_json::Value,
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project script entry.
#[derive(Debug, Deserialize)]
pub struct CreateProjectScript {
    pub name: String,
    pub description: Option<String>,
    pub path: Option<String>,
    pub scripts: Option<serde_json::Value>,
    pub tags: Option<Vec<String>>,
}

/// DTO for updating an existing project script entry.
#[derive(Debug, Deserialize)]
pub struct UpdateProjectScript {
    pub name: Option<String>,
    pub description: Option<String>,
    pub path: Option<String>,
    pub scripts: Option<serde_json::Value>,
    pub tags: Option<Vec<String>>,
}
