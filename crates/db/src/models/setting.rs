//! Site settings models and DTOs.

use devdocs_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `settings` table: one free-form JSON document per
/// named section.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Setting {
    pub id: DbId,
    pub section: String,
    pub data: serde_json::Value,
    pub updated_at: Timestamp,
}

/// DTO for upserting settings: a map of section name to section data.
///
/// Sections not present in the map are left untouched.
#[derive(Debug, Deserialize)]
pub struct UpdateSettings {
    #[serde(flatten)]
    pub sections: serde_json::Map<String, serde_json::Value>,
}
