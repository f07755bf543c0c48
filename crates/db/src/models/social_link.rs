//! Social link models and DTOs.

use devdocs_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `social_links` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SocialLink {
    pub id: DbId,
    pub platform: String,
    pub url: String,
    pub icon: Option<String>,
    pub display_order: i32,
}

/// DTO for creating or replacing a social link.
#[derive(Debug, Deserialize)]
pub struct SocialLinkInput {
    pub platform: String,
    pub url: String,
    pub icon: Option<String>,
}
