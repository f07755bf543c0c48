//! Premium unlock record model.

use devdocs_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `tutorial_unlocks` table.
///
/// Existence of a `(tutorial_id, user_identifier)` pair means the
/// visitor has previously supplied the correct unlock code. Rows are
/// never mutated; they are deleted only on the admin revoke path.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TutorialUnlock {
    pub id: DbId,
    pub tutorial_id: DbId,
    pub user_identifier: String,
    pub created_at: Timestamp,
}
