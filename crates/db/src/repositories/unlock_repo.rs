//! Repository for the `tutorial_unlocks` table.

use devdocs_core::types::DbId;
use sqlx::PgPool;

/// Provides unlock-record operations.
pub struct UnlockRepo;

impl UnlockRepo {
    /// Whether an unlock record exists for `(tutorial_id, visitor)`.
    pub async fn exists(
        pool: &PgPool,
        tutorial_id: DbId,
        visitor_id: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (
                 SELECT 1 FROM tutorial_unlocks
                 WHERE tutorial_id = $1 AND user_identifier = $2
             )",
        )
        .bind(tutorial_id)
        .bind(visitor_id)
        .fetch_one(pool)
        .await
    }

    /// Record a successful unlock.
    ///
    /// Idempotent: a concurrent or repeated unlock for the same pair is
    /// absorbed by `ON CONFLICT DO NOTHING` rather than surfacing a
    /// duplicate-key error.
    pub async fn record(
        pool: &PgPool,
        tutorial_id: DbId,
        visitor_id: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO tutorial_unlocks (tutorial_id, user_identifier)
             VALUES ($1, $2)
             ON CONFLICT (tutorial_id, user_identifier) DO NOTHING",
        )
        .bind(tutorial_id)
        .bind(visitor_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Remove an unlock record (admin/testing revoke path).
    /// Returns `true` if a row was deleted.
    pub async fn delete(
        pool: &PgPool,
        tutorial_id: DbId,
        visitor_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM tutorial_unlocks
             WHERE tutorial_id = $1 AND user_identifier = $2",
        )
        .bind(tutorial_id)
        .bind(visitor_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All tutorial ids this visitor has unlocked.
    pub async fn tutorial_ids_for_visitor(
        pool: &PgPool,
        visitor_id: &str,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT tutorial_id FROM tutorial_unlocks
             WHERE user_identifier = $1
             ORDER BY tutorial_id",
        )
        .bind(visitor_id)
        .fetch_all(pool)
        .await
    }
}
