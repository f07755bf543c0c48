//! Repository for the `settings` table.

use sqlx::PgPool;

use crate::models::setting::Setting;

/// Column list for settings queries.
const COLUMNS: &str = "id, section, data, updated_at";

/// Provides per-section settings storage.
pub struct SettingsRepo;

impl SettingsRepo {
    /// All stored settings rows.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Setting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM settings ORDER BY section");
        sqlx::query_as::<_, Setting>(&query).fetch_all(pool).await
    }

    /// The stored row for one section, if any.
    pub async fn get_section(
        pool: &PgPool,
        section: &str,
    ) -> Result<Option<Setting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM settings WHERE section = $1");
        sqlx::query_as::<_, Setting>(&query)
            .bind(section)
            .fetch_optional(pool)
            .await
    }

    /// Insert or replace one section's data.
    ///
    /// Uses `ON CONFLICT (section) DO UPDATE` so the settings editor can
    /// save without caring whether the row exists yet.
    pub async fn upsert_section(
        pool: &PgPool,
        section: &str,
        data: &serde_json::Value,
    ) -> Result<Setting, sqlx::Error> {
        let query = format!(
            "INSERT INTO settings (section, data)
             VALUES ($1, $2)
             ON CONFLICT (section) DO UPDATE SET
                data = EXCLUDED.data,
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Setting>(&query)
            .bind(section)
            .bind(data)
            .fetch_one(pool)
            .await
    }

    /// Replace every stored section with the given defaults, in one
    /// transaction.
    pub async fn reset(
        pool: &PgPool,
        defaults: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM settings").execute(&mut *tx).await?;

        for (section, data) in defaults {
            sqlx::query("INSERT INTO settings (section, data) VALUES ($1, $2)")
                .bind(section)
                .bind(data)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await
    }
}
