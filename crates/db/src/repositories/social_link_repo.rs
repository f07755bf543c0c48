//! Repository for the `social_links` table.

use devdocs_core::types::DbId;
use sqlx::PgPool;

use crate::models::social_link::{SocialLink, SocialLinkInput};

/// Column list for social_links queries.
const COLUMNS: &str = "id, platform, url, icon, display_order";

/// Provides CRUD operations for social links.
pub struct SocialLinkRepo;

impl SocialLinkRepo {
    /// All links in display order.
    pub async fn list(pool: &PgPool) -> Result<Vec<SocialLink>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM social_links ORDER BY display_order ASC");
        sqlx::query_as::<_, SocialLink>(&query).fetch_all(pool).await
    }

    /// Append a link after the current highest display order.
    pub async fn create(
        pool: &PgPool,
        input: &SocialLinkInput,
    ) -> Result<SocialLink, sqlx::Error> {
        let query = format!(
            "INSERT INTO social_links (platform, url, icon, display_order)
             VALUES ($1, $2, $3,
                     (SELECT COALESCE(MAX(display_order), 0) + 1 FROM social_links))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SocialLink>(&query)
            .bind(&input.platform)
            .bind(&input.url)
            .bind(&input.icon)
            .fetch_one(pool)
            .await
    }

    /// Update a link by ID, returning the updated row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &SocialLinkInput,
    ) -> Result<Option<SocialLink>, sqlx::Error> {
        let query = format!(
            "UPDATE social_links SET platform = $2, url = $3, icon = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SocialLink>(&query)
            .bind(id)
            .bind(&input.platform)
            .bind(&input.url)
            .bind(&input.icon)
            .fetch_optional(pool)
            .await
    }

    /// Delete a link by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM social_links WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace the full link list in one transaction, reassigning dense
    /// 1-based display order from list position.
    pub async fn replace_all(
        pool: &PgPool,
        links: &[SocialLinkInput],
    ) -> Result<Vec<SocialLink>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM social_links").execute(&mut *tx).await?;

        let query = format!(
            "INSERT INTO social_links (platform, url, icon, display_order)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let mut created = Vec::with_capacity(links.len());
        for (index, link) in links.iter().enumerate() {
            let row = sqlx::query_as::<_, SocialLink>(&query)
                .bind(&link.platform)
                .bind(&link.url)
                .bind(&link.icon)
                .bind((index + 1) as i32)
                .fetch_one(&mut *tx)
                .await?;
            created.push(row);
        }

        tx.commit().await?;
        Ok(created)
    }
}
