//! Repository for the `project_scripts` table.

use devdocs_core::types::DbId;
use sqlx::PgPool;

use crate::models::project_script::{CreateProjectScript, ProjectScript, UpdateProjectScript};

/// Column list for project_scripts queries.
const COLUMNS: &str = "id, name, description, path, scripts, tags, created_at, updated_at";

/// Provides CRUD operations for project script entries.
pub struct ProjectScriptRepo;

impl ProjectScriptRepo {
    /// Create a new entry, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProjectScript,
    ) -> Result<ProjectScript, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_scripts (name, description, path, scripts, tags)
             VALUES ($1, COALESCE($2, ''), COALESCE($3, ''),
                     COALESCE($4, '[]'::jsonb), COALESCE($5, '{{}}'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectScript>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.path)
            .bind(&input.scripts)
            .bind(input.tags.clone())
            .fetch_one(pool)
            .await
    }

    /// Find an entry by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProjectScript>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_scripts WHERE id = $1");
        sqlx::query_as::<_, ProjectScript>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all entries, newest first, optionally filtered by a search
    /// term over name and description.
    pub async fn list(
        pool: &PgPool,
        search: Option<&str>,
    ) -> Result<Vec<ProjectScript>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_scripts
             WHERE ($1::text IS NULL
                    OR name ILIKE '%' || $1 || '%'
                    OR description ILIKE '%' || $1 || '%')
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ProjectScript>(&query)
            .bind(search)
            .fetch_all(pool)
            .await
    }

    /// Update an entry by ID, returning the updated row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProjectScript,
    ) -> Result<Option<ProjectScript>, sqlx::Error> {
        let query = format!(
            "UPDATE project_scripts SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                path = COALESCE($4, path),
                scripts = COALESCE($5, scripts),
                tags = COALESCE($6, tags),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectScript>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.path)
            .bind(&input.scripts)
            .bind(input.tags.clone())
            .fetch_optional(pool)
            .await
    }

    /// Delete an entry by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_scripts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
