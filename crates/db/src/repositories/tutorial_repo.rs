//! Repository for the `tutorials` and `tutorial_steps` tables.
//!
//! Steps are always replaced wholesale: create and update run inside a
//! transaction that deletes any existing steps and reinserts the new
//! list with dense 1-based `step_order`.

use std::collections::HashMap;

use devdocs_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::tutorial::{
    CreateTutorial, PublicTutorial, PublicTutorialWithSteps, StepInput, Tutorial, TutorialStep,
    TutorialWithSteps, UpdateTutorial,
};

/// Column list for dashboard tutorial queries (includes the unlock code).
const COLUMNS: &str = "id, title, slug, description, category, difficulty, \
    estimated_time, is_premium, unlock_code, published, created_at, updated_at";

/// Column list for public tutorial queries (unlock code omitted).
const PUBLIC_COLUMNS: &str = "id, title, slug, description, category, difficulty, \
    estimated_time, is_premium, published, created_at, updated_at";

/// Column list for tutorial_steps queries.
const STEP_COLUMNS: &str = "id, tutorial_id, step_order, title, content, youtube_url";

/// Provides CRUD operations for tutorials and their steps.
pub struct TutorialRepo;

impl TutorialRepo {
    /// Create a tutorial and its steps in one transaction.
    pub async fn create(
        pool: &PgPool,
        slug: &str,
        input: &CreateTutorial,
    ) -> Result<TutorialWithSteps, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO tutorials
                (title, slug, description, category, difficulty, estimated_time,
                 is_premium, unlock_code, published)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, FALSE), $8, COALESCE($9, TRUE))
             RETURNING {COLUMNS}"
        );
        let tutorial = sqlx::query_as::<_, Tutorial>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.difficulty)
            .bind(&input.estimated_time)
            .bind(input.is_premium)
            .bind(&input.unlock_code)
            .bind(input.published)
            .fetch_one(&mut *tx)
            .await?;

        let steps = match &input.steps {
            Some(inputs) => insert_steps(&mut tx, tutorial.id, inputs).await?,
            None => Vec::new(),
        };

        tx.commit().await?;
        Ok(TutorialWithSteps { tutorial, steps })
    }

    /// Find a tutorial by ID (dashboard projection, no steps).
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tutorial>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tutorials WHERE id = $1");
        sqlx::query_as::<_, Tutorial>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a tutorial with its ordered steps (dashboard projection).
    pub async fn find_with_steps(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TutorialWithSteps>, sqlx::Error> {
        let Some(tutorial) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let steps = Self::steps_for(pool, id).await?;
        Ok(Some(TutorialWithSteps { tutorial, steps }))
    }

    /// Find a published tutorial by slug with its ordered steps
    /// (public projection).
    pub async fn find_published_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<PublicTutorialWithSteps>, sqlx::Error> {
        let query = format!(
            "SELECT {PUBLIC_COLUMNS} FROM tutorials WHERE slug = $1 AND published = TRUE"
        );
        let Some(tutorial) = sqlx::query_as::<_, PublicTutorial>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };

        let steps = Self::steps_for(pool, tutorial.id).await?;
        Ok(Some(PublicTutorialWithSteps { tutorial, steps }))
    }

    /// List all tutorials with steps, newest first (dashboard view).
    pub async fn list_all(pool: &PgPool) -> Result<Vec<TutorialWithSteps>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tutorials ORDER BY created_at DESC");
        let tutorials = sqlx::query_as::<_, Tutorial>(&query).fetch_all(pool).await?;

        let ids: Vec<DbId> = tutorials.iter().map(|t| t.id).collect();
        let mut steps_by_tutorial = Self::steps_grouped(pool, &ids).await?;

        Ok(tutorials
            .into_iter()
            .map(|tutorial| {
                let steps = steps_by_tutorial.remove(&tutorial.id).unwrap_or_default();
                TutorialWithSteps { tutorial, steps }
            })
            .collect())
    }

    /// List published tutorials with steps, newest first, optionally
    /// filtered by category (public view).
    pub async fn list_published(
        pool: &PgPool,
        category: Option<&str>,
    ) -> Result<Vec<PublicTutorialWithSteps>, sqlx::Error> {
        let query = format!(
            "SELECT {PUBLIC_COLUMNS} FROM tutorials
             WHERE published = TRUE
               AND ($1::text IS NULL OR category = $1)
             ORDER BY created_at DESC"
        );
        let tutorials = sqlx::query_as::<_, PublicTutorial>(&query)
            .bind(category)
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = tutorials.iter().map(|t| t.id).collect();
        let mut steps_by_tutorial = Self::steps_grouped(pool, &ids).await?;

        Ok(tutorials
            .into_iter()
            .map(|tutorial| {
                let steps = steps_by_tutorial.remove(&tutorial.id).unwrap_or_default();
                PublicTutorialWithSteps { tutorial, steps }
            })
            .collect())
    }

    /// Update a tutorial; when `input.steps` is present the step list
    /// is replaced wholesale inside the same transaction.
    ///
    /// An empty-string `unlock_code` clears the stored code; `None`
    /// leaves it unchanged.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        slug: Option<&str>,
        input: &UpdateTutorial,
    ) -> Result<Option<TutorialWithSteps>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE tutorials SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                category = COALESCE($5, category),
                difficulty = COALESCE($6, difficulty),
                estimated_time = COALESCE($7, estimated_time),
                is_premium = COALESCE($8, is_premium),
                unlock_code = CASE
                    WHEN $9::text IS NULL THEN unlock_code
                    WHEN $9 = '' THEN NULL
                    ELSE $9
                END,
                published = COALESCE($10, published),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let Some(tutorial) = sqlx::query_as::<_, Tutorial>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.difficulty)
            .bind(&input.estimated_time)
            .bind(input.is_premium)
            .bind(&input.unlock_code)
            .bind(input.published)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let steps = match &input.steps {
            Some(inputs) => {
                // Wholesale replacement: drop every existing step, then
                // reinsert with dense 1-based order.
                sqlx::query("DELETE FROM tutorial_steps WHERE tutorial_id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
                insert_steps(&mut tx, id, inputs).await?
            }
            None => Self::steps_for_tx(&mut tx, id).await?,
        };

        tx.commit().await?;
        Ok(Some(TutorialWithSteps { tutorial, steps }))
    }

    /// Delete a tutorial by ID (steps and unlocks cascade).
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tutorials WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Distinct non-null categories across all tutorials.
    pub async fn categories(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT DISTINCT category FROM tutorials
             WHERE category IS NOT NULL
             ORDER BY category",
        )
        .fetch_all(pool)
        .await
    }

    /// Ordered steps for one tutorial.
    pub async fn steps_for(pool: &PgPool, tutorial_id: DbId) -> Result<Vec<TutorialStep>, sqlx::Error> {
        let query = format!(
            "SELECT {STEP_COLUMNS} FROM tutorial_steps
             WHERE tutorial_id = $1
             ORDER BY step_order ASC"
        );
        sqlx::query_as::<_, TutorialStep>(&query)
            .bind(tutorial_id)
            .fetch_all(pool)
            .await
    }

    async fn steps_for_tx(
        tx: &mut Transaction<'_, Postgres>,
        tutorial_id: DbId,
    ) -> Result<Vec<TutorialStep>, sqlx::Error> {
        let query = format!(
            "SELECT {STEP_COLUMNS} FROM tutorial_steps
             WHERE tutorial_id = $1
             ORDER BY step_order ASC"
        );
        sqlx::query_as::<_, TutorialStep>(&query)
            .bind(tutorial_id)
            .fetch_all(&mut **tx)
            .await
    }

    /// Ordered steps for a set of tutorials, grouped by tutorial id.
    async fn steps_grouped(
        pool: &PgPool,
        tutorial_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<TutorialStep>>, sqlx::Error> {
        if tutorial_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let query = format!(
            "SELECT {STEP_COLUMNS} FROM tutorial_steps
             WHERE tutorial_id = ANY($1)
             ORDER BY tutorial_id, step_order ASC"
        );
        let rows = sqlx::query_as::<_, TutorialStep>(&query)
            .bind(tutorial_ids)
            .fetch_all(pool)
            .await?;

        let mut grouped: HashMap<DbId, Vec<TutorialStep>> = HashMap::new();
        for step in rows {
            grouped.entry(step.tutorial_id).or_default().push(step);
        }
        Ok(grouped)
    }
}

/// Insert steps with dense 1-based order, returning the created rows.
async fn insert_steps(
    tx: &mut Transaction<'_, Postgres>,
    tutorial_id: DbId,
    inputs: &[StepInput],
) -> Result<Vec<TutorialStep>, sqlx::Error> {
    let query = format!(
        "INSERT INTO tutorial_steps (tutorial_id, step_order, title, content, youtube_url)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING {STEP_COLUMNS}"
    );

    let mut steps = Vec::with_capacity(inputs.len());
    for (index, step) in inputs.iter().enumerate() {
        let row = sqlx::query_as::<_, TutorialStep>(&query)
            .bind(tutorial_id)
            .bind((index + 1) as i32)
            .bind(&step.title)
            .bind(&step.content)
            .bind(&step.youtube_url)
            .fetch_one(&mut **tx)
            .await?;
        steps.push(row);
    }
    Ok(steps)
}
