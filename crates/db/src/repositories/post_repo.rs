//! Repository for the `blog_posts` table.

use devdocs_core::search::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use devdocs_core::types::DbId;
use sqlx::PgPool;

use crate::models::post::{CreatePost, Post, PostStats, UpdatePost};

/// Column list for blog_posts queries.
const COLUMNS: &str = "id, title, slug, excerpt, content, category, tags, \
    featured_image, author, published, created_at, updated_at";

/// Provides CRUD operations for blog posts.
pub struct PostRepo;

impl PostRepo {
    /// Create a new post, returning the created row.
    ///
    /// The slug is computed by the caller (from the title) so slug
    /// generation stays in the domain layer.
    pub async fn create(
        pool: &PgPool,
        slug: &str,
        input: &CreatePost,
    ) -> Result<Post, sqlx::Error> {
        let query = format!(
            "INSERT INTO blog_posts
                (title, slug, excerpt, content, category, tags, featured_image, author, published)
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, 'Admin'), COALESCE($9, FALSE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.excerpt)
            .bind(&input.content)
            .bind(&input.category)
            .bind(input.tags.clone().unwrap_or_default())
            .bind(&input.featured_image)
            .bind(&input.author)
            .bind(input.published)
            .fetch_one(pool)
            .await
    }

    /// Find a post by its ID (any publish state).
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_posts WHERE id = $1");
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a published post by its slug.
    pub async fn find_published_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Post>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM blog_posts WHERE slug = $1 AND published = TRUE");
        sqlx::query_as::<_, Post>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List all posts, newest first (dashboard view).
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Post>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_posts ORDER BY created_at DESC");
        sqlx::query_as::<_, Post>(&query).fetch_all(pool).await
    }

    /// List published posts, newest first, optionally filtered by
    /// category and/or a search term over title, excerpt, and tags.
    pub async fn list_published(
        pool: &PgPool,
        category: Option<&str>,
        search: Option<&str>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Post>, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
        let offset = clamp_offset(offset);
        let query = format!(
            "SELECT {COLUMNS} FROM blog_posts
             WHERE published = TRUE
               AND ($1::text IS NULL OR category = $1)
               AND ($2::text IS NULL
                    OR title ILIKE '%' || $2 || '%'
                    OR excerpt ILIKE '%' || $2 || '%'
                    OR array_to_string(tags, ' ') ILIKE '%' || $2 || '%')
             ORDER BY created_at DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(category)
            .bind(search)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a post by ID, returning the updated row.
    ///
    /// `slug` is `Some` when the title changed and a new slug was
    /// generated by the caller.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        slug: Option<&str>,
        input: &UpdatePost,
    ) -> Result<Option<Post>, sqlx::Error> {
        let query = format!(
            "UPDATE blog_posts SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                excerpt = COALESCE($4, excerpt),
                content = COALESCE($5, content),
                category = COALESCE($6, category),
                tags = COALESCE($7, tags),
                featured_image = COALESCE($8, featured_image),
                author = COALESCE($9, author),
                published = COALESCE($10, published),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.excerpt)
            .bind(&input.content)
            .bind(&input.category)
            .bind(input.tags.clone())
            .bind(&input.featured_image)
            .bind(&input.author)
            .bind(input.published)
            .fetch_optional(pool)
            .await
    }

    /// Delete a post by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Distinct non-null categories across all posts.
    pub async fn categories(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT DISTINCT category FROM blog_posts
             WHERE category IS NOT NULL
             ORDER BY category",
        )
        .fetch_all(pool)
        .await
    }

    /// Distinct tags across all posts.
    pub async fn tags(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT DISTINCT unnest(tags) AS tag FROM blog_posts ORDER BY tag",
        )
        .fetch_all(pool)
        .await
    }

    /// Post counts for the dashboard overview.
    pub async fn stats(pool: &PgPool) -> Result<PostStats, sqlx::Error> {
        sqlx::query_as::<_, PostStats>(
            "SELECT COUNT(*) AS total_posts,
                    COUNT(*) FILTER (WHERE published) AS published_posts,
                    COUNT(*) FILTER (WHERE NOT published) AS draft_posts,
                    COUNT(DISTINCT category) AS categories
             FROM blog_posts",
        )
        .fetch_one(pool)
        .await
    }
}
