use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::blog::dtos::BlogFormDto;
use crate::features::blog::models::BlogPost;
use crate::shared::slug::slugify;

/// Service for blog post operations
pub struct BlogService {
    pool: PgPool,
}

impl BlogService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List published posts only, ordered by title.
    pub async fn list_published(&self) -> Result<Vec<BlogPost>> {
        let posts = sqlx::query_as::<_, BlogPost>(
            r#"
            SELECT id, title, slug, description, photo, created_at, is_published, views_count
            FROM blog_posts
            WHERE is_published = TRUE
            ORDER BY title
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list blog posts: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(posts)
    }

    /// Plain lookup, used by the edit form and the delete confirmation.
    pub async fn get(&self, id: i64) -> Result<BlogPost> {
        let post = sqlx::query_as::<_, BlogPost>(
            r#"
            SELECT id, title, slug, description, photo, created_at, is_published, views_count
            FROM blog_posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get blog post: {:?}", e);
            AppError::Database(e)
        })?;

        post.ok_or_else(|| AppError::NotFound(format!("Blog post {} not found", id)))
    }

    /// Detail read: increments the view counter atomically in the same
    /// statement that fetches the post, so concurrent reads cannot lose
    /// increments.
    pub async fn read_detail(&self, id: i64) -> Result<BlogPost> {
        let post = sqlx::query_as::<_, BlogPost>(
            r#"
            UPDATE blog_posts
            SET views_count = views_count + 1
            WHERE id = $1
            RETURNING id, title, slug, description, photo, created_at, is_published, views_count
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to read blog post: {:?}", e);
            AppError::Database(e)
        })?;

        post.ok_or_else(|| AppError::NotFound(format!("Blog post {} not found", id)))
    }

    /// Create a post. The slug is derived from the title before the write and
    /// stored in the same statement as the row itself.
    pub async fn create(&self, dto: BlogFormDto, photo: Option<String>) -> Result<i64> {
        let slug = slugify(&dto.title);

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO blog_posts (title, slug, description, photo)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&dto.title)
        .bind(&slug)
        .bind(&dto.description)
        .bind(&photo)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create blog post: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Blog post created: id={}, slug={}", id, slug);

        Ok(id)
    }

    /// Update title/description/photo; the slug is recomputed from the new
    /// title in the same statement.
    pub async fn update(&self, id: i64, dto: BlogFormDto, photo: Option<String>) -> Result<()> {
        let slug = slugify(&dto.title);

        let updated = sqlx::query(
            r#"
            UPDATE blog_posts
            SET title = $1,
                slug = $2,
                description = $3,
                photo = COALESCE($4, photo)
            WHERE id = $5
            "#,
        )
        .bind(&dto.title)
        .bind(&slug)
        .bind(&dto.description)
        .bind(&photo)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update blog post: {:?}", e);
            AppError::Database(e)
        })?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Blog post {} not found", id)));
        }

        tracing::info!("Blog post updated: id={}, slug={}", id, slug);

        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let deleted = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete blog post: {:?}", e);
                AppError::Database(e)
            })?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Blog post {} not found", id)));
        }

        tracing::info!("Blog post deleted: id={}", id);

        Ok(())
    }

    /// Flip the published flag. A single statement, so concurrent toggles
    /// serialize at the row; each call remains a state transition rather than
    /// a set-to-value write.
    pub async fn toggle_published(&self, id: i64) -> Result<bool> {
        let is_published = sqlx::query_scalar::<_, bool>(
            r#"
            UPDATE blog_posts
            SET is_published = NOT is_published
            WHERE id = $1
            RETURNING is_published
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to toggle blog post: {:?}", e);
            AppError::Database(e)
        })?;

        let is_published =
            is_published.ok_or_else(|| AppError::NotFound(format!("Blog post {} not found", id)))?;

        tracing::info!("Blog post toggled: id={}, is_published={}", id, is_published);

        Ok(is_published)
    }
}
