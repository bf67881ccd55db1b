use std::sync::Arc;

use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::categories::cache::CategoryCache;
use crate::features::categories::models::Category;

/// Read path for categories. Writes go through the admin surface, which is
/// outside this service.
pub struct CategoryService {
    pool: PgPool,
    cache: Arc<CategoryCache>,
}

impl CategoryService {
    pub fn new(pool: PgPool, cache: Arc<CategoryCache>) -> Self {
        Self { pool, cache }
    }

    /// List all categories, read-through the injected cache.
    pub async fn list(&self) -> Result<Vec<Category>> {
        if let Some(cached) = self.cache.get().await {
            return Ok(cached);
        }

        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description
            FROM categories
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        self.cache.put(categories.clone()).await;

        Ok(categories)
    }
}
