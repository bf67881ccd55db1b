use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, Transaction};

use crate::core::error::{AppError, Result};
use crate::features::products::formset::VersionRowForm;
use crate::features::products::models::{Product, ProductListRow, Version};
use crate::shared::forms::FormErrors;

/// Effective field set applied to a product write, after policy restriction.
/// `photo` is a replacement path; `None` keeps the stored one.
#[derive(Debug, Clone)]
pub struct ProductChanges {
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub price: Option<i32>,
    pub manufactured_at: Option<NaiveDate>,
    pub photo: Option<String>,
}

/// Service for product and version operations
pub struct ProductService {
    pool: PgPool,
}

impl ProductService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all products ordered by category name, then product name.
    pub async fn list(&self) -> Result<Vec<ProductListRow>> {
        let products = sqlx::query_as::<_, ProductListRow>(
            r#"
            SELECT p.id, p.name, p.photo, p.price, c.name AS category_name
            FROM products p
            LEFT JOIN categories c ON c.id = p.category_id
            ORDER BY c.name ASC NULLS LAST, p.name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list products: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(products)
    }

    pub async fn get(&self, id: i64) -> Result<Product> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, photo, category_id, price,
                   created_at, updated_at, owner_id, manufactured_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get product: {:?}", e);
            AppError::Database(e)
        })?;

        product.ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))
    }

    pub async fn versions_of(&self, product_id: i64) -> Result<Vec<Version>> {
        let versions = sqlx::query_as::<_, Version>(
            r#"
            SELECT id, product_id, version_number, version_name, is_version_active
            FROM versions
            WHERE product_id = $1
            ORDER BY version_number, version_name
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list versions: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(versions)
    }

    /// Create a product owned by `owner_id` together with its initial version
    /// rows, as one transaction.
    pub async fn create_with_versions(
        &self,
        owner_id: i64,
        changes: ProductChanges,
        versions: Vec<VersionRowForm>,
    ) -> Result<i64> {
        let mut tx = self.pool.begin().await?;

        Self::ensure_category_exists(&mut tx, changes.category_id).await?;

        let product_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO products (name, description, photo, category_id, price,
                                  owner_id, manufactured_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(&changes.photo)
        .bind(changes.category_id)
        .bind(changes.price)
        .bind(owner_id)
        .bind(changes.manufactured_at)
        .fetch_one(&mut *tx)
        .await?;

        Self::apply_version_rows(&mut tx, product_id, &versions).await?;

        tx.commit().await?;

        tracing::info!("Product created: id={}, owner={}", product_id, owner_id);

        Ok(product_id)
    }

    /// Apply an update to a product and its version rows as one transaction.
    /// `updated_at` is refreshed even when the submitted field set matches
    /// the stored one.
    pub async fn update_with_versions(
        &self,
        product_id: i64,
        changes: ProductChanges,
        versions: Vec<VersionRowForm>,
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        Self::ensure_category_exists(&mut tx, changes.category_id).await?;

        let updated = sqlx::query(
            r#"
            UPDATE products
            SET name = $1,
                description = $2,
                category_id = $3,
                price = $4,
                manufactured_at = $5,
                photo = COALESCE($6, photo),
                updated_at = CURRENT_DATE
            WHERE id = $7
            "#,
        )
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.category_id)
        .bind(changes.price)
        .bind(changes.manufactured_at)
        .bind(&changes.photo)
        .bind(product_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Product {} not found",
                product_id
            )));
        }

        Self::apply_version_rows(&mut tx, product_id, &versions).await?;

        tx.commit().await?;

        tracing::info!("Product updated: id={}", product_id);

        Ok(())
    }

    /// Referential validity of the submitted category, checked inside the
    /// transaction before any write so a failure leaves nothing behind.
    async fn ensure_category_exists(
        tx: &mut Transaction<'_, Postgres>,
        category_id: Option<i64>,
    ) -> Result<()> {
        let Some(category_id) = category_id else {
            return Ok(());
        };

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
                .bind(category_id)
                .fetch_one(&mut **tx)
                .await?;

        if !exists {
            let mut errors = FormErrors::new();
            errors.add("category", "Select a valid category");
            return Err(AppError::Validation(errors));
        }

        Ok(())
    }

    async fn apply_version_rows(
        tx: &mut Transaction<'_, Postgres>,
        product_id: i64,
        versions: &[VersionRowForm],
    ) -> Result<()> {
        for row in versions {
            match (row.id, row.delete) {
                (Some(version_id), true) => {
                    sqlx::query("DELETE FROM versions WHERE id = $1 AND product_id = $2")
                        .bind(version_id)
                        .bind(product_id)
                        .execute(&mut **tx)
                        .await?;
                }
                // Deleting a row that was never saved is a no-op
                (None, true) => {}
                (Some(version_id), false) => {
                    sqlx::query(
                        r#"
                        UPDATE versions
                        SET version_number = $1, version_name = $2, is_version_active = $3
                        WHERE id = $4 AND product_id = $5
                        "#,
                    )
                    .bind(&row.version_number)
                    .bind(&row.version_name)
                    .bind(row.is_version_active)
                    .bind(version_id)
                    .bind(product_id)
                    .execute(&mut **tx)
                    .await?;
                }
                (None, false) => {
                    sqlx::query(
                        r#"
                        INSERT INTO versions (product_id, version_number, version_name,
                                              is_version_active)
                        VALUES ($1, $2, $3, $4)
                        "#,
                    )
                    .bind(product_id)
                    .bind(&row.version_number)
                    .bind(&row.version_name)
                    .bind(row.is_version_active)
                    .execute(&mut **tx)
                    .await?;
                }
            }
        }

        Ok(())
    }
}
