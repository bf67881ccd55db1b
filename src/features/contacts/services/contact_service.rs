use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::contacts::dtos::ContactFormDto;
use crate::features::contacts::models::Buyer;

/// Service for contact-message intake
pub struct ContactService {
    pool: PgPool,
}

impl ContactService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a contact message exactly as submitted.
    pub async fn create(&self, dto: ContactFormDto) -> Result<Buyer> {
        let buyer = sqlx::query_as::<_, Buyer>(
            r#"
            INSERT INTO buyers (name, phone, message)
            VALUES ($1, $2, $3)
            RETURNING id, name, phone, message, created_at
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.phone)
        .bind(&dto.message)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create contact message: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Contact message received: id={}", buyer.id);

        Ok(buyer)
    }
}
