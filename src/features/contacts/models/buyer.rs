use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Database model for a contact message. Write-only from the application's
/// perspective: created by the contact form, never updated or displayed back.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Buyer {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
