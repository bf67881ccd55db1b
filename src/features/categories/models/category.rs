use serde::Serialize;
use sqlx::FromRow;

/// Database model for category
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}
