use serde::Serialize;
use sqlx::FromRow;

/// Database model for a product version record
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Version {
    pub id: i64,
    pub product_id: Option<i64>,
    pub version_number: Option<String>,
    pub version_name: Option<String>,
    pub is_version_active: bool,
}
