use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// Database model for product
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub photo: Option<String>,
    pub category_id: Option<i64>,
    pub price: Option<i32>,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
    pub owner_id: i64,
    pub manufactured_at: Option<NaiveDate>,
}

/// Row for the product list page: product joined with its category name.
/// Ordering (category name, then product name) comes from the query.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductListRow {
    pub id: i64,
    pub name: String,
    pub photo: Option<String>,
    pub price: Option<i32>,
    pub category_name: Option<String>,
}
