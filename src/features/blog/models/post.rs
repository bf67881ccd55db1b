use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// Database model for a blog post
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BlogPost {
    pub id: i64,
    pub title: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub photo: Option<String>,
    pub created_at: NaiveDate,
    pub is_published: bool,
    pub views_count: i64,
}
