use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SupplementCategory {
    pub id: i64,
    pub trainer_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Supplement {
    pub id: i64,
    pub trainer_id: i64,
    pub category_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub default_dosage: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSupplementCategoryRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateSupplementRequest {
    pub name: String,
    pub category_id: Option<i64>,
    pub description: Option<String>,
    pub default_dosage: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSupplementRequest {
    pub name: Option<String>,
    pub category_id: Option<i64>,
    pub description: Option<String>,
    pub default_dosage: Option<String>,
}
