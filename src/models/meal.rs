use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MealCategory {
    pub id: i64,
    pub trainer_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Meal {
    pub id: i64,
    pub trainer_id: i64,
    pub category_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub calories: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateMealCategoryRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateMealRequest {
    pub name: String,
    pub category_id: Option<i64>,
    pub description: Option<String>,
    pub calories: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMealRequest {
    pub name: Option<String>,
    pub category_id: Option<i64>,
    pub description: Option<String>,
    pub calories: Option<i32>,
}
