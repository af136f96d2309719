use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExerciseType {
    pub id: i64,
    pub trainer_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExerciseCategory {
    pub id: i64,
    pub trainer_id: i64,
    pub type_id: Option<i64>,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Exercise {
    pub id: i64,
    pub trainer_id: i64,
    pub category_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateExerciseTypeRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateExerciseCategoryRequest {
    pub name: String,
    pub type_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateExerciseCategoryRequest {
    pub name: Option<String>,
    pub type_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateExerciseRequest {
    pub name: String,
    pub category_id: Option<i64>,
    pub description: Option<String>,
    pub video_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateExerciseRequest {
    pub name: Option<String>,
    pub category_id: Option<i64>,
    pub description: Option<String>,
    pub video_url: Option<String>,
}
