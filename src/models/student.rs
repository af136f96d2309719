use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: i64,
    pub trainer_id: i64,
    pub name: String,
    pub phone: String,
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub height_cm: Option<i32>,
    pub weight_kg: Option<i32>,
    pub goal_type: Option<String>,
    pub activity_level: Option<String>,
    pub medical_conditions: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateStudentRequest {
    pub name: String,
    pub phone: String,
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub height_cm: Option<i32>,
    pub weight_kg: Option<i32>,
    pub goal_type: Option<String>,
    pub activity_level: Option<String>,
    pub medical_conditions: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub height_cm: Option<i32>,
    pub weight_kg: Option<i32>,
    pub goal_type: Option<String>,
    pub activity_level: Option<String>,
    pub medical_conditions: Option<String>,
    pub is_active: Option<bool>,
}
