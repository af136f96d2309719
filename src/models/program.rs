use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudentExerciseProgram {
    pub id: i64,
    pub student_id: i64,
    pub exercise_id: i64,
    pub day_of_week: i16,
    pub sets: i32,
    pub reps: String,
    pub weight: Option<String>,
    pub rest_seconds: Option<i32>,
    pub notes: Option<String>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudentMealPlan {
    pub id: i64,
    pub student_id: i64,
    pub meal_id: i64,
    pub day_of_week: i16,
    pub notes: Option<String>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudentSupplement {
    pub id: i64,
    pub student_id: i64,
    pub supplement_id: i64,
    pub dosage: String,
    pub frequency: String,
    pub instructions: Option<String>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateExerciseProgramRequest {
    pub exercise_id: i64,
    pub day_of_week: i16,
    pub sets: i32,
    pub reps: String,
    pub weight: Option<String>,
    pub rest_seconds: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateExerciseProgramRequest {
    pub exercise_id: Option<i64>,
    pub day_of_week: Option<i16>,
    pub sets: Option<i32>,
    pub reps: Option<String>,
    pub weight: Option<String>,
    pub rest_seconds: Option<i32>,
    pub notes: Option<String>,
    pub is_completed: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMealPlanRequest {
    pub meal_id: i64,
    pub day_of_week: i16,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMealPlanRequest {
    pub meal_id: Option<i64>,
    pub day_of_week: Option<i16>,
    pub notes: Option<String>,
    pub is_completed: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudentSupplementRequest {
    pub supplement_id: i64,
    pub dosage: String,
    pub frequency: String,
    pub instructions: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStudentSupplementRequest {
    pub supplement_id: Option<i64>,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub instructions: Option<String>,
    pub is_completed: Option<bool>,
}

/// Bulk save for a single day: the existing rows for (student, day) are
/// deleted and `items` inserted as fresh rows.
#[derive(Debug, Deserialize)]
pub struct BulkProgramRequest {
    pub day: i16,
    pub items: Vec<BulkProgramItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BulkProgramItem {
    pub exercise_id: i64,
    pub sets: i32,
    pub reps: String,
    pub weight: Option<String>,
    pub rest_seconds: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BulkMealPlanRequest {
    pub day: i16,
    pub items: Vec<BulkMealPlanItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BulkMealPlanItem {
    pub meal_id: i64,
    pub notes: Option<String>,
}

/// Supplement bulk save replaces the student's whole supplement set — it is
/// not scoped by day.
#[derive(Debug, Deserialize)]
pub struct BulkSupplementRequest {
    pub items: Vec<CreateStudentSupplementRequest>,
}
