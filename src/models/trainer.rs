use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Trainer {
    pub id: i64,
    pub phone: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// 1:1 display/business metadata for a trainer. Created lazily with
/// placeholder text on first contact.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TrainerProfile {
    pub id: i64,
    pub trainer_id: i64,
    pub gym_name: String,
    pub bio: String,
    pub address: String,
    pub instagram: Option<String>,
    pub telegram: Option<String>,
    pub website: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTrainerProfileRequest {
    pub gym_name: Option<String>,
    pub bio: Option<String>,
    pub address: Option<String>,
    pub instagram: Option<String>,
    pub telegram: Option<String>,
    pub website: Option<String>,
}
