use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Append-only audit row. Written best-effort alongside primary mutations;
/// removed only by student cascade or trainer-scoped purge.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudentHistory {
    pub id: i64,
    pub student_id: i64,
    pub trainer_id: i64,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<i64>,
    pub changes: Option<serde_json::Value>,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// A history entry to record.
pub struct HistoryEntry {
    pub student_id: i64,
    pub trainer_id: i64,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<i64>,
    pub changes: Option<serde_json::Value>,
    pub description: String,
}
