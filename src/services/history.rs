use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::history::{HistoryEntry, StudentHistory};

pub struct HistoryService;

impl HistoryService {
    /// Fire-and-forget history entry. Spawns a background task — never
    /// blocks the request handler, never propagates errors (logs a warning
    /// on failure). The primary mutation is the source of truth; the history
    /// log is best-effort.
    pub fn log(pool: PgPool, entry: HistoryEntry) {
        tokio::spawn(async move {
            let res = sqlx::query(
                "INSERT INTO student_history
                    (student_id, trainer_id, action, entity_type, entity_id, changes, description)
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .bind(entry.student_id)
            .bind(entry.trainer_id)
            .bind(&entry.action)
            .bind(&entry.entity_type)
            .bind(entry.entity_id)
            .bind(&entry.changes)
            .bind(&entry.description)
            .execute(&pool)
            .await;

            if let Err(e) = res {
                tracing::warn!(
                    "history insert failed for student {}: {e}",
                    entry.student_id
                );
            }
        });
    }

    pub async fn list_for_student(
        pool: &PgPool,
        student_id: i64,
    ) -> Result<Vec<StudentHistory>, StoreError> {
        let rows = sqlx::query_as::<_, StudentHistory>(
            "SELECT * FROM student_history WHERE student_id = $1
             ORDER BY created_at DESC, id DESC",
        )
        .bind(student_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    /// Trainer-scoped bulk purge — the only deletion path besides the
    /// student cascade.
    pub async fn purge_for_trainer(pool: &PgPool, trainer_id: i64) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM student_history WHERE trainer_id = $1")
            .bind(trainer_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
