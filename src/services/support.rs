use rand::Rng;
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::support::{
    CreateSupportMessageRequest, CreateTicketRequest, Sender, SupportMessage, SupportTicket,
    TicketResponse, UpdateTicketRequest,
};

/// `TK-` followed by eight digits. Uniqueness is enforced by the column
/// constraint; creation retries once on a collision.
pub fn new_ticket_number() -> String {
    let n: u32 = rand::thread_rng().gen_range(0..100_000_000);
    format!("TK-{n:08}")
}

pub struct SupportService;

impl SupportService {
    // ── Tickets ─────────────────────────────────────────────────────────

    pub async fn list_tickets(
        pool: &PgPool,
        trainer_id: i64,
    ) -> Result<Vec<SupportTicket>, StoreError> {
        let rows = sqlx::query_as::<_, SupportTicket>(
            "SELECT * FROM support_tickets WHERE trainer_id = $1
             ORDER BY created_at DESC, id DESC",
        )
        .bind(trainer_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_tickets_for_student(
        pool: &PgPool,
        student_id: i64,
    ) -> Result<Vec<SupportTicket>, StoreError> {
        let rows = sqlx::query_as::<_, SupportTicket>(
            "SELECT * FROM support_tickets WHERE student_id = $1
             ORDER BY created_at DESC, id DESC",
        )
        .bind(student_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_ticket(pool: &PgPool, id: i64) -> Result<SupportTicket, StoreError> {
        sqlx::query_as::<_, SupportTicket>("SELECT * FROM support_tickets WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(StoreError::from_fetch)
    }

    pub async fn create_ticket(
        pool: &PgPool,
        trainer_id: i64,
        opened_by: Sender,
        req: &CreateTicketRequest,
    ) -> Result<SupportTicket, StoreError> {
        if req.subject.trim().is_empty() {
            return Err(StoreError::Validation("موضوع تیکت الزامی است".into()));
        }
        let category = req.category.clone().unwrap_or_else(|| "general".into());
        let priority = req.priority.unwrap_or(crate::models::support::TicketPriority::Medium);

        let mut attempt = 0;
        let ticket = loop {
            let number = new_ticket_number();
            let res = sqlx::query_as::<_, SupportTicket>(
                "INSERT INTO support_tickets
                    (ticket_number, student_id, trainer_id, subject, category, priority)
                 VALUES ($1, $2, $3, $4, $5, $6)
                 RETURNING *",
            )
            .bind(&number)
            .bind(req.student_id)
            .bind(trainer_id)
            .bind(&req.subject)
            .bind(&category)
            .bind(priority.to_string())
            .fetch_one(pool)
            .await;

            match res {
                Ok(t) => break t,
                Err(sqlx::Error::Database(db)) if db.is_unique_violation() && attempt == 0 => {
                    attempt += 1;
                    continue;
                }
                Err(e) => return Err(StoreError::Database(e)),
            }
        };

        if let Some(message) = req.message.as_deref().filter(|m| !m.trim().is_empty()) {
            Self::add_response(pool, ticket.id, opened_by, message).await?;
        }
        Ok(ticket)
    }

    pub async fn update_ticket(
        pool: &PgPool,
        id: i64,
        req: &UpdateTicketRequest,
    ) -> Result<SupportTicket, StoreError> {
        sqlx::query_as::<_, SupportTicket>(
            "UPDATE support_tickets
             SET status     = COALESCE($1, status),
                 priority   = COALESCE($2, priority),
                 category   = COALESCE($3, category),
                 updated_at = NOW()
             WHERE id = $4
             RETURNING *",
        )
        .bind(req.status.map(|s| s.to_string()))
        .bind(req.priority.map(|p| p.to_string()))
        .bind(&req.category)
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(StoreError::from_fetch)
    }

    /// Responses first, then the ticket, in one transaction.
    pub async fn delete_ticket(pool: &PgPool, id: i64) -> Result<(), StoreError> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM ticket_responses WHERE ticket_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM support_tickets WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        tx.commit().await?;
        Ok(())
    }

    // ── Responses ───────────────────────────────────────────────────────

    pub async fn list_responses(
        pool: &PgPool,
        ticket_id: i64,
    ) -> Result<Vec<TicketResponse>, StoreError> {
        let rows = sqlx::query_as::<_, TicketResponse>(
            "SELECT * FROM ticket_responses WHERE ticket_id = $1 ORDER BY created_at, id",
        )
        .bind(ticket_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn add_response(
        pool: &PgPool,
        ticket_id: i64,
        sender: Sender,
        message: &str,
    ) -> Result<TicketResponse, StoreError> {
        if message.trim().is_empty() {
            return Err(StoreError::Validation("متن پاسخ الزامی است".into()));
        }
        let row = sqlx::query_as::<_, TicketResponse>(
            "INSERT INTO ticket_responses (ticket_id, sender, message)
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(ticket_id)
        .bind(sender.to_string())
        .bind(message)
        .fetch_one(pool)
        .await?;

        sqlx::query("UPDATE support_tickets SET updated_at = NOW() WHERE id = $1")
            .bind(ticket_id)
            .execute(pool)
            .await?;
        Ok(row)
    }

    // ── Messages ────────────────────────────────────────────────────────

    pub async fn list_messages(
        pool: &PgPool,
        trainer_id: i64,
    ) -> Result<Vec<SupportMessage>, StoreError> {
        let rows = sqlx::query_as::<_, SupportMessage>(
            "SELECT * FROM support_messages WHERE trainer_id = $1
             ORDER BY created_at DESC, id DESC",
        )
        .bind(trainer_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_messages_for_student(
        pool: &PgPool,
        student_id: i64,
    ) -> Result<Vec<SupportMessage>, StoreError> {
        let rows = sqlx::query_as::<_, SupportMessage>(
            "SELECT * FROM support_messages WHERE student_id = $1
             ORDER BY created_at DESC, id DESC",
        )
        .bind(student_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn send_message(
        pool: &PgPool,
        trainer_id: i64,
        sender: Sender,
        req: &CreateSupportMessageRequest,
    ) -> Result<SupportMessage, StoreError> {
        if req.message.trim().is_empty() {
            return Err(StoreError::Validation("متن پیام الزامی است".into()));
        }
        let row = sqlx::query_as::<_, SupportMessage>(
            "INSERT INTO support_messages (student_id, trainer_id, sender, message)
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(req.student_id)
        .bind(trainer_id)
        .bind(sender.to_string())
        .bind(&req.message)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    pub async fn mark_message_read(pool: &PgPool, id: i64) -> Result<SupportMessage, StoreError> {
        sqlx::query_as::<_, SupportMessage>(
            "UPDATE support_messages SET is_read = TRUE WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(StoreError::from_fetch)
    }

    /// Trainer-scoped purge of all support data: responses, tickets and
    /// messages, in one transaction.
    pub async fn clear_for_trainer(pool: &PgPool, trainer_id: i64) -> Result<(), StoreError> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "DELETE FROM ticket_responses WHERE ticket_id IN
                (SELECT id FROM support_tickets WHERE trainer_id = $1)",
        )
        .bind(trainer_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM support_tickets WHERE trainer_id = $1")
            .bind(trainer_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM support_messages WHERE trainer_id = $1")
            .bind(trainer_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_numbers_have_fixed_shape() {
        for _ in 0..50 {
            let n = new_ticket_number();
            assert!(n.starts_with("TK-"));
            assert_eq!(n.len(), 11);
            assert!(n[3..].chars().all(|c| c.is_ascii_digit()));
        }
    }
}
