use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::session::{AuthSession, SessionData};

fn session_key(sid: &str) -> String {
    format!("sess:{sid}")
}

/// Server-side session store backed by Redis. Sessions expire with the key
/// TTL; there is no refresh mechanism.
pub struct SessionStore;

impl SessionStore {
    pub fn new_session_id() -> String {
        Uuid::new_v4().to_string()
    }

    pub async fn load(
        redis: &mut redis::aio::MultiplexedConnection,
        sid: &str,
    ) -> Result<Option<SessionData>, StoreError> {
        let raw: Option<String> = redis::cmd("GET")
            .arg(session_key(sid))
            .query_async(redis)
            .await?;
        match raw {
            Some(json) => match serde_json::from_str(&json) {
                Ok(data) => Ok(Some(data)),
                Err(e) => {
                    // Corrupt session blob: treat as absent rather than 500.
                    tracing::warn!("dropping unreadable session {sid}: {e}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    pub async fn save(
        redis: &mut redis::aio::MultiplexedConnection,
        sid: &str,
        data: &SessionData,
        ttl_seconds: u64,
    ) -> Result<(), StoreError> {
        let json = serde_json::to_string(data)
            .map_err(|e| StoreError::Validation(format!("session serialization: {e}")))?;
        let _: () = redis::cmd("SET")
            .arg(session_key(sid))
            .arg(json)
            .arg("EX")
            .arg(ttl_seconds)
            .query_async(redis)
            .await?;
        Ok(())
    }

    pub async fn destroy(
        redis: &mut redis::aio::MultiplexedConnection,
        sid: &str,
    ) -> Result<(), StoreError> {
        let _: () = redis::cmd("DEL")
            .arg(session_key(sid))
            .query_async(redis)
            .await?;
        Ok(())
    }
}

/// Login/lockout state persisted per session token.
pub struct AuthSessionStore;

impl AuthSessionStore {
    pub async fn get(pool: &PgPool, token: &str) -> Result<Option<AuthSession>, StoreError> {
        let row = sqlx::query_as::<_, AuthSession>(
            "SELECT * FROM auth_sessions WHERE session_token = $1",
        )
        .bind(token)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    /// Record a failed login attempt, locking the session once `max_attempts`
    /// is reached. Returns the updated attempt count.
    pub async fn record_failed_attempt(
        pool: &PgPool,
        token: &str,
        phone: &str,
        max_attempts: i32,
        lockout_minutes: i64,
    ) -> Result<i32, StoreError> {
        let attempts: i32 = sqlx::query_scalar(
            "INSERT INTO auth_sessions (session_token, phone, attempts)
             VALUES ($1, $2, 1)
             ON CONFLICT (session_token) DO UPDATE
                SET attempts = auth_sessions.attempts + 1,
                    phone = EXCLUDED.phone,
                    updated_at = NOW()
             RETURNING attempts",
        )
        .bind(token)
        .bind(phone)
        .fetch_one(pool)
        .await?;

        if attempts >= max_attempts {
            sqlx::query(
                "UPDATE auth_sessions
                 SET locked_until = NOW() + make_interval(mins => $2), updated_at = NOW()
                 WHERE session_token = $1",
            )
            .bind(token)
            .bind(lockout_minutes as i32)
            .execute(pool)
            .await?;
        }
        Ok(attempts)
    }

    /// Lock check: Some(locked_until) when the session is still locked out.
    pub async fn locked_until(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<DateTime<Utc>>, StoreError> {
        let locked: Option<Option<DateTime<Utc>>> = sqlx::query_scalar(
            "SELECT locked_until FROM auth_sessions WHERE session_token = $1",
        )
        .bind(token)
        .fetch_optional(pool)
        .await?;
        Ok(locked.flatten().filter(|until| *until > Utc::now()))
    }

    /// Successful login: clear attempt state and stamp the remember-me expiry.
    pub async fn reset(
        pool: &PgPool,
        token: &str,
        remember_expires_at: Option<DateTime<Utc>>,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO auth_sessions (session_token, attempts, remember_expires_at)
             VALUES ($1, 0, $2)
             ON CONFLICT (session_token) DO UPDATE
                SET attempts = 0,
                    locked_until = NULL,
                    remember_expires_at = EXCLUDED.remember_expires_at,
                    updated_at = NOW()",
        )
        .bind(token)
        .bind(remember_expires_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn delete(pool: &PgPool, token: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM auth_sessions WHERE session_token = $1")
            .bind(token)
            .execute(pool)
            .await?;
        Ok(())
    }
}
