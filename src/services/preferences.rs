use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::preference::{PrefIdentity, UserPreference};

/// Generic per-identity key/value store, a server-side replacement for
/// client local storage. Rows are unique per (identity, key); `set` is a
/// fetch-then-update upsert because the composite key spans nullable
/// columns, so a database-level upsert cannot be relied on.
pub struct PreferenceService;

impl PreferenceService {
    pub async fn get(
        pool: &PgPool,
        identity: &PrefIdentity,
        key: &str,
    ) -> Result<Option<UserPreference>, StoreError> {
        let row = match identity {
            PrefIdentity::User(uid) => {
                sqlx::query_as::<_, UserPreference>(
                    "SELECT * FROM user_preferences
                     WHERE user_id = $1 AND session_id IS NULL AND pref_key = $2",
                )
                .bind(uid)
                .bind(key)
                .fetch_optional(pool)
                .await?
            }
            PrefIdentity::Session(sid) => {
                sqlx::query_as::<_, UserPreference>(
                    "SELECT * FROM user_preferences
                     WHERE session_id = $1 AND user_id IS NULL AND pref_key = $2",
                )
                .bind(sid)
                .bind(key)
                .fetch_optional(pool)
                .await?
            }
        };
        Ok(row)
    }

    pub async fn set(
        pool: &PgPool,
        identity: &PrefIdentity,
        key: &str,
        value: &str,
    ) -> Result<UserPreference, StoreError> {
        if let Some(existing) = Self::get(pool, identity, key).await? {
            let row = sqlx::query_as::<_, UserPreference>(
                "UPDATE user_preferences SET pref_value = $1, updated_at = NOW()
                 WHERE id = $2 RETURNING *",
            )
            .bind(value)
            .bind(existing.id)
            .fetch_one(pool)
            .await?;
            return Ok(row);
        }

        let (user_id, session_id) = match identity {
            PrefIdentity::User(uid) => (Some(*uid), None),
            PrefIdentity::Session(sid) => (None, Some(sid.clone())),
        };
        let row = sqlx::query_as::<_, UserPreference>(
            "INSERT INTO user_preferences (user_id, session_id, pref_key, pref_value)
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(user_id)
        .bind(session_id)
        .bind(key)
        .bind(value)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    pub async fn remove(
        pool: &PgPool,
        identity: &PrefIdentity,
        key: &str,
    ) -> Result<(), StoreError> {
        match identity {
            PrefIdentity::User(uid) => {
                sqlx::query(
                    "DELETE FROM user_preferences
                     WHERE user_id = $1 AND session_id IS NULL AND pref_key = $2",
                )
                .bind(uid)
                .bind(key)
                .execute(pool)
                .await?
            }
            PrefIdentity::Session(sid) => {
                sqlx::query(
                    "DELETE FROM user_preferences
                     WHERE session_id = $1 AND user_id IS NULL AND pref_key = $2",
                )
                .bind(sid)
                .bind(key)
                .execute(pool)
                .await?
            }
        };
        Ok(())
    }

    pub async fn list(
        pool: &PgPool,
        identity: &PrefIdentity,
    ) -> Result<Vec<UserPreference>, StoreError> {
        let rows = match identity {
            PrefIdentity::User(uid) => {
                sqlx::query_as::<_, UserPreference>(
                    "SELECT * FROM user_preferences
                     WHERE user_id = $1 AND session_id IS NULL ORDER BY pref_key",
                )
                .bind(uid)
                .fetch_all(pool)
                .await?
            }
            PrefIdentity::Session(sid) => {
                sqlx::query_as::<_, UserPreference>(
                    "SELECT * FROM user_preferences
                     WHERE session_id = $1 AND user_id IS NULL ORDER BY pref_key",
                )
                .bind(sid)
                .fetch_all(pool)
                .await?
            }
        };
        Ok(rows)
    }

    /// Clear specific keys, or everything for the identity when `keys` is
    /// absent.
    pub async fn reset(
        pool: &PgPool,
        identity: &PrefIdentity,
        keys: Option<&[String]>,
    ) -> Result<(), StoreError> {
        match keys {
            Some(keys) => {
                for key in keys {
                    Self::remove(pool, identity, key).await?;
                }
            }
            None => match identity {
                PrefIdentity::User(uid) => {
                    sqlx::query(
                        "DELETE FROM user_preferences WHERE user_id = $1 AND session_id IS NULL",
                    )
                    .bind(uid)
                    .execute(pool)
                    .await?;
                }
                PrefIdentity::Session(sid) => {
                    sqlx::query(
                        "DELETE FROM user_preferences WHERE session_id = $1 AND user_id IS NULL",
                    )
                    .bind(sid)
                    .execute(pool)
                    .await?;
                }
            },
        }
        Ok(())
    }
}
