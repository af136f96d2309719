use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::trainer::{Trainer, TrainerProfile, UpdateTrainerProfileRequest};

pub struct TenantService;

impl TenantService {
    /// Resolve a trainer id for a phone number, provisioning the trainer and
    /// a placeholder profile on first contact. Idempotent: the uniqueness
    /// constraint on phone absorbs concurrent first contacts, and the loser
    /// re-fetches instead of failing.
    pub async fn ensure_trainer_exists(pool: &PgPool, phone: &str) -> Result<i64, StoreError> {
        if let Some(id) = Self::find_by_phone(pool, phone).await? {
            return Ok(id);
        }

        let username = format!("trainer_{phone}");
        let mut tx = pool.begin().await?;

        let inserted: Option<i64> = sqlx::query_scalar(
            "INSERT INTO trainers (phone, username) VALUES ($1, $2)
             ON CONFLICT (phone) DO NOTHING
             RETURNING id",
        )
        .bind(phone)
        .bind(&username)
        .fetch_optional(&mut *tx)
        .await?;

        match inserted {
            Some(id) => {
                sqlx::query(
                    "INSERT INTO trainer_profiles (trainer_id, gym_name, bio, address)
                     VALUES ($1, 'باشگاه من', 'مربی بدنسازی', '')
                     ON CONFLICT (trainer_id) DO NOTHING",
                )
                .bind(id)
                .execute(&mut *tx)
                .await?;
                tx.commit().await?;
                tracing::info!("provisioned trainer for phone {phone} (id {id})");
                Ok(id)
            }
            None => {
                // Lost the race: another request inserted this phone first.
                tx.rollback().await?;
                Self::find_by_phone(pool, phone)
                    .await?
                    .ok_or(StoreError::TrainerNotFound)
            }
        }
    }

    /// The bootstrap trainer used by student-facing endpoints that have not
    /// been migrated to per-student tenant derivation. Missing bootstrap is a
    /// fatal configuration error.
    pub async fn get_default_trainer_id(
        pool: &PgPool,
        default_phone: &str,
    ) -> Result<i64, StoreError> {
        Self::find_by_phone(pool, default_phone)
            .await?
            .ok_or(StoreError::TrainerNotFound)
    }

    async fn find_by_phone(pool: &PgPool, phone: &str) -> Result<Option<i64>, StoreError> {
        let id = sqlx::query_scalar("SELECT id FROM trainers WHERE phone = $1")
            .bind(phone)
            .fetch_optional(pool)
            .await?;
        Ok(id)
    }

    pub async fn get_trainer(pool: &PgPool, id: i64) -> Result<Trainer, StoreError> {
        sqlx::query_as::<_, Trainer>("SELECT * FROM trainers WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(StoreError::from_fetch)
    }

    pub async fn get_profile(pool: &PgPool, trainer_id: i64) -> Result<TrainerProfile, StoreError> {
        sqlx::query_as::<_, TrainerProfile>(
            "SELECT * FROM trainer_profiles WHERE trainer_id = $1",
        )
        .bind(trainer_id)
        .fetch_one(pool)
        .await
        .map_err(StoreError::from_fetch)
    }

    pub async fn update_profile(
        pool: &PgPool,
        trainer_id: i64,
        req: &UpdateTrainerProfileRequest,
    ) -> Result<TrainerProfile, StoreError> {
        sqlx::query_as::<_, TrainerProfile>(
            "UPDATE trainer_profiles
             SET gym_name  = COALESCE($1, gym_name),
                 bio       = COALESCE($2, bio),
                 address   = COALESCE($3, address),
                 instagram = COALESCE($4, instagram),
                 telegram  = COALESCE($5, telegram),
                 website   = COALESCE($6, website),
                 updated_at = NOW()
             WHERE trainer_id = $7
             RETURNING *",
        )
        .bind(&req.gym_name)
        .bind(&req.bio)
        .bind(&req.address)
        .bind(&req.instagram)
        .bind(&req.telegram)
        .bind(&req.website)
        .bind(trainer_id)
        .fetch_one(pool)
        .await
        .map_err(StoreError::from_fetch)
    }
}
