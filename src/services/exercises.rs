use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::exercise::{
    CreateExerciseCategoryRequest, CreateExerciseRequest, CreateExerciseTypeRequest, Exercise,
    ExerciseCategory, ExerciseType, UpdateExerciseCategoryRequest, UpdateExerciseRequest,
};

/// CRUD over the exercise catalog hierarchy (type → category → exercise).
/// Every query is trainer-scoped.
pub struct ExerciseService;

impl ExerciseService {
    // ── Types ───────────────────────────────────────────────────────────

    pub async fn list_types(
        pool: &PgPool,
        trainer_id: i64,
    ) -> Result<Vec<ExerciseType>, StoreError> {
        let rows = sqlx::query_as::<_, ExerciseType>(
            "SELECT * FROM exercise_types WHERE trainer_id = $1 ORDER BY name, id",
        )
        .bind(trainer_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn create_type(
        pool: &PgPool,
        trainer_id: i64,
        req: &CreateExerciseTypeRequest,
    ) -> Result<ExerciseType, StoreError> {
        if req.name.trim().is_empty() {
            return Err(StoreError::Validation("نام نوع تمرین الزامی است".into()));
        }
        let row = sqlx::query_as::<_, ExerciseType>(
            "INSERT INTO exercise_types (trainer_id, name) VALUES ($1, $2) RETURNING *",
        )
        .bind(trainer_id)
        .bind(&req.name)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    pub async fn update_type(
        pool: &PgPool,
        id: i64,
        name: &str,
    ) -> Result<ExerciseType, StoreError> {
        sqlx::query_as::<_, ExerciseType>(
            "UPDATE exercise_types SET name = $1 WHERE id = $2 RETURNING *",
        )
        .bind(name)
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(StoreError::from_fetch)
    }

    pub async fn delete_type(pool: &PgPool, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM exercise_types WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    // ── Categories ──────────────────────────────────────────────────────

    pub async fn list_categories(
        pool: &PgPool,
        trainer_id: i64,
    ) -> Result<Vec<ExerciseCategory>, StoreError> {
        let rows = sqlx::query_as::<_, ExerciseCategory>(
            "SELECT * FROM exercise_categories WHERE trainer_id = $1 ORDER BY name, id",
        )
        .bind(trainer_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn create_category(
        pool: &PgPool,
        trainer_id: i64,
        req: &CreateExerciseCategoryRequest,
    ) -> Result<ExerciseCategory, StoreError> {
        if req.name.trim().is_empty() {
            return Err(StoreError::Validation("نام دسته‌بندی الزامی است".into()));
        }
        let row = sqlx::query_as::<_, ExerciseCategory>(
            "INSERT INTO exercise_categories (trainer_id, type_id, name)
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(trainer_id)
        .bind(req.type_id)
        .bind(&req.name)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    pub async fn update_category(
        pool: &PgPool,
        id: i64,
        req: &UpdateExerciseCategoryRequest,
    ) -> Result<ExerciseCategory, StoreError> {
        sqlx::query_as::<_, ExerciseCategory>(
            "UPDATE exercise_categories
             SET name    = COALESCE($1, name),
                 type_id = COALESCE($2, type_id)
             WHERE id = $3
             RETURNING *",
        )
        .bind(&req.name)
        .bind(req.type_id)
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(StoreError::from_fetch)
    }

    pub async fn delete_category(pool: &PgPool, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM exercise_categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    // ── Exercises ───────────────────────────────────────────────────────

    pub async fn list(pool: &PgPool, trainer_id: i64) -> Result<Vec<Exercise>, StoreError> {
        let rows = sqlx::query_as::<_, Exercise>(
            "SELECT * FROM exercises WHERE trainer_id = $1 ORDER BY name, id",
        )
        .bind(trainer_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn get(pool: &PgPool, id: i64) -> Result<Exercise, StoreError> {
        sqlx::query_as::<_, Exercise>("SELECT * FROM exercises WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(StoreError::from_fetch)
    }

    pub async fn create(
        pool: &PgPool,
        trainer_id: i64,
        req: &CreateExerciseRequest,
    ) -> Result<Exercise, StoreError> {
        if req.name.trim().is_empty() {
            return Err(StoreError::Validation("نام تمرین الزامی است".into()));
        }
        let row = sqlx::query_as::<_, Exercise>(
            "INSERT INTO exercises (trainer_id, category_id, name, description, video_url)
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(trainer_id)
        .bind(req.category_id)
        .bind(&req.name)
        .bind(&req.description)
        .bind(&req.video_url)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    pub async fn update(
        pool: &PgPool,
        id: i64,
        req: &UpdateExerciseRequest,
    ) -> Result<Exercise, StoreError> {
        sqlx::query_as::<_, Exercise>(
            "UPDATE exercises
             SET name        = COALESCE($1, name),
                 category_id = COALESCE($2, category_id),
                 description = COALESCE($3, description),
                 video_url   = COALESCE($4, video_url)
             WHERE id = $5
             RETURNING *",
        )
        .bind(&req.name)
        .bind(req.category_id)
        .bind(&req.description)
        .bind(&req.video_url)
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(StoreError::from_fetch)
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM exercises WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
