use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::supplement::{
    CreateSupplementCategoryRequest, CreateSupplementRequest, Supplement, SupplementCategory,
    UpdateSupplementRequest,
};

pub struct SupplementService;

impl SupplementService {
    pub async fn list_categories(
        pool: &PgPool,
        trainer_id: i64,
    ) -> Result<Vec<SupplementCategory>, StoreError> {
        let rows = sqlx::query_as::<_, SupplementCategory>(
            "SELECT * FROM supplement_categories WHERE trainer_id = $1 ORDER BY name, id",
        )
        .bind(trainer_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn create_category(
        pool: &PgPool,
        trainer_id: i64,
        req: &CreateSupplementCategoryRequest,
    ) -> Result<SupplementCategory, StoreError> {
        if req.name.trim().is_empty() {
            return Err(StoreError::Validation("نام دسته‌بندی الزامی است".into()));
        }
        let row = sqlx::query_as::<_, SupplementCategory>(
            "INSERT INTO supplement_categories (trainer_id, name) VALUES ($1, $2) RETURNING *",
        )
        .bind(trainer_id)
        .bind(&req.name)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    pub async fn update_category(
        pool: &PgPool,
        id: i64,
        name: &str,
    ) -> Result<SupplementCategory, StoreError> {
        sqlx::query_as::<_, SupplementCategory>(
            "UPDATE supplement_categories SET name = $1 WHERE id = $2 RETURNING *",
        )
        .bind(name)
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(StoreError::from_fetch)
    }

    pub async fn delete_category(pool: &PgPool, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM supplement_categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    pub async fn list(pool: &PgPool, trainer_id: i64) -> Result<Vec<Supplement>, StoreError> {
        let rows = sqlx::query_as::<_, Supplement>(
            "SELECT * FROM supplements WHERE trainer_id = $1 ORDER BY name, id",
        )
        .bind(trainer_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn get(pool: &PgPool, id: i64) -> Result<Supplement, StoreError> {
        sqlx::query_as::<_, Supplement>("SELECT * FROM supplements WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(StoreError::from_fetch)
    }

    pub async fn create(
        pool: &PgPool,
        trainer_id: i64,
        req: &CreateSupplementRequest,
    ) -> Result<Supplement, StoreError> {
        if req.name.trim().is_empty() {
            return Err(StoreError::Validation("نام مکمل الزامی است".into()));
        }
        let row = sqlx::query_as::<_, Supplement>(
            "INSERT INTO supplements (trainer_id, category_id, name, description, default_dosage)
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(trainer_id)
        .bind(req.category_id)
        .bind(&req.name)
        .bind(&req.description)
        .bind(&req.default_dosage)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    pub async fn update(
        pool: &PgPool,
        id: i64,
        req: &UpdateSupplementRequest,
    ) -> Result<Supplement, StoreError> {
        sqlx::query_as::<_, Supplement>(
            "UPDATE supplements
             SET name           = COALESCE($1, name),
                 category_id    = COALESCE($2, category_id),
                 description    = COALESCE($3, description),
                 default_dosage = COALESCE($4, default_dosage)
             WHERE id = $5
             RETURNING *",
        )
        .bind(&req.name)
        .bind(req.category_id)
        .bind(&req.description)
        .bind(&req.default_dosage)
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(StoreError::from_fetch)
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM supplements WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
