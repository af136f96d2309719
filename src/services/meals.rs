use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::meal::{
    CreateMealCategoryRequest, CreateMealRequest, Meal, MealCategory, UpdateMealRequest,
};

pub struct MealService;

impl MealService {
    pub async fn list_categories(
        pool: &PgPool,
        trainer_id: i64,
    ) -> Result<Vec<MealCategory>, StoreError> {
        let rows = sqlx::query_as::<_, MealCategory>(
            "SELECT * FROM meal_categories WHERE trainer_id = $1 ORDER BY name, id",
        )
        .bind(trainer_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn create_category(
        pool: &PgPool,
        trainer_id: i64,
        req: &CreateMealCategoryRequest,
    ) -> Result<MealCategory, StoreError> {
        if req.name.trim().is_empty() {
            return Err(StoreError::Validation("نام دسته‌بندی الزامی است".into()));
        }
        let row = sqlx::query_as::<_, MealCategory>(
            "INSERT INTO meal_categories (trainer_id, name) VALUES ($1, $2) RETURNING *",
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
    ) -> Result<MealCategory, StoreError> {
        sqlx::query_as::<_, MealCategory>(
            "UPDATE meal_categories SET name = $1 WHERE id = $2 RETURNING *",
        )
        .bind(name)
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(StoreError::from_fetch)
    }

    pub async fn delete_category(pool: &PgPool, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM meal_categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    pub async fn list(pool: &PgPool, trainer_id: i64) -> Result<Vec<Meal>, StoreError> {
        let rows = sqlx::query_as::<_, Meal>(
            "SELECT * FROM meals WHERE trainer_id = $1 ORDER BY name, id",
        )
        .bind(trainer_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn get(pool: &PgPool, id: i64) -> Result<Meal, StoreError> {
        sqlx::query_as::<_, Meal>("SELECT * FROM meals WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(StoreError::from_fetch)
    }

    pub async fn create(
        pool: &PgPool,
        trainer_id: i64,
        req: &CreateMealRequest,
    ) -> Result<Meal, StoreError> {
        if req.name.trim().is_empty() {
            return Err(StoreError::Validation("نام وعده غذایی الزامی است".into()));
        }
        let row = sqlx::query_as::<_, Meal>(
            "INSERT INTO meals (trainer_id, category_id, name, description, calories)
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(trainer_id)
        .bind(req.category_id)
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.calories)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    pub async fn update(
        pool: &PgPool,
        id: i64,
        req: &UpdateMealRequest,
    ) -> Result<Meal, StoreError> {
        sqlx::query_as::<_, Meal>(
            "UPDATE meals
             SET name        = COALESCE($1, name),
                 category_id = COALESCE($2, category_id),
                 description = COALESCE($3, description),
                 calories    = COALESCE($4, calories)
             WHERE id = $5
             RETURNING *",
        )
        .bind(&req.name)
        .bind(req.category_id)
        .bind(&req.description)
        .bind(req.calories)
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(StoreError::from_fetch)
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM meals WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
