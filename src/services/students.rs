use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::student::{CreateStudentRequest, Student, UpdateStudentRequest};

pub struct StudentService;

impl StudentService {
    pub async fn list(pool: &PgPool, trainer_id: i64) -> Result<Vec<Student>, StoreError> {
        let students = sqlx::query_as::<_, Student>(
            "SELECT * FROM students WHERE trainer_id = $1 ORDER BY name, id",
        )
        .bind(trainer_id)
        .fetch_all(pool)
        .await?;
        Ok(students)
    }

    pub async fn get(pool: &PgPool, id: i64) -> Result<Student, StoreError> {
        sqlx::query_as::<_, Student>("SELECT * FROM students WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(StoreError::from_fetch)
    }

    pub async fn find_by_phone(
        pool: &PgPool,
        trainer_id: i64,
        phone: &str,
    ) -> Result<Option<Student>, StoreError> {
        let student = sqlx::query_as::<_, Student>(
            "SELECT * FROM students WHERE phone = $1 AND trainer_id = $2",
        )
        .bind(phone)
        .bind(trainer_id)
        .fetch_optional(pool)
        .await?;
        Ok(student)
    }

    /// Duplicate check runs before the insert: one phone number can be a
    /// student of a given trainer only once. The same phone under another
    /// trainer is fine.
    pub async fn create(
        pool: &PgPool,
        trainer_id: i64,
        req: &CreateStudentRequest,
    ) -> Result<Student, StoreError> {
        if req.name.trim().is_empty() {
            return Err(StoreError::Validation("نام شاگرد الزامی است".into()));
        }
        if Self::find_by_phone(pool, trainer_id, &req.phone).await?.is_some() {
            return Err(StoreError::DuplicatePhone(req.phone.clone()));
        }

        let student = sqlx::query_as::<_, Student>(
            "INSERT INTO students
                (trainer_id, name, phone, gender, age, height_cm, weight_kg,
                 goal_type, activity_level, medical_conditions)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING *",
        )
        .bind(trainer_id)
        .bind(&req.name)
        .bind(&req.phone)
        .bind(&req.gender)
        .bind(req.age)
        .bind(req.height_cm)
        .bind(req.weight_kg)
        .bind(&req.goal_type)
        .bind(&req.activity_level)
        .bind(&req.medical_conditions)
        .fetch_one(pool)
        .await
        .map_err(|e| match &e {
            // Unique (phone, trainer_id) violation under a concurrent create.
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::DuplicatePhone(req.phone.clone())
            }
            _ => StoreError::Database(e),
        })?;
        Ok(student)
    }

    pub async fn update(
        pool: &PgPool,
        id: i64,
        req: &UpdateStudentRequest,
    ) -> Result<Student, StoreError> {
        sqlx::query_as::<_, Student>(
            "UPDATE students
             SET name               = COALESCE($1, name),
                 phone              = COALESCE($2, phone),
                 gender             = COALESCE($3, gender),
                 age                = COALESCE($4, age),
                 height_cm          = COALESCE($5, height_cm),
                 weight_kg          = COALESCE($6, weight_kg),
                 goal_type          = COALESCE($7, goal_type),
                 activity_level     = COALESCE($8, activity_level),
                 medical_conditions = COALESCE($9, medical_conditions),
                 is_active          = COALESCE($10, is_active),
                 updated_at         = NOW()
             WHERE id = $11
             RETURNING *",
        )
        .bind(&req.name)
        .bind(&req.phone)
        .bind(&req.gender)
        .bind(req.age)
        .bind(req.height_cm)
        .bind(req.weight_kg)
        .bind(&req.goal_type)
        .bind(&req.activity_level)
        .bind(&req.medical_conditions)
        .bind(req.is_active)
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(StoreError::from_fetch)
    }

    /// Delete a student and every row that references it, in one
    /// transaction. Order: history → exercise programs → meal plans →
    /// supplements → ticket responses → tickets → student. Any step failing
    /// aborts the whole delete.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<(), StoreError> {
        let mut tx = pool.begin().await?;

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM students WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if !exists {
            return Err(StoreError::NotFound);
        }

        sqlx::query("DELETE FROM student_history WHERE student_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM student_exercise_programs WHERE student_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM student_meal_plans WHERE student_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM student_supplements WHERE student_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "DELETE FROM ticket_responses WHERE ticket_id IN
                (SELECT id FROM support_tickets WHERE student_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM support_tickets WHERE student_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM support_messages WHERE student_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
