use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::program::{
    BulkMealPlanItem, BulkProgramItem, CreateExerciseProgramRequest, CreateMealPlanRequest,
    CreateStudentSupplementRequest, StudentExerciseProgram, StudentMealPlan, StudentSupplement,
    UpdateExerciseProgramRequest, UpdateMealPlanRequest, UpdateStudentSupplementRequest,
};

pub fn validate_day(day: i16) -> Result<(), StoreError> {
    if !(0..=6).contains(&day) {
        return Err(StoreError::Validation(
            "روز هفته باید بین ۰ و ۶ باشد".into(),
        ));
    }
    Ok(())
}

/// Assignment join-rows binding students to catalog entities. Bulk saves are
/// full replacements: delete-then-recreate inside one transaction, so a save
/// never leaves a day half-written and row ids are fresh on every save.
pub struct ProgramService;

impl ProgramService {
    // ── Exercise programs ───────────────────────────────────────────────

    pub async fn list_exercise_programs(
        pool: &PgPool,
        student_id: i64,
    ) -> Result<Vec<StudentExerciseProgram>, StoreError> {
        let rows = sqlx::query_as::<_, StudentExerciseProgram>(
            "SELECT * FROM student_exercise_programs WHERE student_id = $1
             ORDER BY day_of_week, id",
        )
        .bind(student_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn create_exercise_program(
        pool: &PgPool,
        student_id: i64,
        req: &CreateExerciseProgramRequest,
    ) -> Result<StudentExerciseProgram, StoreError> {
        validate_day(req.day_of_week)?;
        let row = sqlx::query_as::<_, StudentExerciseProgram>(
            "INSERT INTO student_exercise_programs
                (student_id, exercise_id, day_of_week, sets, reps, weight, rest_seconds, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *",
        )
        .bind(student_id)
        .bind(req.exercise_id)
        .bind(req.day_of_week)
        .bind(req.sets)
        .bind(&req.reps)
        .bind(&req.weight)
        .bind(req.rest_seconds)
        .bind(&req.notes)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    pub async fn update_exercise_program(
        pool: &PgPool,
        id: i64,
        req: &UpdateExerciseProgramRequest,
    ) -> Result<StudentExerciseProgram, StoreError> {
        if let Some(day) = req.day_of_week {
            validate_day(day)?;
        }
        sqlx::query_as::<_, StudentExerciseProgram>(
            "UPDATE student_exercise_programs
             SET exercise_id  = COALESCE($1, exercise_id),
                 day_of_week  = COALESCE($2, day_of_week),
                 sets         = COALESCE($3, sets),
                 reps         = COALESCE($4, reps),
                 weight       = COALESCE($5, weight),
                 rest_seconds = COALESCE($6, rest_seconds),
                 notes        = COALESCE($7, notes),
                 is_completed = COALESCE($8, is_completed)
             WHERE id = $9
             RETURNING *",
        )
        .bind(req.exercise_id)
        .bind(req.day_of_week)
        .bind(req.sets)
        .bind(&req.reps)
        .bind(&req.weight)
        .bind(req.rest_seconds)
        .bind(&req.notes)
        .bind(req.is_completed)
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(StoreError::from_fetch)
    }

    pub async fn delete_exercise_program(pool: &PgPool, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM student_exercise_programs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    /// Replace the whole exercise set for (student, day).
    pub async fn bulk_replace_exercise_programs(
        pool: &PgPool,
        student_id: i64,
        day: i16,
        items: &[BulkProgramItem],
    ) -> Result<Vec<StudentExerciseProgram>, StoreError> {
        validate_day(day)?;
        let mut tx = pool.begin().await?;

        sqlx::query(
            "DELETE FROM student_exercise_programs WHERE student_id = $1 AND day_of_week = $2",
        )
        .bind(student_id)
        .bind(day)
        .execute(&mut *tx)
        .await?;

        let mut created = Vec::with_capacity(items.len());
        for item in items {
            let row = sqlx::query_as::<_, StudentExerciseProgram>(
                "INSERT INTO student_exercise_programs
                    (student_id, exercise_id, day_of_week, sets, reps, weight, rest_seconds, notes)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                 RETURNING *",
            )
            .bind(student_id)
            .bind(item.exercise_id)
            .bind(day)
            .bind(item.sets)
            .bind(&item.reps)
            .bind(&item.weight)
            .bind(item.rest_seconds)
            .bind(&item.notes)
            .fetch_one(&mut *tx)
            .await?;
            created.push(row);
        }

        tx.commit().await?;
        Ok(created)
    }

    // ── Meal plans ──────────────────────────────────────────────────────

    pub async fn list_meal_plans(
        pool: &PgPool,
        student_id: i64,
    ) -> Result<Vec<StudentMealPlan>, StoreError> {
        let rows = sqlx::query_as::<_, StudentMealPlan>(
            "SELECT * FROM student_meal_plans WHERE student_id = $1 ORDER BY day_of_week, id",
        )
        .bind(student_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn create_meal_plan(
        pool: &PgPool,
        student_id: i64,
        req: &CreateMealPlanRequest,
    ) -> Result<StudentMealPlan, StoreError> {
        validate_day(req.day_of_week)?;
        let row = sqlx::query_as::<_, StudentMealPlan>(
            "INSERT INTO student_meal_plans (student_id, meal_id, day_of_week, notes)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(student_id)
        .bind(req.meal_id)
        .bind(req.day_of_week)
        .bind(&req.notes)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    pub async fn update_meal_plan(
        pool: &PgPool,
        id: i64,
        req: &UpdateMealPlanRequest,
    ) -> Result<StudentMealPlan, StoreError> {
        if let Some(day) = req.day_of_week {
            validate_day(day)?;
        }
        sqlx::query_as::<_, StudentMealPlan>(
            "UPDATE student_meal_plans
             SET meal_id      = COALESCE($1, meal_id),
                 day_of_week  = COALESCE($2, day_of_week),
                 notes        = COALESCE($3, notes),
                 is_completed = COALESCE($4, is_completed)
             WHERE id = $5
             RETURNING *",
        )
        .bind(req.meal_id)
        .bind(req.day_of_week)
        .bind(&req.notes)
        .bind(req.is_completed)
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(StoreError::from_fetch)
    }

    pub async fn delete_meal_plan(pool: &PgPool, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM student_meal_plans WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    pub async fn bulk_replace_meal_plans(
        pool: &PgPool,
        student_id: i64,
        day: i16,
        items: &[BulkMealPlanItem],
    ) -> Result<Vec<StudentMealPlan>, StoreError> {
        validate_day(day)?;
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM student_meal_plans WHERE student_id = $1 AND day_of_week = $2")
            .bind(student_id)
            .bind(day)
            .execute(&mut *tx)
            .await?;

        let mut created = Vec::with_capacity(items.len());
        for item in items {
            let row = sqlx::query_as::<_, StudentMealPlan>(
                "INSERT INTO student_meal_plans (student_id, meal_id, day_of_week, notes)
                 VALUES ($1, $2, $3, $4)
                 RETURNING *",
            )
            .bind(student_id)
            .bind(item.meal_id)
            .bind(day)
            .bind(&item.notes)
            .fetch_one(&mut *tx)
            .await?;
            created.push(row);
        }

        tx.commit().await?;
        Ok(created)
    }

    // ── Supplements ─────────────────────────────────────────────────────

    pub async fn list_student_supplements(
        pool: &PgPool,
        student_id: i64,
    ) -> Result<Vec<StudentSupplement>, StoreError> {
        let rows = sqlx::query_as::<_, StudentSupplement>(
            "SELECT * FROM student_supplements WHERE student_id = $1 ORDER BY id",
        )
        .bind(student_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn create_student_supplement(
        pool: &PgPool,
        student_id: i64,
        req: &CreateStudentSupplementRequest,
    ) -> Result<StudentSupplement, StoreError> {
        let row = sqlx::query_as::<_, StudentSupplement>(
            "INSERT INTO student_supplements
                (student_id, supplement_id, dosage, frequency, instructions)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(student_id)
        .bind(req.supplement_id)
        .bind(&req.dosage)
        .bind(&req.frequency)
        .bind(&req.instructions)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    pub async fn update_student_supplement(
        pool: &PgPool,
        id: i64,
        req: &UpdateStudentSupplementRequest,
    ) -> Result<StudentSupplement, StoreError> {
        sqlx::query_as::<_, StudentSupplement>(
            "UPDATE student_supplements
             SET supplement_id = COALESCE($1, supplement_id),
                 dosage        = COALESCE($2, dosage),
                 frequency     = COALESCE($3, frequency),
                 instructions  = COALESCE($4, instructions),
                 is_completed  = COALESCE($5, is_completed)
             WHERE id = $6
             RETURNING *",
        )
        .bind(req.supplement_id)
        .bind(&req.dosage)
        .bind(&req.frequency)
        .bind(&req.instructions)
        .bind(req.is_completed)
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(StoreError::from_fetch)
    }

    pub async fn delete_student_supplement(pool: &PgPool, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM student_supplements WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    /// Replace the student's whole supplement set. Unlike exercise and meal
    /// bulk saves this is not scoped by day.
    pub async fn bulk_replace_student_supplements(
        pool: &PgPool,
        student_id: i64,
        items: &[CreateStudentSupplementRequest],
    ) -> Result<Vec<StudentSupplement>, StoreError> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM student_supplements WHERE student_id = $1")
            .bind(student_id)
            .execute(&mut *tx)
            .await?;

        let mut created = Vec::with_capacity(items.len());
        for item in items {
            let row = sqlx::query_as::<_, StudentSupplement>(
                "INSERT INTO student_supplements
                    (student_id, supplement_id, dosage, frequency, instructions)
                 VALUES ($1, $2, $3, $4, $5)
                 RETURNING *",
            )
            .bind(student_id)
            .bind(item.supplement_id)
            .bind(&item.dosage)
            .bind(&item.frequency)
            .bind(&item.instructions)
            .fetch_one(&mut *tx)
            .await?;
            created.push(row);
        }

        tx.commit().await?;
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_of_week_bounds() {
        assert!(validate_day(0).is_ok());
        assert!(validate_day(6).is_ok());
        assert!(validate_day(7).is_err());
        assert!(validate_day(-1).is_err());
    }
}
