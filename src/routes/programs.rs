use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::error_response,
    middleware::session::TrainerAuth,
    models::{
        history::HistoryEntry,
        program::{
            BulkMealPlanRequest, BulkProgramRequest, BulkSupplementRequest,
            CreateExerciseProgramRequest, CreateMealPlanRequest, CreateStudentSupplementRequest,
            UpdateExerciseProgramRequest, UpdateMealPlanRequest, UpdateStudentSupplementRequest,
        },
    },
    services::{history::HistoryService, programs::ProgramService},
    AppState,
};

// ── /students/{id}/exercise-programs ────────────────────────────────────

pub async fn list_exercise_programs(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path(student_id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    ProgramService::list_exercise_programs(&state.db, student_id)
        .await
        .map(|rows| Json(serde_json::to_value(rows).unwrap()))
        .map_err(error_response)
}

pub async fn create_exercise_program(
    State(state): State<AppState>,
    auth: TrainerAuth,
    Path(student_id): Path<i64>,
    Json(body): Json<CreateExerciseProgramRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let row = ProgramService::create_exercise_program(&state.db, student_id, &body)
        .await
        .map_err(error_response)?;

    HistoryService::log(
        state.db.clone(),
        HistoryEntry {
            student_id,
            trainer_id: auth.trainer_id,
            action: "assign".into(),
            entity_type: "exercise_program".into(),
            entity_id: Some(row.id),
            changes: None,
            description: format!("تمرین برای روز {} اختصاص یافت", row.day_of_week),
        },
    );

    Ok((StatusCode::CREATED, Json(serde_json::to_value(row).unwrap())))
}

pub async fn update_exercise_program(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path((_student_id, program_id)): Path<(i64, i64)>,
    Json(body): Json<UpdateExerciseProgramRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    ProgramService::update_exercise_program(&state.db, program_id, &body)
        .await
        .map(|row| Json(serde_json::to_value(row).unwrap()))
        .map_err(error_response)
}

pub async fn delete_exercise_program(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path((_student_id, program_id)): Path<(i64, i64)>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    ProgramService::delete_exercise_program(&state.db, program_id)
        .await
        .map(|_| Json(json!({ "message": "برنامه تمرینی حذف شد" })))
        .map_err(error_response)
}

/// POST /students/{id}/exercise-programs/bulk — full replacement of the
/// day's set, fresh row ids.
pub async fn bulk_exercise_programs(
    State(state): State<AppState>,
    auth: TrainerAuth,
    Path(student_id): Path<i64>,
    Json(body): Json<BulkProgramRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let rows =
        ProgramService::bulk_replace_exercise_programs(&state.db, student_id, body.day, &body.items)
            .await
            .map_err(error_response)?;

    HistoryService::log(
        state.db.clone(),
        HistoryEntry {
            student_id,
            trainer_id: auth.trainer_id,
            action: "bulk_replace".into(),
            entity_type: "exercise_program".into(),
            entity_id: None,
            changes: Some(json!({ "day": body.day, "count": rows.len() })),
            description: format!("برنامه تمرینی روز {} بازنویسی شد", body.day),
        },
    );

    Ok(Json(serde_json::to_value(rows).unwrap()))
}

// ── /students/{id}/meal-plans ───────────────────────────────────────────

pub async fn list_meal_plans(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path(student_id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    ProgramService::list_meal_plans(&state.db, student_id)
        .await
        .map(|rows| Json(serde_json::to_value(rows).unwrap()))
        .map_err(error_response)
}

pub async fn create_meal_plan(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path(student_id): Path<i64>,
    Json(body): Json<CreateMealPlanRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    ProgramService::create_meal_plan(&state.db, student_id, &body)
        .await
        .map(|row| (StatusCode::CREATED, Json(serde_json::to_value(row).unwrap())))
        .map_err(error_response)
}

pub async fn update_meal_plan(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path((_student_id, plan_id)): Path<(i64, i64)>,
    Json(body): Json<UpdateMealPlanRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    ProgramService::update_meal_plan(&state.db, plan_id, &body)
        .await
        .map(|row| Json(serde_json::to_value(row).unwrap()))
        .map_err(error_response)
}

pub async fn delete_meal_plan(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path((_student_id, plan_id)): Path<(i64, i64)>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    ProgramService::delete_meal_plan(&state.db, plan_id)
        .await
        .map(|_| Json(json!({ "message": "برنامه غذایی حذف شد" })))
        .map_err(error_response)
}

pub async fn bulk_meal_plans(
    State(state): State<AppState>,
    auth: TrainerAuth,
    Path(student_id): Path<i64>,
    Json(body): Json<BulkMealPlanRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let rows = ProgramService::bulk_replace_meal_plans(&state.db, student_id, body.day, &body.items)
        .await
        .map_err(error_response)?;

    HistoryService::log(
        state.db.clone(),
        HistoryEntry {
            student_id,
            trainer_id: auth.trainer_id,
            action: "bulk_replace".into(),
            entity_type: "meal_plan".into(),
            entity_id: None,
            changes: Some(json!({ "day": body.day, "count": rows.len() })),
            description: format!("برنامه غذایی روز {} بازنویسی شد", body.day),
        },
    );

    Ok(Json(serde_json::to_value(rows).unwrap()))
}

// ── /students/{id}/supplements ──────────────────────────────────────────

pub async fn list_student_supplements(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path(student_id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    ProgramService::list_student_supplements(&state.db, student_id)
        .await
        .map(|rows| Json(serde_json::to_value(rows).unwrap()))
        .map_err(error_response)
}

pub async fn create_student_supplement(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path(student_id): Path<i64>,
    Json(body): Json<CreateStudentSupplementRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    ProgramService::create_student_supplement(&state.db, student_id, &body)
        .await
        .map(|row| (StatusCode::CREATED, Json(serde_json::to_value(row).unwrap())))
        .map_err(error_response)
}

pub async fn update_student_supplement(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path((_student_id, supplement_id)): Path<(i64, i64)>,
    Json(body): Json<UpdateStudentSupplementRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    ProgramService::update_student_supplement(&state.db, supplement_id, &body)
        .await
        .map(|row| Json(serde_json::to_value(row).unwrap()))
        .map_err(error_response)
}

pub async fn delete_student_supplement(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path((_student_id, supplement_id)): Path<(i64, i64)>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    ProgramService::delete_student_supplement(&state.db, supplement_id)
        .await
        .map(|_| Json(json!({ "message": "مکمل شاگرد حذف شد" })))
        .map_err(error_response)
}

/// POST /students/{id}/supplements/bulk — replaces the student's whole
/// supplement set (not day-scoped).
pub async fn bulk_student_supplements(
    State(state): State<AppState>,
    auth: TrainerAuth,
    Path(student_id): Path<i64>,
    Json(body): Json<BulkSupplementRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let rows =
        ProgramService::bulk_replace_student_supplements(&state.db, student_id, &body.items)
            .await
            .map_err(error_response)?;

    HistoryService::log(
        state.db.clone(),
        HistoryEntry {
            student_id,
            trainer_id: auth.trainer_id,
            action: "bulk_replace".into(),
            entity_type: "supplement".into(),
            entity_id: None,
            changes: Some(json!({ "count": rows.len() })),
            description: "مکمل‌های شاگرد بازنویسی شد".into(),
        },
    );

    Ok(Json(serde_json::to_value(rows).unwrap()))
}
