use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::error_response,
    middleware::session::TrainerAuth,
    models::exercise::{
        CreateExerciseCategoryRequest, CreateExerciseRequest, CreateExerciseTypeRequest,
        UpdateExerciseCategoryRequest, UpdateExerciseRequest,
    },
    services::exercises::ExerciseService,
    AppState,
};

#[derive(Debug, serde::Deserialize)]
pub struct RenameRequest {
    pub name: String,
}

// ── /exercise-types ─────────────────────────────────────────────────────

pub async fn list_types(
    State(state): State<AppState>,
    auth: TrainerAuth,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    ExerciseService::list_types(&state.db, auth.trainer_id)
        .await
        .map(|rows| Json(serde_json::to_value(rows).unwrap()))
        .map_err(error_response)
}

pub async fn create_type(
    State(state): State<AppState>,
    auth: TrainerAuth,
    Json(body): Json<CreateExerciseTypeRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    ExerciseService::create_type(&state.db, auth.trainer_id, &body)
        .await
        .map(|row| (StatusCode::CREATED, Json(serde_json::to_value(row).unwrap())))
        .map_err(error_response)
}

pub async fn update_type(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path(id): Path<i64>,
    Json(body): Json<RenameRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    ExerciseService::update_type(&state.db, id, &body.name)
        .await
        .map(|row| Json(serde_json::to_value(row).unwrap()))
        .map_err(error_response)
}

pub async fn delete_type(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    ExerciseService::delete_type(&state.db, id)
        .await
        .map(|_| Json(json!({ "message": "نوع تمرین حذف شد" })))
        .map_err(error_response)
}

// ── /exercise-categories ────────────────────────────────────────────────

pub async fn list_categories(
    State(state): State<AppState>,
    auth: TrainerAuth,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    ExerciseService::list_categories(&state.db, auth.trainer_id)
        .await
        .map(|rows| Json(serde_json::to_value(rows).unwrap()))
        .map_err(error_response)
}

pub async fn create_category(
    State(state): State<AppState>,
    auth: TrainerAuth,
    Json(body): Json<CreateExerciseCategoryRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    ExerciseService::create_category(&state.db, auth.trainer_id, &body)
        .await
        .map(|row| (StatusCode::CREATED, Json(serde_json::to_value(row).unwrap())))
        .map_err(error_response)
}

pub async fn update_category(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path(id): Path<i64>,
    Json(body): Json<UpdateExerciseCategoryRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    ExerciseService::update_category(&state.db, id, &body)
        .await
        .map(|row| Json(serde_json::to_value(row).unwrap()))
        .map_err(error_response)
}

pub async fn delete_category(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    ExerciseService::delete_category(&state.db, id)
        .await
        .map(|_| Json(json!({ "message": "دسته‌بندی حذف شد" })))
        .map_err(error_response)
}

// ── /exercises ──────────────────────────────────────────────────────────

pub async fn list_exercises(
    State(state): State<AppState>,
    auth: TrainerAuth,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    ExerciseService::list(&state.db, auth.trainer_id)
        .await
        .map(|rows| Json(serde_json::to_value(rows).unwrap()))
        .map_err(error_response)
}

pub async fn get_exercise(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    ExerciseService::get(&state.db, id)
        .await
        .map(|row| Json(serde_json::to_value(row).unwrap()))
        .map_err(error_response)
}

pub async fn create_exercise(
    State(state): State<AppState>,
    auth: TrainerAuth,
    Json(body): Json<CreateExerciseRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    ExerciseService::create(&state.db, auth.trainer_id, &body)
        .await
        .map(|row| (StatusCode::CREATED, Json(serde_json::to_value(row).unwrap())))
        .map_err(error_response)
}

pub async fn update_exercise(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path(id): Path<i64>,
    Json(body): Json<UpdateExerciseRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    ExerciseService::update(&state.db, id, &body)
        .await
        .map(|row| Json(serde_json::to_value(row).unwrap()))
        .map_err(error_response)
}

pub async fn delete_exercise(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    ExerciseService::delete(&state.db, id)
        .await
        .map(|_| Json(json!({ "message": "تمرین حذف شد" })))
        .map_err(error_response)
}
