use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::error_response,
    middleware::session::TrainerAuth,
    models::meal::{CreateMealCategoryRequest, CreateMealRequest, UpdateMealRequest},
    routes::exercises::RenameRequest,
    services::meals::MealService,
    AppState,
};

// ── /meal-categories ────────────────────────────────────────────────────

pub async fn list_categories(
    State(state): State<AppState>,
    auth: TrainerAuth,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    MealService::list_categories(&state.db, auth.trainer_id)
        .await
        .map(|rows| Json(serde_json::to_value(rows).unwrap()))
        .map_err(error_response)
}

pub async fn create_category(
    State(state): State<AppState>,
    auth: TrainerAuth,
    Json(body): Json<CreateMealCategoryRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    MealService::create_category(&state.db, auth.trainer_id, &body)
        .await
        .map(|row| (StatusCode::CREATED, Json(serde_json::to_value(row).unwrap())))
        .map_err(error_response)
}

pub async fn update_category(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path(id): Path<i64>,
    Json(body): Json<RenameRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    MealService::update_category(&state.db, id, &body.name)
        .await
        .map(|row| Json(serde_json::to_value(row).unwrap()))
        .map_err(error_response)
}

pub async fn delete_category(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    MealService::delete_category(&state.db, id)
        .await
        .map(|_| Json(json!({ "message": "دسته‌بندی حذف شد" })))
        .map_err(error_response)
}

// ── /meals ──────────────────────────────────────────────────────────────

pub async fn list_meals(
    State(state): State<AppState>,
    auth: TrainerAuth,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    MealService::list(&state.db, auth.trainer_id)
        .await
        .map(|rows| Json(serde_json::to_value(rows).unwrap()))
        .map_err(error_response)
}

pub async fn get_meal(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    MealService::get(&state.db, id)
        .await
        .map(|row| Json(serde_json::to_value(row).unwrap()))
        .map_err(error_response)
}

pub async fn create_meal(
    State(state): State<AppState>,
    auth: TrainerAuth,
    Json(body): Json<CreateMealRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    MealService::create(&state.db, auth.trainer_id, &body)
        .await
        .map(|row| (StatusCode::CREATED, Json(serde_json::to_value(row).unwrap())))
        .map_err(error_response)
}

pub async fn update_meal(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path(id): Path<i64>,
    Json(body): Json<UpdateMealRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    MealService::update(&state.db, id, &body)
        .await
        .map(|row| Json(serde_json::to_value(row).unwrap()))
        .map_err(error_response)
}

pub async fn delete_meal(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    MealService::delete(&state.db, id)
        .await
        .map(|_| Json(json!({ "message": "وعده غذایی حذف شد" })))
        .map_err(error_response)
}
