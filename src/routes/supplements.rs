use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::error_response,
    middleware::session::TrainerAuth,
    models::supplement::{
        CreateSupplementCategoryRequest, CreateSupplementRequest, UpdateSupplementRequest,
    },
    routes::exercises::RenameRequest,
    services::supplements::SupplementService,
    AppState,
};

// ── /supplement-categories ──────────────────────────────────────────────

pub async fn list_categories(
    State(state): State<AppState>,
    auth: TrainerAuth,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    SupplementService::list_categories(&state.db, auth.trainer_id)
        .await
        .map(|rows| Json(serde_json::to_value(rows).unwrap()))
        .map_err(error_response)
}

pub async fn create_category(
    State(state): State<AppState>,
    auth: TrainerAuth,
    Json(body): Json<CreateSupplementCategoryRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    SupplementService::create_category(&state.db, auth.trainer_id, &body)
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
    SupplementService::update_category(&state.db, id, &body.name)
        .await
        .map(|row| Json(serde_json::to_value(row).unwrap()))
        .map_err(error_response)
}

pub async fn delete_category(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    SupplementService::delete_category(&state.db, id)
        .await
        .map(|_| Json(json!({ "message": "دسته‌بندی حذف شد" })))
        .map_err(error_response)
}

// ── /supplements ────────────────────────────────────────────────────────

pub async fn list_supplements(
    State(state): State<AppState>,
    auth: TrainerAuth,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    SupplementService::list(&state.db, auth.trainer_id)
        .await
        .map(|rows| Json(serde_json::to_value(rows).unwrap()))
        .map_err(error_response)
}

pub async fn get_supplement(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    SupplementService::get(&state.db, id)
        .await
        .map(|row| Json(serde_json::to_value(row).unwrap()))
        .map_err(error_response)
}

pub async fn create_supplement(
    State(state): State<AppState>,
    auth: TrainerAuth,
    Json(body): Json<CreateSupplementRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    SupplementService::create(&state.db, auth.trainer_id, &body)
        .await
        .map(|row| (StatusCode::CREATED, Json(serde_json::to_value(row).unwrap())))
        .map_err(error_response)
}

pub async fn update_supplement(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path(id): Path<i64>,
    Json(body): Json<UpdateSupplementRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    SupplementService::update(&state.db, id, &body)
        .await
        .map(|row| Json(serde_json::to_value(row).unwrap()))
        .map_err(error_response)
}

pub async fn delete_supplement(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    SupplementService::delete(&state.db, id)
        .await
        .map(|_| Json(json!({ "message": "مکمل حذف شد" })))
        .map_err(error_response)
}
