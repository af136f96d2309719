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
        student::{CreateStudentRequest, UpdateStudentRequest},
        trainer::UpdateTrainerProfileRequest,
    },
    services::{history::HistoryService, students::StudentService, tenant::TenantService},
    AppState,
};

pub async fn list_students(
    State(state): State<AppState>,
    auth: TrainerAuth,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    StudentService::list(&state.db, auth.trainer_id)
        .await
        .map(|students| Json(serde_json::to_value(students).unwrap()))
        .map_err(error_response)
}

pub async fn get_student(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    StudentService::get(&state.db, id)
        .await
        .map(|student| Json(serde_json::to_value(student).unwrap()))
        .map_err(error_response)
}

pub async fn create_student(
    State(state): State<AppState>,
    auth: TrainerAuth,
    Json(body): Json<CreateStudentRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let student = StudentService::create(&state.db, auth.trainer_id, &body)
        .await
        .map_err(error_response)?;

    HistoryService::log(
        state.db.clone(),
        HistoryEntry {
            student_id: student.id,
            trainer_id: auth.trainer_id,
            action: "create".into(),
            entity_type: "student".into(),
            entity_id: Some(student.id),
            changes: None,
            description: format!("شاگرد {} ثبت شد", student.name),
        },
    );

    Ok((StatusCode::CREATED, Json(serde_json::to_value(student).unwrap())))
}

pub async fn update_student(
    State(state): State<AppState>,
    auth: TrainerAuth,
    Path(id): Path<i64>,
    Json(body): Json<UpdateStudentRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let student = StudentService::update(&state.db, id, &body)
        .await
        .map_err(error_response)?;

    HistoryService::log(
        state.db.clone(),
        HistoryEntry {
            student_id: student.id,
            trainer_id: auth.trainer_id,
            action: "update".into(),
            entity_type: "student".into(),
            entity_id: Some(student.id),
            changes: serde_json::to_value(&student).ok(),
            description: format!("اطلاعات شاگرد {} ویرایش شد", student.name),
        },
    );

    Ok(Json(serde_json::to_value(student).unwrap()))
}

pub async fn delete_student(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    StudentService::delete(&state.db, id)
        .await
        .map(|_| Json(json!({ "message": "شاگرد حذف شد" })))
        .map_err(error_response)
}

/// GET /profile — the trainer's own profile.
pub async fn get_profile(
    State(state): State<AppState>,
    auth: TrainerAuth,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    TenantService::get_profile(&state.db, auth.trainer_id)
        .await
        .map(|profile| Json(serde_json::to_value(profile).unwrap()))
        .map_err(error_response)
}

/// PUT /profile — partial merge; unset fields preserved.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: TrainerAuth,
    Json(body): Json<UpdateTrainerProfileRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    TenantService::update_profile(&state.db, auth.trainer_id, &body)
        .await
        .map(|profile| Json(serde_json::to_value(profile).unwrap()))
        .map_err(error_response)
}
