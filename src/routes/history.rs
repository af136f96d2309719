use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::error_response, middleware::session::TrainerAuth, services::history::HistoryService,
    AppState,
};

/// GET /students/{id}/history
pub async fn list_for_student(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path(student_id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    HistoryService::list_for_student(&state.db, student_id)
        .await
        .map(|rows| Json(serde_json::to_value(rows).unwrap()))
        .map_err(error_response)
}

/// DELETE /history — trainer-scoped bulk purge, the only deletion path for
/// history besides the student cascade.
pub async fn purge(
    State(state): State<AppState>,
    auth: TrainerAuth,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    HistoryService::purge_for_trainer(&state.db, auth.trainer_id)
        .await
        .map(|deleted| Json(json!({ "deleted": deleted })))
        .map_err(error_response)
}
