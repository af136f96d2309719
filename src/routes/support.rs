use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::error_response,
    middleware::session::TrainerAuth,
    models::support::{
        CreateSupportMessageRequest, CreateTicketRequest, CreateTicketResponseRequest, Sender,
        UpdateTicketRequest,
    },
    services::{metrics::TICKETS_COUNTER, support::SupportService},
    AppState,
};

// ── /support/tickets ────────────────────────────────────────────────────

pub async fn list_tickets(
    State(state): State<AppState>,
    auth: TrainerAuth,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    SupportService::list_tickets(&state.db, auth.trainer_id)
        .await
        .map(|rows| Json(serde_json::to_value(rows).unwrap()))
        .map_err(error_response)
}

pub async fn create_ticket(
    State(state): State<AppState>,
    auth: TrainerAuth,
    Json(body): Json<CreateTicketRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let ticket = SupportService::create_ticket(&state.db, auth.trainer_id, Sender::Trainer, &body)
        .await
        .map_err(error_response)?;
    TICKETS_COUNTER.with_label_values(&["trainer"]).inc();
    Ok((StatusCode::CREATED, Json(serde_json::to_value(ticket).unwrap())))
}

pub async fn get_ticket(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    SupportService::get_ticket(&state.db, id)
        .await
        .map(|row| Json(serde_json::to_value(row).unwrap()))
        .map_err(error_response)
}

pub async fn update_ticket(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path(id): Path<i64>,
    Json(body): Json<UpdateTicketRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    SupportService::update_ticket(&state.db, id, &body)
        .await
        .map(|row| Json(serde_json::to_value(row).unwrap()))
        .map_err(error_response)
}

pub async fn delete_ticket(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    SupportService::delete_ticket(&state.db, id)
        .await
        .map(|_| Json(json!({ "message": "تیکت حذف شد" })))
        .map_err(error_response)
}

pub async fn list_responses(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    SupportService::list_responses(&state.db, id)
        .await
        .map(|rows| Json(serde_json::to_value(rows).unwrap()))
        .map_err(error_response)
}

pub async fn add_response(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path(id): Path<i64>,
    Json(body): Json<CreateTicketResponseRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    SupportService::add_response(&state.db, id, Sender::Trainer, &body.message)
        .await
        .map(|row| (StatusCode::CREATED, Json(serde_json::to_value(row).unwrap())))
        .map_err(error_response)
}

// ── /support/messages ───────────────────────────────────────────────────

pub async fn list_messages(
    State(state): State<AppState>,
    auth: TrainerAuth,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    SupportService::list_messages(&state.db, auth.trainer_id)
        .await
        .map(|rows| Json(serde_json::to_value(rows).unwrap()))
        .map_err(error_response)
}

pub async fn send_message(
    State(state): State<AppState>,
    auth: TrainerAuth,
    Json(body): Json<CreateSupportMessageRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    SupportService::send_message(&state.db, auth.trainer_id, Sender::Trainer, &body)
        .await
        .map(|row| (StatusCode::CREATED, Json(serde_json::to_value(row).unwrap())))
        .map_err(error_response)
}

pub async fn mark_message_read(
    State(state): State<AppState>,
    _auth: TrainerAuth,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    SupportService::mark_message_read(&state.db, id)
        .await
        .map(|row| Json(serde_json::to_value(row).unwrap()))
        .map_err(error_response)
}

/// POST /support/clear — trainer-scoped purge of tickets, responses and
/// messages.
pub async fn clear(
    State(state): State<AppState>,
    auth: TrainerAuth,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    SupportService::clear_for_trainer(&state.db, auth.trainer_id)
        .await
        .map(|_| Json(json!({ "message": "داده‌های پشتیبانی پاک شد" })))
        .map_err(error_response)
}
