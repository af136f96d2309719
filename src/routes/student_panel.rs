use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::{
    error::{error_response, StoreError},
    middleware::session::StudentAuth,
    models::support::{
        CreateStudentSupportMessageRequest, CreateStudentTicketRequest,
        CreateSupportMessageRequest, CreateTicketRequest, CreateTicketResponseRequest, Sender,
    },
    services::{
        metrics::TICKETS_COUNTER, programs::ProgramService, support::SupportService,
    },
    AppState,
};

// Read-only program views, scoped to the logged-in student.

pub async fn my_programs(
    State(state): State<AppState>,
    auth: StudentAuth,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    ProgramService::list_exercise_programs(&state.db, auth.student_id)
        .await
        .map(|rows| Json(serde_json::to_value(rows).unwrap()))
        .map_err(error_response)
}

pub async fn my_meal_plans(
    State(state): State<AppState>,
    auth: StudentAuth,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    ProgramService::list_meal_plans(&state.db, auth.student_id)
        .await
        .map(|rows| Json(serde_json::to_value(rows).unwrap()))
        .map_err(error_response)
}

pub async fn my_supplements(
    State(state): State<AppState>,
    auth: StudentAuth,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    ProgramService::list_student_supplements(&state.db, auth.student_id)
        .await
        .map(|rows| Json(serde_json::to_value(rows).unwrap()))
        .map_err(error_response)
}

// Support, from the student side.

pub async fn my_tickets(
    State(state): State<AppState>,
    auth: StudentAuth,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    SupportService::list_tickets_for_student(&state.db, auth.student_id)
        .await
        .map(|rows| Json(serde_json::to_value(rows).unwrap()))
        .map_err(error_response)
}

pub async fn open_ticket(
    State(state): State<AppState>,
    auth: StudentAuth,
    Json(body): Json<CreateStudentTicketRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let req = CreateTicketRequest {
        student_id: auth.student_id,
        subject: body.subject,
        category: body.category,
        priority: body.priority,
        message: body.message,
    };
    let ticket = SupportService::create_ticket(&state.db, auth.trainer_id, Sender::Student, &req)
        .await
        .map_err(error_response)?;
    TICKETS_COUNTER.with_label_values(&["student"]).inc();
    Ok((StatusCode::CREATED, Json(serde_json::to_value(ticket).unwrap())))
}

pub async fn respond_to_ticket(
    State(state): State<AppState>,
    auth: StudentAuth,
    Path(ticket_id): Path<i64>,
    Json(body): Json<CreateTicketResponseRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    // A student may only respond to their own tickets.
    let ticket = SupportService::get_ticket(&state.db, ticket_id)
        .await
        .map_err(error_response)?;
    if ticket.student_id != auth.student_id {
        return Err(error_response(StoreError::NotFound));
    }

    SupportService::add_response(&state.db, ticket_id, Sender::Student, &body.message)
        .await
        .map(|row| (StatusCode::CREATED, Json(serde_json::to_value(row).unwrap())))
        .map_err(error_response)
}

pub async fn ticket_responses(
    State(state): State<AppState>,
    auth: StudentAuth,
    Path(ticket_id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let ticket = SupportService::get_ticket(&state.db, ticket_id)
        .await
        .map_err(error_response)?;
    if ticket.student_id != auth.student_id {
        return Err(error_response(StoreError::NotFound));
    }

    SupportService::list_responses(&state.db, ticket_id)
        .await
        .map(|rows| Json(serde_json::to_value(rows).unwrap()))
        .map_err(error_response)
}

pub async fn my_messages(
    State(state): State<AppState>,
    auth: StudentAuth,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    SupportService::list_messages_for_student(&state.db, auth.student_id)
        .await
        .map(|rows| Json(serde_json::to_value(rows).unwrap()))
        .map_err(error_response)
}

pub async fn send_message(
    State(state): State<AppState>,
    auth: StudentAuth,
    Json(body): Json<CreateStudentSupportMessageRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let req = CreateSupportMessageRequest {
        student_id: auth.student_id,
        message: body.message,
    };
    SupportService::send_message(&state.db, auth.trainer_id, Sender::Student, &req)
        .await
        .map(|row| (StatusCode::CREATED, Json(serde_json::to_value(row).unwrap())))
        .map_err(error_response)
}
