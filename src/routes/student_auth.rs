use axum::{extract::State, http::StatusCode, response::Response, Json};
use chrono::{Duration, Utc};
use serde_json::{json, Value};

use crate::{
    error::{error_response, StoreError},
    middleware::session::{clear_session_cookie, session_cookie, SessionContext},
    models::session::{is_valid_phone, Identity, SessionData, StudentLoginRequest},
    routes::json_response_with_cookie,
    services::{
        metrics::STUDENT_LOGINS_COUNTER,
        sessions::{AuthSessionStore, SessionStore},
        students::StudentService,
        tenant::TenantService,
    },
    AppState,
};

/// POST /student/auth/login — phone lookup under the bootstrap trainer.
/// Deactivated accounts get a distinct 403, not a generic 401.
pub async fn login(
    State(state): State<AppState>,
    session: SessionContext,
    Json(body): Json<StudentLoginRequest>,
) -> Result<Response, (StatusCode, Json<Value>)> {
    if !is_valid_phone(&body.phone) {
        return Err(error_response(StoreError::Validation(
            "شماره تلفن معتبر نیست".into(),
        )));
    }

    let trainer_id = TenantService::get_default_trainer_id(&state.db, &state.config.default_trainer_phone)
        .await
        .map_err(error_response)?;

    let student = StudentService::find_by_phone(&state.db, trainer_id, &body.phone)
        .await
        .map_err(error_response)?;

    let student = match student {
        Some(s) => s,
        None => {
            STUDENT_LOGINS_COUNTER.with_label_values(&["failure"]).inc();
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "شاگردی با این شماره تلفن یافت نشد" })),
            ));
        }
    };

    if !student.is_active {
        STUDENT_LOGINS_COUNTER.with_label_values(&["deactivated"]).inc();
        return Err(error_response(StoreError::AccountDeactivated));
    }

    let sid = session.session_id.clone();
    let remember_me_expiry = if body.remember_me {
        Some(Utc::now() + Duration::days(state.config.remember_me_days as i64))
    } else {
        None
    };

    let data = SessionData {
        student_logged_in: true,
        current_student_phone: Some(student.phone.clone()),
        current_student_id: Some(student.id),
        remember_me_expiry,
        ..Default::default()
    };

    let ttl = if body.remember_me {
        state.config.remember_me_days * 24 * 3600
    } else {
        state.config.session_ttl_seconds
    };

    let mut redis = state.redis.clone();
    SessionStore::save(&mut redis, &sid, &data, ttl)
        .await
        .map_err(error_response)?;

    AuthSessionStore::reset(&state.db, &sid, remember_me_expiry)
        .await
        .map_err(error_response)?;

    STUDENT_LOGINS_COUNTER.with_label_values(&["success"]).inc();

    let body = json!({
        "success": true,
        "student": student,
        "rememberMeExpiry": remember_me_expiry,
    });
    let cookie = session_cookie(&sid, ttl);
    Ok(json_response_with_cookie(&body, Some(&cookie)))
}

/// GET /student/auth/status
pub async fn status(session: SessionContext) -> Json<Value> {
    match &session.identity {
        Identity::Student { id, phone } => Json(json!({
            "studentLoggedIn": true,
            "studentId": id,
            "phone": phone,
            "rememberMeExpiry": session.data.remember_me_expiry,
        })),
        _ => Json(json!({ "studentLoggedIn": false })),
    }
}

/// POST /student/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    session: SessionContext,
) -> Result<Response, (StatusCode, Json<Value>)> {
    let mut redis = state.redis.clone();
    SessionStore::destroy(&mut redis, &session.session_id)
        .await
        .map_err(error_response)?;
    AuthSessionStore::delete(&state.db, &session.session_id)
        .await
        .map_err(error_response)?;

    let body = json!({ "success": true });
    Ok(json_response_with_cookie(&body, Some(&clear_session_cookie())))
}
