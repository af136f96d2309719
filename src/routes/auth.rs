use axum::{extract::State, http::StatusCode, response::Response, Json};
use serde_json::{json, Value};

use crate::{
    error::{error_response, StoreError},
    middleware::session::{clear_session_cookie, session_cookie, SessionContext, TrainerAuth},
    models::session::{is_valid_phone, Identity, SessionData, TrainerLoginRequest, TRAINER_USER_PREFIX},
    routes::json_response_with_cookie,
    services::{
        metrics::TRAINER_LOGINS_COUNTER,
        sessions::{AuthSessionStore, SessionStore},
        tenant::TenantService,
    },
    AppState,
};

/// POST /auth/trainer-login — phone + access code. A matching pair moves the
/// session from Anonymous to Authenticated(trainer), provisioning the
/// trainer on first contact.
pub async fn trainer_login(
    State(state): State<AppState>,
    session: SessionContext,
    Json(body): Json<TrainerLoginRequest>,
) -> Result<Response, (StatusCode, Json<Value>)> {
    if !is_valid_phone(&body.phone) {
        return Err(error_response(StoreError::Validation(
            "شماره تلفن معتبر نیست".into(),
        )));
    }

    let sid = session.session_id.clone();

    if let Some(until) = AuthSessionStore::locked_until(&state.db, &sid)
        .await
        .map_err(error_response)?
    {
        TRAINER_LOGINS_COUNTER.with_label_values(&["locked"]).inc();
        return Err((
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({
                "error": "تعداد تلاش‌های ناموفق زیاد است. بعداً دوباره امتحان کنید.",
                "lockedUntil": until,
            })),
        ));
    }

    if body.code != state.config.trainer_auth_code {
        AuthSessionStore::record_failed_attempt(
            &state.db,
            &sid,
            &body.phone,
            state.config.max_login_attempts,
            state.config.lockout_minutes,
        )
        .await
        .map_err(error_response)?;
        TRAINER_LOGINS_COUNTER.with_label_values(&["failure"]).inc();
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "شماره تلفن یا کد ورود اشتباه است" })),
        ));
    }

    let trainer_id = TenantService::ensure_trainer_exists(&state.db, &body.phone)
        .await
        .map_err(error_response)?;

    AuthSessionStore::reset(&state.db, &sid, None)
        .await
        .map_err(error_response)?;

    let data = SessionData {
        user_id: Some(format!("{TRAINER_USER_PREFIX}{}", body.phone)),
        is_logged_in: true,
        ..Default::default()
    };
    let mut redis = state.redis.clone();
    SessionStore::save(&mut redis, &sid, &data, state.config.session_ttl_seconds)
        .await
        .map_err(error_response)?;

    TRAINER_LOGINS_COUNTER.with_label_values(&["success"]).inc();

    let body = json!({
        "success": true,
        "user": { "id": trainer_id, "phone": body.phone },
    });
    let cookie = session_cookie(&sid, state.config.session_ttl_seconds);
    Ok(json_response_with_cookie(&body, Some(&cookie)))
}

/// GET /auth/me — the logged-in trainer and their profile.
pub async fn me(
    State(state): State<AppState>,
    auth: TrainerAuth,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let trainer = TenantService::get_trainer(&state.db, auth.trainer_id)
        .await
        .map_err(error_response)?;
    let profile = TenantService::get_profile(&state.db, auth.trainer_id)
        .await
        .map_err(error_response)?;
    Ok(Json(json!({ "trainer": trainer, "profile": profile })))
}

/// GET /auth/status — no auth required; drives the login UI.
pub async fn status(session: SessionContext) -> Json<Value> {
    Json(json!({
        "isLoggedIn": matches!(session.identity, Identity::Trainer { .. }),
        "sessionId": session.session_id,
        "userId": session.data.user_id,
    }))
}

/// POST /auth/logout — destroys the whole session.
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
