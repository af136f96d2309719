use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::error_response,
    middleware::session::SessionContext,
    models::preference::{PrefIdentity, ResetPreferencesRequest, SetPreferenceRequest},
    services::preferences::PreferenceService,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct PreferenceQuery {
    /// Legacy numeric-id track for clients that hold a stable user id. The
    /// session cookie wins whenever both are available.
    #[serde(rename = "userId")]
    pub user_id: Option<i64>,
}

fn identity(session: &SessionContext, query: &PreferenceQuery) -> PrefIdentity {
    // The session id always exists (a fresh one is minted per request when
    // no cookie is presented), so it takes priority by design.
    PrefIdentity::resolve(query.user_id, Some(session.session_id.clone()))
        .expect("session id is always present")
}

/// GET /preferences — all pairs for the caller's identity.
pub async fn list(
    State(state): State<AppState>,
    session: SessionContext,
    Query(query): Query<PreferenceQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let id = identity(&session, &query);
    PreferenceService::list(&state.db, &id)
        .await
        .map(|rows| Json(serde_json::to_value(rows).unwrap()))
        .map_err(error_response)
}

/// GET /preferences/{key}
pub async fn get(
    State(state): State<AppState>,
    session: SessionContext,
    Query(query): Query<PreferenceQuery>,
    Path(key): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let id = identity(&session, &query);
    let row = PreferenceService::get(&state.db, &id, &key)
        .await
        .map_err(error_response)?;
    match row {
        Some(pref) => Ok(Json(json!({ "key": pref.pref_key, "value": pref.pref_value }))),
        None => Ok(Json(json!({ "key": key, "value": Value::Null }))),
    }
}

/// POST /preferences/{key} {value} — upsert.
pub async fn set(
    State(state): State<AppState>,
    session: SessionContext,
    Query(query): Query<PreferenceQuery>,
    Path(key): Path<String>,
    Json(body): Json<SetPreferenceRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let id = identity(&session, &query);
    PreferenceService::set(&state.db, &id, &key, &body.value)
        .await
        .map(|pref| Json(json!({ "key": pref.pref_key, "value": pref.pref_value })))
        .map_err(error_response)
}

/// DELETE /preferences/{key}
pub async fn remove(
    State(state): State<AppState>,
    session: SessionContext,
    Query(query): Query<PreferenceQuery>,
    Path(key): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let id = identity(&session, &query);
    PreferenceService::remove(&state.db, &id, &key)
        .await
        .map(|_| Json(json!({ "success": true })))
        .map_err(error_response)
}

/// POST /preferences/reset {keys?} — clears specific or all keys.
pub async fn reset(
    State(state): State<AppState>,
    session: SessionContext,
    Query(query): Query<PreferenceQuery>,
    Json(body): Json<ResetPreferencesRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let id = identity(&session, &query);
    PreferenceService::reset(&state.db, &id, body.keys.as_deref())
        .await
        .map(|_| Json(json!({ "success": true })))
        .map_err(error_response)
}
