use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, StatusCode},
    Json,
};
use serde_json::Value;

use crate::error::{error_response, StoreError};
use crate::models::session::{Identity, SessionData};
use crate::services::sessions::SessionStore;
use crate::services::tenant::TenantService;
use crate::AppState;

pub const SESSION_COOKIE: &str = "sid";

/// Extract a named cookie value from request headers.
pub fn get_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    headers
        .get(header::COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .find_map(|part| {
            let part = part.trim();
            if part.starts_with(&prefix) {
                Some(part[prefix.len()..].to_string())
            } else {
                None
            }
        })
}

fn cookie_from_parts(parts: &Parts) -> Option<String> {
    get_cookie(&parts.headers, SESSION_COOKIE)
}

/// Per-request session state, populated once by this extractor and immutable
/// afterwards. `identity` is the single place the caller's role is decided;
/// handlers never look at raw session fields.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub session_id: String,
    /// True when the request carried a cookie that resolved to a live
    /// session record (as opposed to a fresh id minted for this request).
    pub existing: bool,
    pub data: SessionData,
    pub identity: Identity,
}

impl FromRequestParts<AppState> for SessionContext {
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let mut redis = state.redis.clone();

        if let Some(sid) = cookie_from_parts(parts) {
            let loaded = SessionStore::load(&mut redis, &sid)
                .await
                .map_err(error_response)?;
            if let Some(data) = loaded {
                let identity = data.identity();
                return Ok(SessionContext {
                    session_id: sid,
                    existing: true,
                    data,
                    identity,
                });
            }
            // Cookie present but the record expired or was destroyed; keep
            // the id so preference rows keyed by it stay reachable.
            return Ok(SessionContext {
                session_id: sid,
                existing: false,
                data: SessionData::default(),
                identity: Identity::Anonymous,
            });
        }

        Ok(SessionContext {
            session_id: SessionStore::new_session_id(),
            existing: false,
            data: SessionData::default(),
            identity: Identity::Anonymous,
        })
    }
}

/// An authenticated trainer with its resolved tenant id. Rejects with 401
/// and performs no side effects when the session has no trainer shape.
#[derive(Debug, Clone)]
pub struct TrainerAuth {
    pub trainer_id: i64,
    pub phone: String,
    pub session: SessionContext,
}

impl FromRequestParts<AppState> for TrainerAuth {
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = SessionContext::from_request_parts(parts, state).await?;

        let phone = match &session.identity {
            Identity::Trainer { phone } => phone.clone(),
            _ => return Err(error_response(StoreError::Unauthorized)),
        };

        let trainer_id = TenantService::ensure_trainer_exists(&state.db, &phone)
            .await
            .map_err(error_response)?;

        Ok(TrainerAuth {
            trainer_id,
            phone,
            session,
        })
    }
}

/// An authenticated student. Re-checks the `is_active` flag on every request
/// so deactivation revokes access immediately, without touching the
/// student's data.
#[derive(Debug, Clone)]
pub struct StudentAuth {
    pub student_id: i64,
    pub phone: String,
    pub trainer_id: i64,
    pub session: SessionContext,
}

impl FromRequestParts<AppState> for StudentAuth {
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = SessionContext::from_request_parts(parts, state).await?;

        let (student_id, phone) = match &session.identity {
            Identity::Student { id, phone } => (*id, phone.clone()),
            _ => return Err(error_response(StoreError::Unauthorized)),
        };

        let row: Option<(i64, bool)> =
            sqlx::query_as("SELECT trainer_id, is_active FROM students WHERE id = $1")
                .bind(student_id)
                .fetch_optional(&state.db)
                .await
                .map_err(|e| error_response(StoreError::Database(e)))?;

        match row {
            None => Err(error_response(StoreError::Unauthorized)),
            Some((_, false)) => Err(error_response(StoreError::AccountDeactivated)),
            Some((trainer_id, true)) => Ok(StudentAuth {
                student_id,
                phone,
                trainer_id,
                session,
            }),
        }
    }
}

/// Build a `Set-Cookie` header value for the session cookie.
pub fn session_cookie(sid: &str, max_age_seconds: u64) -> String {
    format!("{SESSION_COOKIE}={sid}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age_seconds}")
}

/// Expire the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn cookie_parsing_handles_multiple_pairs() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; sid=abc-123; lang=fa"),
        );
        assert_eq!(get_cookie(&headers, "sid"), Some("abc-123".to_string()));
        assert_eq!(get_cookie(&headers, "theme"), Some("dark".to_string()));
        assert_eq!(get_cookie(&headers, "missing"), None);
    }

    #[test]
    fn session_cookie_is_http_only() {
        let cookie = session_cookie("abc", 3600);
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=3600"));
        assert!(clear_session_cookie().contains("Max-Age=0"));
    }
}
