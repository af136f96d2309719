use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserPreference {
    pub id: i64,
    pub user_id: Option<i64>,
    pub session_id: Option<String>,
    pub pref_key: String,
    pub pref_value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Who a preference row belongs to. A numeric user id and a session token
/// are mutually exclusive; when a caller could present both, the session
/// token wins.
#[derive(Debug, Clone, PartialEq)]
pub enum PrefIdentity {
    User(i64),
    Session(String),
}

impl PrefIdentity {
    /// Resolve from the values a caller can supply. Session takes priority —
    /// most clients cannot produce a stable numeric id.
    pub fn resolve(user_id: Option<i64>, session_id: Option<String>) -> Option<Self> {
        match (session_id, user_id) {
            (Some(sid), _) => Some(PrefIdentity::Session(sid)),
            (None, Some(uid)) => Some(PrefIdentity::User(uid)),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SetPreferenceRequest {
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPreferencesRequest {
    /// Specific keys to clear; clears everything when absent.
    pub keys: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_wins_over_user_id() {
        let id = PrefIdentity::resolve(Some(7), Some("abc".into()));
        assert_eq!(id, Some(PrefIdentity::Session("abc".into())));
    }

    #[test]
    fn user_id_used_when_no_session() {
        let id = PrefIdentity::resolve(Some(7), None);
        assert_eq!(id, Some(PrefIdentity::User(7)));
    }

    #[test]
    fn no_identity_when_neither_present() {
        assert_eq!(PrefIdentity::resolve(None, None), None);
    }
}
