use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Prefix marking a trainer principal inside a session record.
pub const TRAINER_USER_PREFIX: &str = "trainer_";

/// Server-side session record, stored as JSON in Redis under `sess:<id>`.
/// Mutated only by the auth handlers; everything else reads it through the
/// per-request [`Identity`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionData {
    /// `trainer_<phone>` when a trainer is logged in.
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub is_logged_in: bool,
    #[serde(default)]
    pub student_logged_in: bool,
    #[serde(default)]
    pub current_student_phone: Option<String>,
    #[serde(default)]
    pub current_student_id: Option<i64>,
    #[serde(default)]
    pub remember_me_expiry: Option<DateTime<Utc>>,
}

impl SessionData {
    /// Decide the request identity once, here. Handlers never inspect the
    /// raw session fields.
    pub fn identity(&self) -> Identity {
        if self.student_logged_in {
            if let (Some(id), Some(phone)) =
                (self.current_student_id, self.current_student_phone.clone())
            {
                return Identity::Student { id, phone };
            }
        }
        if self.is_logged_in {
            if let Some(user_id) = &self.user_id {
                if let Some(phone) = user_id.strip_prefix(TRAINER_USER_PREFIX) {
                    return Identity::Trainer {
                        phone: phone.to_string(),
                    };
                }
            }
        }
        Identity::Anonymous
    }
}

/// Tagged identity of the caller, decided once per request at the
/// access-control boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Identity {
    Trainer { phone: String },
    Student { id: i64, phone: String },
    Anonymous,
}

/// Login/lockout state addressed by session token.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuthSession {
    pub id: i64,
    pub session_token: String,
    pub phone: Option<String>,
    pub attempts: i32,
    pub locked_until: Option<DateTime<Utc>>,
    pub remember_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct TrainerLoginRequest {
    pub phone: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct StudentLoginRequest {
    pub phone: String,
    #[serde(default, rename = "rememberMe")]
    pub remember_me: bool,
}

/// Iranian mobile numbers: 11 digits starting with 09.
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == 11 && phone.starts_with("09") && phone.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trainer_session_yields_trainer_identity() {
        let data = SessionData {
            user_id: Some("trainer_09120000000".into()),
            is_logged_in: true,
            ..Default::default()
        };
        assert_eq!(
            data.identity(),
            Identity::Trainer {
                phone: "09120000000".into()
            }
        );
    }

    #[test]
    fn student_session_wins_over_trainer_fields() {
        let data = SessionData {
            user_id: Some("trainer_09120000000".into()),
            is_logged_in: true,
            student_logged_in: true,
            current_student_id: Some(5),
            current_student_phone: Some("09121111111".into()),
            ..Default::default()
        };
        assert_eq!(
            data.identity(),
            Identity::Student {
                id: 5,
                phone: "09121111111".into()
            }
        );
    }

    #[test]
    fn logged_in_flag_without_trainer_prefix_is_anonymous() {
        let data = SessionData {
            user_id: Some("someone".into()),
            is_logged_in: true,
            ..Default::default()
        };
        assert_eq!(data.identity(), Identity::Anonymous);
    }

    #[test]
    fn empty_session_is_anonymous() {
        assert_eq!(SessionData::default().identity(), Identity::Anonymous);
    }

    #[test]
    fn session_blob_tolerates_missing_fields() {
        // Older session records may lack newer fields; all are defaulted.
        let data: SessionData = serde_json::from_str("{}").unwrap();
        assert!(!data.is_logged_in);
        assert_eq!(data.identity(), Identity::Anonymous);

        let data: SessionData =
            serde_json::from_str(r#"{"user_id":"trainer_09120000000","is_logged_in":true}"#)
                .unwrap();
        assert!(matches!(data.identity(), Identity::Trainer { .. }));
    }

    #[test]
    fn phone_validation_bounds() {
        assert!(is_valid_phone("09123456789"));
        assert!(!is_valid_phone("9123456789"));
        assert!(!is_valid_phone("0912345678"));
        assert!(!is_valid_phone("091234567890"));
        assert!(!is_valid_phone("0912345678a"));
    }
}
