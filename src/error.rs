use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

/// Error kinds surfaced by the entity store and auth layers.
///
/// Each variant has a fixed HTTP mapping (`status`); user-facing messages are
/// the variant display strings. Database errors are logged and surfaced as a
/// generic 500 so internals never leak to the client.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),

    #[error("شماره تلفن {0} قبلاً برای یک شاگرد ثبت شده است")]
    DuplicatePhone(String),

    #[error("مورد درخواستی یافت نشد")]
    NotFound,

    #[error("ابتدا وارد حساب کاربری شوید")]
    Unauthorized,

    #[error("حساب کاربری شما غیرفعال شده است. لطفاً با مربی خود تماس بگیرید")]
    AccountDeactivated,

    #[error("مربی پیش‌فرض سامانه تعریف نشده است")]
    TrainerNotFound,

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Session(#[from] redis::RedisError),
}

impl StoreError {
    pub fn status(&self) -> StatusCode {
        match self {
            StoreError::Validation(_) | StoreError::DuplicatePhone(_) => StatusCode::BAD_REQUEST,
            StoreError::NotFound => StatusCode::NOT_FOUND,
            StoreError::Unauthorized => StatusCode::UNAUTHORIZED,
            StoreError::AccountDeactivated => StatusCode::FORBIDDEN,
            StoreError::TrainerNotFound
            | StoreError::Database(_)
            | StoreError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert a `RowNotFound` from a `fetch_one` into the 404 kind.
    pub fn from_fetch(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            other => StoreError::Database(other),
        }
    }
}

/// Uniform `{"error": <message>}` response body.
pub fn error_response(err: StoreError) -> (StatusCode, Json<Value>) {
    let status = err.status();
    let message = match &err {
        StoreError::Database(e) => {
            tracing::error!("database error: {e}");
            "خطای داخلی سرور".to_string()
        }
        StoreError::Session(e) => {
            tracing::error!("session store error: {e}");
            "خطای داخلی سرور".to_string()
        }
        other => other.to_string(),
    };
    (status, Json(json!({ "error": message })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_is_fixed_per_kind() {
        assert_eq!(
            StoreError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        // Duplicate phone is 400, not 409.
        assert_eq!(
            StoreError::DuplicatePhone("09121111111".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(StoreError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(StoreError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            StoreError::AccountDeactivated.status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            StoreError::TrainerNotFound.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn duplicate_phone_message_names_the_phone() {
        let msg = StoreError::DuplicatePhone("09121111111".into()).to_string();
        assert!(msg.contains("09121111111"));
    }

    #[test]
    fn row_not_found_becomes_not_found() {
        let err = StoreError::from_fetch(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::NotFound));
    }

    #[test]
    fn database_errors_do_not_leak_internals() {
        let (status, Json(body)) = error_response(StoreError::Database(sqlx::Error::PoolClosed));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body["error"].as_str().unwrap().contains("pool"));
    }
}
