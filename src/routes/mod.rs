pub mod auth;
pub mod exercises;
pub mod health;
pub mod history;
pub mod meals;
pub mod metrics;
pub mod preferences;
pub mod programs;
pub mod student_auth;
pub mod student_panel;
pub mod students;
pub mod supplements;
pub mod support;

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::Response,
};
use serde_json::Value;

/// Build a JSON response, optionally setting the session cookie.
pub(crate) fn json_response_with_cookie(body: &Value, cookie: Option<&str>) -> Response {
    let body_str = serde_json::to_string(body).unwrap_or_default();
    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::SET_COOKIE, cookie);
    }
    builder.body(Body::from(body_str)).unwrap()
}
