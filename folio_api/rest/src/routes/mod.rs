use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ApiResponse;

pub mod contact;
pub mod health;
pub mod profile;

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err}");
    error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

pub fn error(code: StatusCode, error: &'static str) -> Response {
    error_with_details(code, error, None)
}

pub fn error_with_details(code: StatusCode, error: &'static str, details: Option<String>) -> Response {
    let response = ApiResponse {
        ok: false,
        error: Some(error),
        details,
    };
    (code, Json(response)).into_response()
}

pub fn ok() -> Response {
    let response = ApiResponse {
        ok: true,
        error: None,
        details: None,
    };
    Json(response).into_response()
}

pub async fn method_not_allowed() -> Response {
    error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

pub async fn not_found() -> Response {
    error(StatusCode::NOT_FOUND, "Not found")
}
