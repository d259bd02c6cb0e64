mod compare;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::api::{AppState, dto::Health, errors::AppError};

pub use self::compare::{compare, compare_batch};

pub async fn not_found() -> impl IntoResponse {
  AppError::ResourceNotFound
}

pub async fn healthz() -> StatusCode {
  StatusCode::OK
}

pub async fn health() -> Json<Health> {
  Json(Health { status: "OK" })
}

pub async fn prometheus(State(state): State<AppState>) -> Result<String, AppError> {
  match state.prometheus {
    Some(handle) => Ok(handle.render()),
    None => Err(AppError::ResourceNotFound),
  }
}
