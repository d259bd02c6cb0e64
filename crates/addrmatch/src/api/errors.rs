use std::error::Error;

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use libaddrmatch::prelude::*;
use serde_json::json;
use tracing::*;

pub(super) struct ApiError(pub StatusCode, pub String, pub Option<Vec<String>>);

#[derive(Debug, thiserror::Error)]
pub enum AppError {
  #[error("missing resource")]
  ResourceNotFound,
  #[error("payload failed validation")]
  ValidationError(Vec<String>),
  #[error("server error, please check your logs for more information")]
  ServerError,
  #[error(transparent)]
  OtherError(#[from] anyhow::Error),

  #[error("invalid configuration: {0}")]
  ConfigError(String),
}

impl From<AddrMatchError> for AppError {
  fn from(value: AddrMatchError) -> Self {
    AppError::ConfigError(value.to_string())
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    let response = ApiError::from(&self);

    if response.0.is_server_error() {
      error!(error = self.source(), "{}", self.to_string());
    }

    response.into_response()
  }
}

impl From<&AppError> for ApiError {
  fn from(value: &AppError) -> Self {
    match value {
      AppError::ResourceNotFound => ApiError(StatusCode::NOT_FOUND, value.to_string(), None),
      AppError::ValidationError(details) => ApiError(StatusCode::UNPROCESSABLE_ENTITY, value.to_string(), Some(details.clone())),
      AppError::OtherError(inner) if inner.is::<AppError>() => match inner.downcast_ref::<AppError>() {
        Some(inner) => inner.into(),
        _ => ApiError(StatusCode::INTERNAL_SERVER_ERROR, AppError::ServerError.to_string(), None),
      },
      _ => ApiError(StatusCode::INTERNAL_SERVER_ERROR, AppError::ServerError.to_string(), None),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let payload = match self.2 {
      Some(details) => json!({
          "message": self.1.to_string(),
          "details": details,
      }),
      None => json!({
          "message": self.1.to_string(),
      }),
    };

    (self.0, Json(payload)).into_response()
  }
}

#[cfg(test)]
mod tests {
  use axum::http::StatusCode;

  use super::{ApiError, AppError};

  #[test]
  fn status_codes() {
    assert_eq!(ApiError::from(&AppError::ResourceNotFound).0, StatusCode::NOT_FOUND);
    assert_eq!(ApiError::from(&AppError::ValidationError(vec![])).0, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(ApiError::from(&AppError::ConfigError("oops".into())).0, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(ApiError::from(&AppError::OtherError(anyhow::Error::new(AppError::ResourceNotFound))).0, StatusCode::NOT_FOUND);
  }

  #[test]
  fn server_errors_are_opaque() {
    let ApiError(_, message, _) = ApiError::from(&AppError::OtherError(anyhow::anyhow!("database password is hunter2")));

    assert_eq!(message, "server error, please check your logs for more information");
  }
}
