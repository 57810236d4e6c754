//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use fleet_core::store::StoreError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Classify a store error by the fleet rule it reports, if any.
  pub fn from_store<E: StoreError>(e: E) -> Self {
    use fleet_core::Error as Fleet;

    match e.as_fleet_error() {
      Some(Fleet::AircraftNotFound(_)) => Self::NotFound(e.to_string()),
      Some(Fleet::DuplicateRegistration(_) | Fleet::AlreadyClosed { .. }) => {
        Self::Conflict(e.to_string())
      }
      Some(
        Fleet::FleetOutBeforeFleetIn { .. } | Fleet::UnknownLeaseKind(_),
      ) => Self::BadRequest(e.to_string()),
      None => Self::Store(Box::new(e)),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
