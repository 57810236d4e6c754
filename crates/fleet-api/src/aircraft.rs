//! Handlers for `/aircraft` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/aircraft` | Whole fleet table, ordered by registration |
//! | `POST`   | `/aircraft` | Body: [`NewAircraft`]; returns 201 + stored record |
//! | `GET`    | `/aircraft/:registration` | 404 if not found |
//! | `DELETE` | `/aircraft/:registration` | 204, or 404 if not found |
//! | `POST`   | `/aircraft/:registration/fleet-out` | Body: [`FleetOutBody`] |
//! | `GET`    | `/aircraft/:registration/state` | Optional `?as_of=` |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::NaiveDate;
use fleet_core::{
  aircraft::{AircraftRecord, NewAircraft},
  state::AircraftStatus,
  store::FleetStore,
};
use serde::Deserialize;

use crate::{ApiState, error::ApiError, today};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /aircraft`
pub async fn list<S: FleetStore>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<AircraftRecord>>, ApiError> {
  let fleet = state
    .store
    .list_aircraft()
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(fleet))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /aircraft` — returns 201 + the stored [`AircraftRecord`], including
/// its derived ownership change date.
pub async fn create<S: FleetStore>(
  State(state): State<ApiState<S>>,
  Json(body): Json<NewAircraft>,
) -> Result<impl IntoResponse, ApiError> {
  let record = state
    .store
    .add_aircraft(body)
    .await
    .map_err(ApiError::from_store)?;
  tracing::info!(registration = %record.registration, "aircraft added to fleet");
  Ok((StatusCode::CREATED, Json(record)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

async fn fetch<S: FleetStore>(
  state: &ApiState<S>,
  registration: String,
) -> Result<AircraftRecord, ApiError> {
  state
    .store
    .get_aircraft(registration.clone())
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("aircraft {registration} not found")))
}

/// `GET /aircraft/:registration`
pub async fn get_one<S: FleetStore>(
  State(state): State<ApiState<S>>,
  Path(registration): Path<String>,
) -> Result<Json<AircraftRecord>, ApiError> {
  Ok(Json(fetch(&state, registration).await?))
}

// ─── Remove ───────────────────────────────────────────────────────────────────

/// `DELETE /aircraft/:registration` — drops the record entirely. Use
/// `fleet-out` instead to keep the aircraft's history in projections.
pub async fn remove<S: FleetStore>(
  State(state): State<ApiState<S>>,
  Path(registration): Path<String>,
) -> Result<StatusCode, ApiError> {
  let removed = state
    .store
    .remove_aircraft(registration.clone())
    .await
    .map_err(ApiError::from_store)?;
  if !removed {
    return Err(ApiError::NotFound(format!("aircraft {registration} not found")));
  }
  tracing::info!(%registration, "aircraft removed from fleet");
  Ok(StatusCode::NO_CONTENT)
}

// ─── Fleet-out ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct FleetOutBody {
  pub fleet_out_date: NaiveDate,
}

/// `POST /aircraft/:registration/fleet-out` — body:
/// `{"fleet_out_date":"2027-03-31"}`.
pub async fn fleet_out<S: FleetStore>(
  State(state): State<ApiState<S>>,
  Path(registration): Path<String>,
  Json(body): Json<FleetOutBody>,
) -> Result<Json<AircraftRecord>, ApiError> {
  let record = state
    .store
    .close_aircraft(registration, body.fleet_out_date)
    .await
    .map_err(ApiError::from_store)?;
  tracing::info!(
    registration = %record.registration,
    fleet_out_date = %body.fleet_out_date,
    "aircraft leaves fleet"
  );
  Ok(Json(record))
}

// ─── Derived state ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StateParams {
  /// Scenario date. Defaults to today.
  pub as_of: Option<NaiveDate>,
}

/// `GET /aircraft/:registration/state[?as_of=YYYY-MM-DD]`
pub async fn derived_state<S: FleetStore>(
  State(state): State<ApiState<S>>,
  Path(registration): Path<String>,
  Query(params): Query<StateParams>,
) -> Result<Json<AircraftStatus>, ApiError> {
  let record = fetch(&state, registration).await?;
  let as_of = params.as_of.unwrap_or_else(today);
  Ok(Json(AircraftStatus {
    state:    record.derive_state(as_of),
    aircraft: record,
  }))
}
