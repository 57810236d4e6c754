//! Handlers for `/fleet` endpoints — the scenario-date reports.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/fleet/status` | `?as_of=`, `?include_inactive=true` |
//! | `GET`  | `/fleet/average-age` | `?as_of=` |
//! | `GET`  | `/fleet/projection` | `?start=`, `?years=` (default 10) |
//! | `GET`  | `/fleet/distribution` | `?as_of=`, `?by=lease_kind\|type_variant` |
//! | `GET`  | `/fleet/overview` | `?as_of=`, `?years=` |
//!
//! Every report reads one snapshot of the fleet table and hands it to the
//! engine; dates default to today.

use std::collections::BTreeMap;

use axum::{
  Json,
  extract::{Query, State},
};
use chrono::NaiveDate;
use fleet_core::{
  aggregate::{
    DEFAULT_HORIZON_YEARS, DistributionKey, FleetOverview, ProjectionPoint,
    average_age, project_average_age,
  },
  aircraft::AircraftRecord,
  state::FleetView,
  store::FleetStore,
};
use serde::{Deserialize, Serialize};

use crate::{ApiState, error::ApiError, today};

async fn snapshot<S: FleetStore>(
  state: &ApiState<S>,
) -> Result<Vec<AircraftRecord>, ApiError> {
  state
    .store
    .list_aircraft()
    .await
    .map_err(ApiError::from_store)
}

fn horizon<S>(state: &ApiState<S>, years: Option<u32>) -> Result<u32, ApiError> {
  let years = years.unwrap_or(DEFAULT_HORIZON_YEARS);
  if years > state.max_projection_years {
    return Err(ApiError::BadRequest(format!(
      "projection horizon of {years} years exceeds the limit of {}",
      state.max_projection_years
    )));
  }
  Ok(years)
}

// ─── Status ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StatusParams {
  pub as_of:            Option<NaiveDate>,
  /// Also list aircraft that are not active at `as_of`. Default `false`.
  #[serde(default)]
  pub include_inactive: bool,
}

/// `GET /fleet/status[?as_of=...][&include_inactive=true]`
pub async fn status<S: FleetStore>(
  State(state): State<ApiState<S>>,
  Query(params): Query<StatusParams>,
) -> Result<Json<FleetView>, ApiError> {
  let fleet = snapshot(&state).await?;
  let as_of = params.as_of.unwrap_or_else(today);
  Ok(Json(FleetView::materialize(&fleet, as_of, params.include_inactive)))
}

// ─── Average age ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AsOfParams {
  pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AverageAge {
  pub as_of:       NaiveDate,
  pub average_age: f64,
}

/// `GET /fleet/average-age[?as_of=...]`
pub async fn average<S: FleetStore>(
  State(state): State<ApiState<S>>,
  Query(params): Query<AsOfParams>,
) -> Result<Json<AverageAge>, ApiError> {
  let fleet = snapshot(&state).await?;
  let as_of = params.as_of.unwrap_or_else(today);
  Ok(Json(AverageAge {
    as_of,
    average_age: average_age(&fleet, as_of),
  }))
}

// ─── Projection ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ProjectionParams {
  pub start: Option<NaiveDate>,
  /// Years past `start`; the series has `years + 1` points.
  pub years: Option<u32>,
}

/// `GET /fleet/projection[?start=...][&years=...]`
pub async fn projection<S: FleetStore>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ProjectionParams>,
) -> Result<Json<Vec<ProjectionPoint>>, ApiError> {
  let years = horizon(&state, params.years)?;
  let fleet = snapshot(&state).await?;
  let start = params.start.unwrap_or_else(today);
  tracing::debug!(%start, years, aircraft = fleet.len(), "projecting fleet age");
  Ok(Json(project_average_age(&fleet, start, years)))
}

// ─── Distribution ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DistributionParams {
  pub as_of: Option<NaiveDate>,
  #[serde(default)]
  pub by:    DistributionKey,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Distribution {
  pub as_of:  NaiveDate,
  pub by:     DistributionKey,
  pub counts: BTreeMap<String, usize>,
}

/// `GET /fleet/distribution[?as_of=...][&by=lease_kind|type_variant]`
pub async fn distribution<S: FleetStore>(
  State(state): State<ApiState<S>>,
  Query(params): Query<DistributionParams>,
) -> Result<Json<Distribution>, ApiError> {
  let fleet = snapshot(&state).await?;
  let as_of = params.as_of.unwrap_or_else(today);
  Ok(Json(Distribution {
    as_of,
    by: params.by,
    counts: params.by.count(&fleet, as_of),
  }))
}

// ─── Overview ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct OverviewParams {
  pub as_of: Option<NaiveDate>,
  pub years: Option<u32>,
}

/// `GET /fleet/overview[?as_of=...][&years=...]`
pub async fn overview<S: FleetStore>(
  State(state): State<ApiState<S>>,
  Query(params): Query<OverviewParams>,
) -> Result<Json<FleetOverview>, ApiError> {
  let years = horizon(&state, params.years)?;
  let fleet = snapshot(&state).await?;
  let as_of = params.as_of.unwrap_or_else(today);
  Ok(Json(FleetOverview::build(&fleet, as_of, years)))
}
