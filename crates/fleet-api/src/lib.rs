//! JSON REST API for the fleet scenario engine.
//!
//! Exposes an axum [`Router`] backed by any [`fleet_core::store::FleetStore`].
//! TLS, auth and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", fleet_api::api_router(ApiState::new(store.clone())))
//! ```

pub mod aircraft;
pub mod error;
pub mod fleet;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use fleet_core::store::FleetStore;

pub use error::ApiError;

/// Upper bound on `years` for projection requests unless configured.
pub const DEFAULT_MAX_PROJECTION_YEARS: u32 = 100;

/// Shared state threaded through all API handlers.
#[derive(Clone)]
pub struct ApiState<S> {
  pub store:                Arc<S>,
  /// Largest projection horizon a request may ask for.
  pub max_projection_years: u32,
}

impl<S> ApiState<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self {
      store,
      max_projection_years: DEFAULT_MAX_PROJECTION_YEARS,
    }
  }
}

/// Default scenario date when a request names none.
pub(crate) fn today() -> NaiveDate { Utc::now().date_naive() }

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: ApiState<S>) -> Router<()>
where
  S: FleetStore + Clone + 'static,
{
  Router::new()
    // Fleet table
    .route("/aircraft", get(aircraft::list::<S>).post(aircraft::create::<S>))
    .route(
      "/aircraft/{registration}",
      get(aircraft::get_one::<S>).delete(aircraft::remove::<S>),
    )
    .route(
      "/aircraft/{registration}/fleet-out",
      post(aircraft::fleet_out::<S>),
    )
    .route(
      "/aircraft/{registration}/state",
      get(aircraft::derived_state::<S>),
    )
    // Scenario reports
    .route("/fleet/status", get(fleet::status::<S>))
    .route("/fleet/average-age", get(fleet::average::<S>))
    .route("/fleet/projection", get(fleet::projection::<S>))
    .route("/fleet/distribution", get(fleet::distribution::<S>))
    .route("/fleet/overview", get(fleet::overview::<S>))
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
