//! The `FleetStore` trait — the fleet table the engine reads from.
//!
//! The trait is implemented by storage backends (e.g. `fleet-store-sqlite`).
//! Higher layers (`fleet-api`, `fleet-server`) depend on this abstraction,
//! not on any concrete backend. The engine itself never touches a store; it
//! is handed the snapshot returned by [`FleetStore::list_aircraft`].

use std::future::Future;

use chrono::NaiveDate;

use crate::aircraft::{AircraftRecord, NewAircraft};

/// Errors a store can return, with access to the domain rule that was
/// violated, if any, so callers can tell a rejected action from a backend
/// failure.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn as_fleet_error(&self) -> Option<&crate::Error>;
}

/// Abstraction over a fleet table backend.
///
/// Records are inserted once and closed at most once. All methods return
/// `Send` futures so the trait can be used in multi-threaded async runtimes.
pub trait FleetStore: Send + Sync {
  type Error: StoreError;

  /// Add an aircraft, deriving its ownership change date.
  ///
  /// Fails with [`crate::Error::DuplicateRegistration`] if the registration
  /// is already present.
  fn add_aircraft(
    &self,
    input: NewAircraft,
  ) -> impl Future<Output = Result<AircraftRecord, Self::Error>> + Send + '_;

  /// Retrieve one aircraft by registration. Returns `None` if not found.
  fn get_aircraft(
    &self,
    registration: String,
  ) -> impl Future<Output = Result<Option<AircraftRecord>, Self::Error>> + Send + '_;

  /// The whole fleet table, ordered by registration.
  fn list_aircraft(
    &self,
  ) -> impl Future<Output = Result<Vec<AircraftRecord>, Self::Error>> + Send + '_;

  /// Record that an aircraft leaves the fleet on `fleet_out_date`.
  ///
  /// Fails if the aircraft is unknown, already closed, or the date precedes
  /// its fleet-in date.
  fn close_aircraft(
    &self,
    registration: String,
    fleet_out_date: NaiveDate,
  ) -> impl Future<Output = Result<AircraftRecord, Self::Error>> + Send + '_;

  /// Delete an aircraft outright. Returns `false` if it was not present.
  fn remove_aircraft(
    &self,
    registration: String,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
