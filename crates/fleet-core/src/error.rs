//! Error types for `fleet-core`.
//!
//! The engine itself never fails; these errors describe rejected fleet
//! management actions (adding, closing) that the store enforces.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("aircraft not found: {0}")]
  AircraftNotFound(String),

  #[error("registration {0} is already in the fleet")]
  DuplicateRegistration(String),

  #[error("aircraft {registration} already left the fleet on {fleet_out_date}")]
  AlreadyClosed {
    registration:   String,
    fleet_out_date: NaiveDate,
  },

  #[error(
    "fleet-out date {fleet_out_date} is before fleet-in date {fleet_in_date}"
  )]
  FleetOutBeforeFleetIn {
    fleet_in_date:  NaiveDate,
    fleet_out_date: NaiveDate,
  },

  #[error("unknown lease kind: {0:?}")]
  UnknownLeaseKind(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
