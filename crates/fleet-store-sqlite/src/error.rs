//! Error type for `fleet-store-sqlite`.

use fleet_core::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A fleet management rule rejected the action.
  #[error(transparent)]
  Core(#[from] fleet_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date parse error: {0}")]
  DateParse(String),
}

impl StoreError for Error {
  fn as_fleet_error(&self) -> Option<&fleet_core::Error> {
    match self {
      Error::Core(e) => Some(e),
      Error::Database(_) | Error::DateParse(_) => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
