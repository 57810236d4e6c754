//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Calendar dates are stored as `YYYY-MM-DD` strings; lease kinds as their
//! canonical snake_case name.

use chrono::NaiveDate;
use fleet_core::aircraft::{AircraftRecord, LeaseKind};

use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Column list shared by every `SELECT` that builds a [`RawAircraft`].
pub const AIRCRAFT_COLUMNS: &str = "registration, msn, manufactured_date, \
  lease_kind, aircraft_type, aircraft_variant, fleet_in_date, fleet_out_date, \
  ownership_change_date, next_c_check_date";

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

fn decode_opt_date(s: Option<&str>) -> Result<Option<NaiveDate>> {
  s.map(decode_date).transpose()
}

// ─── LeaseKind ───────────────────────────────────────────────────────────────

pub fn encode_lease_kind(k: LeaseKind) -> &'static str { k.as_str() }

pub fn decode_lease_kind(s: &str) -> Result<LeaseKind> {
  Ok(LeaseKind::parse(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from an `aircraft` row.
pub struct RawAircraft {
  pub registration:          String,
  pub msn:                   String,
  pub manufactured_date:     Option<String>,
  pub lease_kind:            String,
  pub aircraft_type:         String,
  pub aircraft_variant:      String,
  pub fleet_in_date:         String,
  pub fleet_out_date:        Option<String>,
  pub ownership_change_date: Option<String>,
  pub next_c_check_date:     Option<String>,
}

impl RawAircraft {
  /// Read a row selected with [`AIRCRAFT_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      registration:          row.get(0)?,
      msn:                   row.get(1)?,
      manufactured_date:     row.get(2)?,
      lease_kind:            row.get(3)?,
      aircraft_type:         row.get(4)?,
      aircraft_variant:      row.get(5)?,
      fleet_in_date:         row.get(6)?,
      fleet_out_date:        row.get(7)?,
      ownership_change_date: row.get(8)?,
      next_c_check_date:     row.get(9)?,
    })
  }

  pub fn into_record(self) -> Result<AircraftRecord> {
    Ok(AircraftRecord {
      manufactured_date:     decode_opt_date(self.manufactured_date.as_deref())?,
      lease_kind:            decode_lease_kind(&self.lease_kind)?,
      fleet_in_date:         decode_date(&self.fleet_in_date)?,
      fleet_out_date:        decode_opt_date(self.fleet_out_date.as_deref())?,
      ownership_change_date: decode_opt_date(
        self.ownership_change_date.as_deref(),
      )?,
      next_c_check_date:     decode_opt_date(self.next_c_check_date.as_deref())?,
      registration:          self.registration,
      manufacturing_serial_number: self.msn,
      aircraft_type:         self.aircraft_type,
      aircraft_variant:      self.aircraft_variant,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn dates_encode_as_iso() {
    let d = NaiveDate::from_ymd_opt(2024, 2, 9).unwrap();
    assert_eq!(encode_date(d), "2024-02-09");
    assert_eq!(decode_date("2024-02-09").unwrap(), d);
  }

  #[test]
  fn malformed_date_is_a_parse_error() {
    assert!(matches!(decode_date("09/02/2024"), Err(Error::DateParse(_))));
  }

  #[test]
  fn unknown_lease_kind_surfaces_as_core_error() {
    let err = decode_lease_kind("wet_lease").unwrap_err();
    assert!(matches!(
      err,
      Error::Core(fleet_core::Error::UnknownLeaseKind(ref s)) if s == "wet_lease"
    ));
  }
}
