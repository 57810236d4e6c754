//! Aircraft records — the static facts the engine derives everything from.
//!
//! A record is created once when the aircraft enters the fleet and closed at
//! most once by assigning a fleet-out date. Nothing else about it ever
//! changes; lease status, age and membership at a given date are computed on
//! read (see [`crate::state`]).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Result, calendar::add_years};

/// Years after manufacture at which a finance lease passes into ownership.
pub const OWNERSHIP_TRANSFER_YEARS: u32 = 10;

// ─── Lease kind ──────────────────────────────────────────────────────────────

/// How the operator holds an aircraft.
///
/// The legacy short spellings (`own`, `finance`, `operating` and friends) are
/// accepted on input so older fleet exports still load.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
  strum::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
pub enum LeaseKind {
  #[serde(alias = "own")]
  #[strum(to_string = "owned", serialize = "own")]
  Owned,
  #[serde(alias = "finance", alias = "financial")]
  #[strum(to_string = "finance_lease", serialize = "finance", serialize = "financial")]
  FinanceLease,
  #[serde(alias = "operating", alias = "operational")]
  #[strum(
    to_string = "operating_lease",
    serialize = "operating",
    serialize = "operational"
  )]
  OperatingLease,
}

impl LeaseKind {
  /// Parse a stored or user-supplied lease kind.
  pub fn parse(s: &str) -> Result<Self> {
    s.parse().map_err(|_| Error::UnknownLeaseKind(s.to_owned()))
  }

  /// The canonical string form; matches the serde representation.
  pub fn as_str(self) -> &'static str { self.into() }
}

// ─── AircraftRecord ──────────────────────────────────────────────────────────

/// One aircraft in the fleet table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AircraftRecord {
  /// Fleet-unique tail registration, e.g. `"9H-AEN"`.
  pub registration:                String,
  /// Manufacturer serial number (MSN).
  pub manufacturing_serial_number: String,
  pub manufactured_date:           Option<NaiveDate>,
  pub lease_kind:                  LeaseKind,
  pub aircraft_type:               String,
  pub aircraft_variant:            String,
  pub fleet_in_date:               NaiveDate,
  /// Exclusive end of fleet membership; `None` means still in the fleet.
  pub fleet_out_date:              Option<NaiveDate>,
  /// Set only for finance leases with a known manufacture date.
  pub ownership_change_date:       Option<NaiveDate>,
  pub next_c_check_date:           Option<NaiveDate>,
}

impl AircraftRecord {
  /// Assign the fleet-out date. A record can be closed only once, and never
  /// before it entered the fleet.
  pub fn close(&mut self, fleet_out_date: NaiveDate) -> Result<()> {
    if let Some(existing) = self.fleet_out_date {
      return Err(Error::AlreadyClosed {
        registration:   self.registration.clone(),
        fleet_out_date: existing,
      });
    }
    check_fleet_window(self.fleet_in_date, fleet_out_date)?;
    self.fleet_out_date = Some(fleet_out_date);
    Ok(())
  }

  /// `"<type> / <variant>"`, the key used for type mix breakdowns.
  pub fn type_variant(&self) -> String {
    format!("{} / {}", self.aircraft_type, self.aircraft_variant)
  }
}

/// The date a finance lease converts to ownership, if one applies.
pub fn ownership_change_date(
  lease_kind: LeaseKind,
  manufactured_date: Option<NaiveDate>,
) -> Option<NaiveDate> {
  match lease_kind {
    LeaseKind::FinanceLease => {
      manufactured_date.and_then(|d| add_years(d, OWNERSHIP_TRANSFER_YEARS))
    }
    LeaseKind::Owned | LeaseKind::OperatingLease => None,
  }
}

fn check_fleet_window(
  fleet_in_date: NaiveDate,
  fleet_out_date: NaiveDate,
) -> Result<()> {
  if fleet_out_date < fleet_in_date {
    return Err(Error::FleetOutBeforeFleetIn {
      fleet_in_date,
      fleet_out_date,
    });
  }
  Ok(())
}

// ─── NewAircraft ─────────────────────────────────────────────────────────────

/// Input to [`crate::store::FleetStore::add_aircraft`].
/// `ownership_change_date` is always derived; it is not accepted from callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAircraft {
  pub registration:                String,
  #[serde(alias = "msn")]
  pub manufacturing_serial_number: String,
  #[serde(default)]
  pub manufactured_date:           Option<NaiveDate>,
  pub lease_kind:                  LeaseKind,
  pub aircraft_type:               String,
  pub aircraft_variant:            String,
  pub fleet_in_date:               NaiveDate,
  #[serde(default)]
  pub fleet_out_date:              Option<NaiveDate>,
  #[serde(default)]
  pub next_c_check_date:           Option<NaiveDate>,
}

impl NewAircraft {
  /// Convenience constructor with all optional fields unset.
  pub fn new(
    registration: impl Into<String>,
    lease_kind: LeaseKind,
    fleet_in_date: NaiveDate,
  ) -> Self {
    Self {
      registration: registration.into(),
      manufacturing_serial_number: String::new(),
      manufactured_date: None,
      lease_kind,
      aircraft_type: String::new(),
      aircraft_variant: String::new(),
      fleet_in_date,
      fleet_out_date: None,
      next_c_check_date: None,
    }
  }

  /// Validate the input and build the record, deriving the ownership change
  /// date for finance leases.
  pub fn into_record(self) -> Result<AircraftRecord> {
    if let Some(out) = self.fleet_out_date {
      check_fleet_window(self.fleet_in_date, out)?;
    }
    Ok(AircraftRecord {
      ownership_change_date: ownership_change_date(
        self.lease_kind,
        self.manufactured_date,
      ),
      registration: self.registration,
      manufacturing_serial_number: self.manufacturing_serial_number,
      manufactured_date: self.manufactured_date,
      lease_kind: self.lease_kind,
      aircraft_type: self.aircraft_type,
      aircraft_variant: self.aircraft_variant,
      fleet_in_date: self.fleet_in_date,
      fleet_out_date: self.fleet_out_date,
      next_c_check_date: self.next_c_check_date,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[test]
  fn finance_lease_gets_ownership_change_date() {
    let mut input =
      NewAircraft::new("9H-FIN", LeaseKind::FinanceLease, date(2016, 3, 1));
    input.manufactured_date = Some(date(2015, 1, 1));

    let record = input.into_record().unwrap();
    assert_eq!(record.ownership_change_date, Some(date(2025, 1, 1)));
  }

  #[test]
  fn finance_lease_without_manufacture_date_has_no_transfer() {
    let record =
      NewAircraft::new("9H-FIN", LeaseKind::FinanceLease, date(2016, 3, 1))
        .into_record()
        .unwrap();
    assert_eq!(record.ownership_change_date, None);
  }

  #[test]
  fn other_leases_never_get_ownership_change_date() {
    for kind in [LeaseKind::Owned, LeaseKind::OperatingLease] {
      let mut input = NewAircraft::new("9H-OTH", kind, date(2016, 3, 1));
      input.manufactured_date = Some(date(2015, 1, 1));
      assert_eq!(input.into_record().unwrap().ownership_change_date, None);
    }
  }

  #[test]
  fn leap_day_manufacture_transfers_on_feb_28() {
    assert_eq!(
      ownership_change_date(LeaseKind::FinanceLease, Some(date(2016, 2, 29))),
      Some(date(2026, 2, 28))
    );
  }

  #[test]
  fn into_record_rejects_fleet_out_before_fleet_in() {
    let mut input =
      NewAircraft::new("9H-BAD", LeaseKind::Owned, date(2020, 1, 1));
    input.fleet_out_date = Some(date(2019, 12, 31));
    assert!(matches!(
      input.into_record(),
      Err(Error::FleetOutBeforeFleetIn { .. })
    ));
  }

  #[test]
  fn close_sets_fleet_out_once() {
    let mut record =
      NewAircraft::new("9H-CLS", LeaseKind::Owned, date(2020, 1, 1))
        .into_record()
        .unwrap();

    record.close(date(2020, 1, 1)).unwrap();
    assert_eq!(record.fleet_out_date, Some(date(2020, 1, 1)));

    let err = record.close(date(2021, 1, 1)).unwrap_err();
    assert!(matches!(err, Error::AlreadyClosed { fleet_out_date, .. }
      if fleet_out_date == date(2020, 1, 1)));
  }

  #[test]
  fn close_rejects_date_before_fleet_in() {
    let mut record =
      NewAircraft::new("9H-CLS", LeaseKind::Owned, date(2020, 1, 1))
        .into_record()
        .unwrap();
    assert!(record.close(date(2019, 6, 1)).is_err());
    assert_eq!(record.fleet_out_date, None);
  }

  #[test]
  fn lease_kind_accepts_legacy_spellings() {
    assert_eq!(LeaseKind::parse("own").unwrap(), LeaseKind::Owned);
    assert_eq!(LeaseKind::parse("financial").unwrap(), LeaseKind::FinanceLease);
    assert_eq!(
      LeaseKind::parse("operating_lease").unwrap(),
      LeaseKind::OperatingLease
    );
    assert!(matches!(
      LeaseKind::parse("wet"),
      Err(Error::UnknownLeaseKind(s)) if s == "wet"
    ));

    let kind: LeaseKind = serde_json::from_str("\"finance\"").unwrap();
    assert_eq!(kind, LeaseKind::FinanceLease);
  }

  #[test]
  fn lease_kind_display_matches_serde() {
    for kind in
      [LeaseKind::Owned, LeaseKind::FinanceLease, LeaseKind::OperatingLease]
    {
      let json = serde_json::to_string(&kind).unwrap();
      assert_eq!(json, format!("\"{kind}\""));
      assert_eq!(kind.as_str(), kind.to_string());
    }
  }

  #[test]
  fn new_aircraft_accepts_msn_alias() {
    let input: NewAircraft = serde_json::from_str(
      r#"{
        "registration": "9H-NEW",
        "msn": "7012",
        "lease_kind": "operating",
        "aircraft_type": "Airbus 320",
        "aircraft_variant": "A320neo",
        "fleet_in_date": "2022-05-01"
      }"#,
    )
    .unwrap();
    assert_eq!(input.manufacturing_serial_number, "7012");
    assert_eq!(input.lease_kind, LeaseKind::OperatingLease);
    assert_eq!(input.manufactured_date, None);
  }
}
