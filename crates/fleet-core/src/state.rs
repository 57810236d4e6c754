//! As-of derivations — what an aircraft looks like on a given scenario date.
//!
//! Nothing here is ever stored. Each query date gets a fresh derivation from
//! the static facts on the record, so the same record can be viewed at any
//! past, present or future date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  aggregate::average_age,
  aircraft::{AircraftRecord, LeaseKind},
  calendar::round2,
};

const DAYS_PER_YEAR: f64 = 365.25;

// ─── Per-record derivations ──────────────────────────────────────────────────

impl AircraftRecord {
  /// Lease classification at `t`, accounting for ownership transfer on
  /// finance leases (inclusive of the transfer date).
  pub fn effective_lease_kind(&self, t: NaiveDate) -> LeaseKind {
    match (self.lease_kind, self.ownership_change_date) {
      (LeaseKind::FinanceLease, Some(change)) if t >= change => LeaseKind::Owned,
      (kind, _) => kind,
    }
  }

  /// Age in years at `t`, rounded to two decimals. `None` without a
  /// manufacture date; negative before it.
  pub fn age_years(&self, t: NaiveDate) -> Option<f64> {
    self.manufactured_date.map(|built| {
      let days = t.signed_duration_since(built).num_days();
      round2(days as f64 / DAYS_PER_YEAR)
    })
  }

  /// Whether the aircraft is part of the operating fleet at `t`. The
  /// fleet-out date itself is already outside the fleet.
  pub fn is_active(&self, t: NaiveDate) -> bool {
    self.fleet_in_date <= t && self.fleet_out_date.is_none_or(|out| out > t)
  }

  /// All derived attributes at `t` in one value.
  pub fn derive_state(&self, t: NaiveDate) -> DerivedState {
    DerivedState {
      effective_lease_kind: self.effective_lease_kind(t),
      age_years:            self.age_years(t),
      is_active:            self.is_active(t),
    }
  }
}

/// The computed attributes of one aircraft at one date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedState {
  pub effective_lease_kind: LeaseKind,
  pub age_years:            Option<f64>,
  pub is_active:            bool,
}

// ─── Materialised view ───────────────────────────────────────────────────────

/// A record bundled with its derived state at some date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftStatus {
  #[serde(flatten)]
  pub aircraft: AircraftRecord,
  #[serde(flatten)]
  pub state:    DerivedState,
}

/// The fleet as of a scenario date — never stored, always derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetView {
  pub as_of:        NaiveDate,
  /// Mean age of active aircraft with a known manufacture date.
  pub average_age:  f64,
  pub active_count: usize,
  /// Active aircraft only, unless materialised with `include_inactive`.
  pub aircraft:     Vec<AircraftStatus>,
}

impl FleetView {
  /// Derive the view of `fleet` at `as_of`, preserving the input order.
  pub fn materialize(
    fleet: &[AircraftRecord],
    as_of: NaiveDate,
    include_inactive: bool,
  ) -> Self {
    let aircraft: Vec<AircraftStatus> = fleet
      .iter()
      .map(|record| AircraftStatus {
        state:    record.derive_state(as_of),
        aircraft: record.clone(),
      })
      .filter(|status| include_inactive || status.state.is_active)
      .collect();

    Self {
      as_of,
      average_age: average_age(fleet, as_of),
      active_count: fleet.iter().filter(|a| a.is_active(as_of)).count(),
      aircraft,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::aircraft::NewAircraft;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn aircraft(
    registration: &str,
    lease_kind: LeaseKind,
    manufactured: Option<NaiveDate>,
  ) -> AircraftRecord {
    let mut input = NewAircraft::new(registration, lease_kind, date(2016, 1, 1));
    input.manufactured_date = manufactured;
    input.into_record().unwrap()
  }

  // ── Effective lease kind ──────────────────────────────────────────────────

  #[test]
  fn non_finance_leases_never_change() {
    let dates = [date(1990, 1, 1), date(2025, 1, 1), date(2100, 12, 31)];
    for kind in [LeaseKind::Owned, LeaseKind::OperatingLease] {
      let record = aircraft("9H-AAA", kind, Some(date(2015, 1, 1)));
      for t in dates {
        assert_eq!(record.effective_lease_kind(t), kind);
      }
    }
  }

  #[test]
  fn non_finance_lease_ignores_stray_ownership_date() {
    let mut record =
      aircraft("9H-AAA", LeaseKind::OperatingLease, Some(date(2015, 1, 1)));
    record.ownership_change_date = Some(date(2020, 1, 1));
    assert_eq!(
      record.effective_lease_kind(date(2030, 1, 1)),
      LeaseKind::OperatingLease
    );
  }

  #[test]
  fn finance_lease_converts_on_transfer_date() {
    let record =
      aircraft("9H-FIN", LeaseKind::FinanceLease, Some(date(2015, 1, 1)));
    assert_eq!(record.ownership_change_date, Some(date(2025, 1, 1)));

    assert_eq!(
      record.effective_lease_kind(date(2024, 1, 1)),
      LeaseKind::FinanceLease
    );
    assert_eq!(
      record.effective_lease_kind(date(2024, 12, 31)),
      LeaseKind::FinanceLease
    );
    assert_eq!(record.effective_lease_kind(date(2025, 1, 1)), LeaseKind::Owned);
    assert_eq!(record.effective_lease_kind(date(2026, 1, 1)), LeaseKind::Owned);
  }

  #[test]
  fn finance_lease_without_transfer_date_stays_finance() {
    let record = aircraft("9H-FIN", LeaseKind::FinanceLease, None);
    assert_eq!(
      record.effective_lease_kind(date(2099, 1, 1)),
      LeaseKind::FinanceLease
    );
  }

  // ── Age ───────────────────────────────────────────────────────────────────

  #[test]
  fn age_is_none_without_manufacture_date() {
    let record = aircraft("9H-AAA", LeaseKind::Owned, None);
    assert_eq!(record.age_years(date(2025, 1, 1)), None);
  }

  #[test]
  fn age_in_fractional_years() {
    let record = aircraft("9H-AAA", LeaseKind::Owned, Some(date(2020, 1, 1)));
    // 1827 days / 365.25
    assert_eq!(record.age_years(date(2025, 1, 1)), Some(5.0));
    // 182 days / 365.25 = 0.498...
    assert_eq!(record.age_years(date(2020, 7, 1)), Some(0.5));
  }

  #[test]
  fn age_before_manufacture_is_negative() {
    let record = aircraft("9H-AAA", LeaseKind::Owned, Some(date(2020, 1, 1)));
    let age = record.age_years(date(2019, 1, 1)).unwrap();
    assert!(age < 0.0);
    assert_eq!(age, -1.0);
  }

  #[test]
  fn age_is_monotonic_in_t() {
    let record = aircraft("9H-AAA", LeaseKind::Owned, Some(date(2010, 6, 15)));
    let mut previous = f64::NEG_INFINITY;
    let mut t = date(2005, 1, 1);
    while t < date(2035, 1, 1) {
      let age = record.age_years(t).unwrap();
      assert!(age >= previous, "age decreased at {t}");
      previous = age;
      t = t + chrono::Days::new(37);
    }
  }

  // ── Activity ──────────────────────────────────────────────────────────────

  #[test]
  fn open_ended_record_is_active_from_fleet_in() {
    let mut input = NewAircraft::new("9H-ACT", LeaseKind::Owned, date(2020, 1, 1));
    input.manufactured_date = Some(date(2019, 1, 1));
    let record = input.into_record().unwrap();

    assert!(!record.is_active(date(2019, 12, 31)));
    assert!(record.is_active(date(2020, 1, 1)));
    assert!(record.is_active(date(2030, 1, 1)));
  }

  #[test]
  fn fleet_out_date_is_exclusive() {
    let mut input = NewAircraft::new("9H-OUT", LeaseKind::Owned, date(2020, 1, 1));
    input.fleet_out_date = Some(date(2023, 3, 1));
    let record = input.into_record().unwrap();

    assert!(record.is_active(date(2023, 2, 28)));
    assert!(!record.is_active(date(2023, 3, 1)));
    assert!(!record.is_active(date(2024, 1, 1)));
  }

  #[test]
  fn derive_state_bundles_all_fields() {
    let record =
      aircraft("9H-FIN", LeaseKind::FinanceLease, Some(date(2015, 1, 1)));
    let state = record.derive_state(date(2026, 1, 1));
    assert_eq!(state, DerivedState {
      effective_lease_kind: LeaseKind::Owned,
      age_years:            Some(11.0),
      is_active:            true,
    });
  }

  // ── View ──────────────────────────────────────────────────────────────────

  #[test]
  fn view_filters_inactive_unless_asked() {
    let active = aircraft("9H-AAA", LeaseKind::Owned, Some(date(2015, 1, 1)));
    let mut retired =
      aircraft("9H-BBB", LeaseKind::Owned, Some(date(2010, 1, 1)));
    retired.close(date(2020, 1, 1)).unwrap();
    let fleet = vec![active, retired];

    let view = FleetView::materialize(&fleet, date(2021, 1, 1), false);
    assert_eq!(view.active_count, 1);
    assert_eq!(view.aircraft.len(), 1);
    assert_eq!(view.aircraft[0].aircraft.registration, "9H-AAA");
    assert_eq!(view.average_age, 6.0);

    let full = FleetView::materialize(&fleet, date(2021, 1, 1), true);
    assert_eq!(full.active_count, 1);
    assert_eq!(full.aircraft.len(), 2);
    assert!(!full.aircraft[1].state.is_active);
  }

  #[test]
  fn status_serialises_flat() {
    let record =
      aircraft("9H-FIN", LeaseKind::FinanceLease, Some(date(2015, 1, 1)));
    let status = AircraftStatus {
      state:    record.derive_state(date(2024, 1, 1)),
      aircraft: record,
    };

    let json = serde_json::to_value(&status).unwrap();
    assert_eq!(json["registration"], "9H-FIN");
    assert_eq!(json["lease_kind"], "finance_lease");
    assert_eq!(json["effective_lease_kind"], "finance_lease");
    assert_eq!(json["is_active"], true);

    let back: AircraftStatus = serde_json::from_value(json).unwrap();
    assert_eq!(back, status);
  }
}
