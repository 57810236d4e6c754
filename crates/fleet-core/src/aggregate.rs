//! Fleet-level reductions over per-record derivations: average age,
//! categorical breakdowns, and multi-year projections.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
  aircraft::{AircraftRecord, LeaseKind},
  calendar::{add_years, round2},
  state::FleetView,
};

/// Default number of years past the scenario date that a projection covers.
pub const DEFAULT_HORIZON_YEARS: u32 = 10;

// ─── Average age ─────────────────────────────────────────────────────────────

/// Mean age of the aircraft active at `t`, rounded to two decimals.
///
/// Aircraft without a manufacture date are left out of the mean entirely.
/// Returns `0.0` when no active aircraft has a known age.
pub fn average_age(fleet: &[AircraftRecord], t: NaiveDate) -> f64 {
  let (sum, count) = fleet
    .iter()
    .filter(|a| a.is_active(t))
    .filter_map(|a| a.age_years(t))
    .fold((0.0, 0_u32), |(sum, count), age| (sum + age, count + 1));

  if count == 0 {
    return 0.0;
  }
  round2(sum / f64::from(count))
}

// ─── Distributions ───────────────────────────────────────────────────────────

/// Count active aircraft at `t` per key.
pub fn distribution<K, F>(
  fleet: &[AircraftRecord],
  t: NaiveDate,
  mut key_fn: F,
) -> BTreeMap<K, usize>
where
  K: Ord,
  F: FnMut(&AircraftRecord, NaiveDate) -> K,
{
  let mut counts = BTreeMap::new();
  for record in fleet.iter().filter(|a| a.is_active(t)) {
    *counts.entry(key_fn(record, t)).or_insert(0) += 1;
  }
  counts
}

/// Active aircraft at `t` per effective lease kind.
pub fn lease_distribution(
  fleet: &[AircraftRecord],
  t: NaiveDate,
) -> BTreeMap<LeaseKind, usize> {
  distribution(fleet, t, AircraftRecord::effective_lease_kind)
}

/// Active aircraft at `t` per `"<type> / <variant>"`.
pub fn type_variant_distribution(
  fleet: &[AircraftRecord],
  t: NaiveDate,
) -> BTreeMap<String, usize> {
  distribution(fleet, t, |record, _| record.type_variant())
}

/// The built-in classifications a breakdown can be requested by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionKey {
  #[default]
  LeaseKind,
  TypeVariant,
}

impl DistributionKey {
  /// String-keyed counts, ready for display or serialisation.
  pub fn count(
    self,
    fleet: &[AircraftRecord],
    t: NaiveDate,
  ) -> BTreeMap<String, usize> {
    match self {
      Self::LeaseKind => lease_distribution(fleet, t)
        .into_iter()
        .map(|(kind, n)| (kind.to_string(), n))
        .collect(),
      Self::TypeVariant => type_variant_distribution(fleet, t),
    }
  }
}

// ─── Projection ──────────────────────────────────────────────────────────────

/// One point of an average-age projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
  pub year:        i32,
  pub date:        NaiveDate,
  pub average_age: f64,
}

/// The evaluation dates of a projection: `start` advanced by
/// `0..=years` calendar years.
///
/// Stops early if a date would fall outside the representable calendar.
pub fn projection_dates(
  start: NaiveDate,
  years: u32,
) -> impl Iterator<Item = NaiveDate> + Clone {
  (0..=years).map_while(move |k| add_years(start, k))
}

/// Average active age at each yearly anniversary of `start`, including
/// `start` itself — `years + 1` points in increasing year order.
pub fn project_average_age(
  fleet: &[AircraftRecord],
  start: NaiveDate,
  years: u32,
) -> Vec<ProjectionPoint> {
  projection_dates(start, years)
    .map(|date| ProjectionPoint {
      year: date.year(),
      date,
      average_age: average_age(fleet, date),
    })
    .collect()
}

// ─── Overview ────────────────────────────────────────────────────────────────

/// Everything the fleet overview screen shows for one scenario date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetOverview {
  pub status:                    FleetView,
  pub projection:                Vec<ProjectionPoint>,
  pub lease_distribution:        BTreeMap<String, usize>,
  pub type_variant_distribution: BTreeMap<String, usize>,
}

impl FleetOverview {
  pub fn build(fleet: &[AircraftRecord], as_of: NaiveDate, years: u32) -> Self {
    Self {
      status:                    FleetView::materialize(fleet, as_of, false),
      projection:                project_average_age(fleet, as_of, years),
      lease_distribution:        DistributionKey::LeaseKind.count(fleet, as_of),
      type_variant_distribution: DistributionKey::TypeVariant
        .count(fleet, as_of),
    }
  }
}
