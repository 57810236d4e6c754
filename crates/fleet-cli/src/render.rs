//! Plain-text tables for terminal output.

use std::fmt::Write as _;

use fleet_core::{
  aggregate::{DistributionKey, ProjectionPoint},
  aircraft::AircraftRecord,
  state::FleetView,
};

use crate::client::Distribution;

fn opt_date(d: Option<chrono::NaiveDate>) -> String {
  d.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
}

fn opt_age(age: Option<f64>) -> String {
  age.map(|a| format!("{a:.2}")).unwrap_or_else(|| "-".to_string())
}

/// The raw fleet table.
pub fn fleet_table(fleet: &[AircraftRecord]) -> String {
  let mut out = String::new();
  let _ = writeln!(
    out,
    "{:<10} {:<8} {:<16} {:<24} {:<11} {:<11} {:<11}",
    "REG", "MSN", "LEASE", "TYPE / VARIANT", "BUILT", "FLEET-IN", "FLEET-OUT"
  );
  for a in fleet {
    let _ = writeln!(
      out,
      "{:<10} {:<8} {:<16} {:<24} {:<11} {:<11} {:<11}",
      a.registration,
      a.manufacturing_serial_number,
      a.lease_kind,
      a.type_variant(),
      opt_date(a.manufactured_date),
      a.fleet_in_date.to_string(),
      opt_date(a.fleet_out_date),
    );
  }
  out
}

/// "Fleet status on <date>": average age then one row per aircraft.
pub fn status(view: &FleetView) -> String {
  let mut out = String::new();
  let _ = writeln!(out, "Fleet status on {}", view.as_of);
  let _ = writeln!(
    out,
    "Active aircraft: {}   Average age: {:.2} years",
    view.active_count, view.average_age
  );
  let _ = writeln!(out);
  let _ = writeln!(
    out,
    "{:<10} {:<24} {:<16} {:>7} {:<6}",
    "REG", "TYPE / VARIANT", "LEASE AT DATE", "AGE", "ACTIVE"
  );
  for s in &view.aircraft {
    let _ = writeln!(
      out,
      "{:<10} {:<24} {:<16} {:>7} {:<6}",
      s.aircraft.registration,
      s.aircraft.type_variant(),
      s.state.effective_lease_kind,
      opt_age(s.state.age_years),
      if s.state.is_active { "yes" } else { "no" },
    );
  }
  out
}

/// Year-by-year average age.
pub fn projection(points: &[ProjectionPoint]) -> String {
  let mut out = String::new();
  let _ = writeln!(out, "{:<6} {:<11} {:>8}", "YEAR", "DATE", "AVG AGE");
  for p in points {
    let _ = writeln!(
      out,
      "{:<6} {:<11} {:>8.2}",
      p.year,
      p.date.to_string(),
      p.average_age
    );
  }
  out
}

/// Counts with their share of the active fleet, largest first.
pub fn distribution(dist: &Distribution) -> String {
  let heading = match dist.by {
    DistributionKey::LeaseKind => "Lease type distribution",
    DistributionKey::TypeVariant => "Aircraft type + variant distribution",
  };
  let total: usize = dist.counts.values().sum();

  let mut rows: Vec<_> = dist.counts.iter().collect();
  rows.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

  let mut out = String::new();
  let _ = writeln!(out, "{heading} on {}", dist.as_of);
  for (key, count) in rows {
    let share = *count as f64 * 100.0 / total as f64;
    let _ = writeln!(out, "{key:<32} {count:>4} {share:>6.1}%");
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::NaiveDate;
  use fleet_core::aircraft::{LeaseKind, NewAircraft};

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn fleet() -> Vec<AircraftRecord> {
    let mut fin = NewAircraft::new("9H-FIN", LeaseKind::FinanceLease, date(2016, 1, 1));
    fin.manufactured_date = Some(date(2015, 1, 1));
    fin.aircraft_type = "Airbus 321".into();
    fin.aircraft_variant = "A321neo".into();
    let unknown = NewAircraft::new("9H-UNK", LeaseKind::OperatingLease, date(2016, 1, 1));
    vec![fin.into_record().unwrap(), unknown.into_record().unwrap()]
  }

  #[test]
  fn status_shows_effective_lease_and_missing_age() {
    let view = FleetView::materialize(&fleet(), date(2026, 1, 1), false);
    let text = status(&view);

    assert!(text.starts_with("Fleet status on 2026-01-01\n"));
    assert!(text.contains("Average age: 11.00 years"));
    let fin_row = text.lines().find(|l| l.starts_with("9H-FIN")).unwrap();
    assert!(fin_row.contains("owned"));
    assert!(fin_row.contains("Airbus 321 / A321neo"));
    let unk_row = text.lines().find(|l| l.starts_with("9H-UNK")).unwrap();
    assert!(unk_row.contains(" - "));
  }

  #[test]
  fn projection_has_row_per_point() {
    let points =
      fleet_core::aggregate::project_average_age(&fleet(), date(2025, 1, 1), 2);
    let text = projection(&points);
    assert_eq!(text.lines().count(), 4);
    assert!(text.lines().nth(1).unwrap().starts_with("2025"));
  }

  #[test]
  fn distribution_sorts_by_count_and_shows_share() {
    let dist = Distribution {
      as_of:  date(2025, 1, 1),
      by:     DistributionKey::LeaseKind,
      counts: [("owned".to_string(), 1), ("operating_lease".to_string(), 3)]
        .into_iter()
        .collect(),
    };
    let text = distribution(&dist);
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines[0], "Lease type distribution on 2025-01-01");
    assert!(lines[1].starts_with("operating_lease"));
    assert!(lines[1].ends_with("75.0%"));
    assert!(lines[2].ends_with("25.0%"));
  }

  #[test]
  fn fleet_table_lists_every_record() {
    let text = fleet_table(&fleet());
    assert_eq!(text.lines().count(), 3);
    assert!(text.contains("finance_lease"));
  }
}
