//! Calendar arithmetic shared by ownership transfer and projections.

use chrono::{Months, NaiveDate};

/// Advance `date` by whole calendar years, keeping month and day.
///
/// A Feb 29 start lands on Feb 28 in non-leap target years. Returns `None`
/// only if the result falls outside the range chrono can represent.
pub fn add_years(date: NaiveDate, years: u32) -> Option<NaiveDate> {
  years
    .checked_mul(12)
    .and_then(|months| date.checked_add_months(Months::new(months)))
}

/// Round to two decimal places, the precision ages are reported in.
pub(crate) fn round2(value: f64) -> f64 { (value * 100.0).round() / 100.0 }
