//! [`SqliteStore`] — the SQLite implementation of [`FleetStore`].

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::OptionalExtension as _;

use fleet_core::{
  aircraft::{AircraftRecord, NewAircraft},
  store::FleetStore,
};

use crate::{
  Error, Result,
  encode::{AIRCRAFT_COLUMNS, RawAircraft, encode_date, encode_lease_kind},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A fleet table backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert a fully-built [`AircraftRecord`] into the `aircraft` table.
  ///
  /// Returns `false` without writing if the registration is already taken.
  async fn insert_aircraft(&self, record: &AircraftRecord) -> Result<bool> {
    let registration       = record.registration.clone();
    let msn                = record.manufacturing_serial_number.clone();
    let manufactured_str   = record.manufactured_date.map(encode_date);
    let lease_kind_str     = encode_lease_kind(record.lease_kind);
    let aircraft_type      = record.aircraft_type.clone();
    let aircraft_variant   = record.aircraft_variant.clone();
    let fleet_in_str       = encode_date(record.fleet_in_date);
    let fleet_out_str      = record.fleet_out_date.map(encode_date);
    let ownership_str      = record.ownership_change_date.map(encode_date);
    let next_c_check_str   = record.next_c_check_date.map(encode_date);

    let inserted = self
      .conn
      .call(move |conn| {
        let result = conn.execute(
          "INSERT INTO aircraft (
             registration, msn, manufactured_date, lease_kind,
             aircraft_type, aircraft_variant, fleet_in_date, fleet_out_date,
             ownership_change_date, next_c_check_date
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            registration,
            msn,
            manufactured_str,
            lease_kind_str,
            aircraft_type,
            aircraft_variant,
            fleet_in_str,
            fleet_out_str,
            ownership_str,
            next_c_check_str,
          ],
        );
        match result {
          Ok(_) => Ok(true),
          Err(e) if is_key_conflict(&e) => Ok(false),
          Err(e) => Err(e.into()),
        }
      })
      .await?;
    Ok(inserted)
  }
}

/// A primary-key clash on `registration`. CHECK failures are left alone.
fn is_key_conflict(e: &rusqlite::Error) -> bool {
  matches!(
    e,
    rusqlite::Error::SqliteFailure(err, _)
      if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
        || err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

// ─── FleetStore impl ─────────────────────────────────────────────────────────

impl FleetStore for SqliteStore {
  type Error = Error;

  async fn add_aircraft(&self, input: NewAircraft) -> Result<AircraftRecord> {
    let record = input.into_record()?;

    if !self.insert_aircraft(&record).await? {
      return Err(
        fleet_core::Error::DuplicateRegistration(record.registration).into(),
      );
    }
    tracing::debug!(
      registration = %record.registration,
      lease_kind = %record.lease_kind,
      "aircraft added"
    );
    Ok(record)
  }

  async fn get_aircraft(
    &self,
    registration: String,
  ) -> Result<Option<AircraftRecord>> {
    let raw: Option<RawAircraft> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {AIRCRAFT_COLUMNS} FROM aircraft WHERE registration = ?1"
              ),
              rusqlite::params![registration],
              RawAircraft::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawAircraft::into_record).transpose()
  }

  async fn list_aircraft(&self) -> Result<Vec<AircraftRecord>> {
    let raws: Vec<RawAircraft> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {AIRCRAFT_COLUMNS} FROM aircraft ORDER BY registration"
        ))?;
        let rows = stmt
          .query_map([], RawAircraft::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAircraft::into_record).collect()
  }

  async fn close_aircraft(
    &self,
    registration: String,
    fleet_out_date: NaiveDate,
  ) -> Result<AircraftRecord> {
    let mut record = self
      .get_aircraft(registration.clone())
      .await?
      .ok_or_else(|| fleet_core::Error::AircraftNotFound(registration.clone()))?;

    record.close(fleet_out_date)?;

    // Update and re-read in one transaction; a close that lost the race sees
    // `updated == 0` and the winner's date.
    let out_str = encode_date(fleet_out_date);
    let reg = registration.clone();
    let (updated, raw) = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let updated = tx.execute(
          "UPDATE aircraft SET fleet_out_date = ?2
           WHERE registration = ?1 AND fleet_out_date IS NULL",
          rusqlite::params![reg, out_str],
        )?;
        let raw = tx
          .query_row(
            &format!(
              "SELECT {AIRCRAFT_COLUMNS} FROM aircraft WHERE registration = ?1"
            ),
            rusqlite::params![reg],
            RawAircraft::from_row,
          )
          .optional()?;
        tx.commit()?;
        Ok((updated, raw))
      })
      .await?;

    let stored = raw
      .map(RawAircraft::into_record)
      .transpose()?
      .ok_or_else(|| fleet_core::Error::AircraftNotFound(registration.clone()))?;

    if updated == 0
      && let Some(existing) = stored.fleet_out_date
    {
      return Err(
        fleet_core::Error::AlreadyClosed {
          registration,
          fleet_out_date: existing,
        }
        .into(),
      );
    }

    tracing::debug!(
      registration = %stored.registration,
      %fleet_out_date,
      "aircraft closed"
    );
    Ok(stored)
  }

  async fn remove_aircraft(&self, registration: String) -> Result<bool> {
    let reg = registration.clone();
    let deleted = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "DELETE FROM aircraft WHERE registration = ?1",
          rusqlite::params![reg],
        )?;
        Ok(n > 0)
      })
      .await?;

    if deleted {
      tracing::debug!(%registration, "aircraft removed");
    }
    Ok(deleted)
  }
}
