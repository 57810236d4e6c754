//! SQL schema for the fleet SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Dates are ISO 8601 calendar dates (YYYY-MM-DD) so they sort as text.
CREATE TABLE IF NOT EXISTS aircraft (
    registration          TEXT PRIMARY KEY,
    msn                   TEXT NOT NULL,
    manufactured_date     TEXT,
    lease_kind            TEXT NOT NULL,   -- 'owned' | 'finance_lease' | 'operating_lease'
    aircraft_type         TEXT NOT NULL,
    aircraft_variant      TEXT NOT NULL,
    fleet_in_date         TEXT NOT NULL,
    fleet_out_date        TEXT,            -- NULL while still in the fleet
    ownership_change_date TEXT,            -- finance leases only
    next_c_check_date     TEXT,
    CHECK (fleet_out_date IS NULL OR fleet_out_date >= fleet_in_date)
);

CREATE INDEX IF NOT EXISTS aircraft_fleet_in_idx ON aircraft(fleet_in_date);

PRAGMA user_version = 1;
";
