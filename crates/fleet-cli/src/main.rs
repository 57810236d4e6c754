//! `fleet` — command-line client for the fleet scenario server.
//!
//! # Usage
//!
//! ```
//! fleet --url http://localhost:8080 status --as-of 2027-01-01
//! fleet projection --years 10
//! fleet add --registration 9H-NEW --lease finance --type "Airbus 320" \
//!   --variant A320neo --manufactured 2023-05-02 --fleet-in 2023-06-01
//! fleet fleet-out 9H-NEW 2031-03-31
//! ```

mod client;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use client::{ApiClient, ApiConfig};
use fleet_core::{
  aggregate::{DEFAULT_HORIZON_YEARS, DistributionKey},
  aircraft::{LeaseKind, NewAircraft},
};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "http://localhost:8080";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "fleet", about = "Command-line client for the fleet scenario server")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the fleet server (default: http://localhost:8080).
  #[arg(long, env = "FLEET_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List every aircraft record.
  List,

  /// Add an aircraft to the fleet.
  Add {
    #[arg(long)]
    registration: String,
    #[arg(long, default_value = "")]
    msn:          String,
    #[arg(long)]
    manufactured: Option<NaiveDate>,
    /// owned, finance_lease or operating_lease (short forms accepted).
    #[arg(long, value_parser = LeaseKind::parse)]
    lease:        LeaseKind,
    #[arg(long = "type")]
    aircraft_type: String,
    #[arg(long)]
    variant:      String,
    #[arg(long)]
    fleet_in:     NaiveDate,
    #[arg(long)]
    fleet_out:    Option<NaiveDate>,
    #[arg(long)]
    next_c_check: Option<NaiveDate>,
  },

  /// Record the date an aircraft leaves the fleet.
  FleetOut {
    registration: String,
    date:         NaiveDate,
  },

  /// Delete an aircraft record outright.
  Remove { registration: String },

  /// Fleet status on a scenario date.
  Status {
    /// Scenario date (default: today on the server).
    #[arg(long)]
    as_of: Option<NaiveDate>,
    /// Include aircraft that are not active on the scenario date.
    #[arg(long)]
    all:   bool,
  },

  /// Average age projected over the coming years.
  Projection {
    #[arg(long)]
    start: Option<NaiveDate>,
    #[arg(long, default_value_t = DEFAULT_HORIZON_YEARS)]
    years: u32,
  },

  /// Active aircraft counted by lease kind or by type and variant.
  Distribution {
    #[arg(long)]
    as_of: Option<NaiveDate>,
    #[arg(long, value_enum, default_value_t = By::LeaseKind)]
    by:    By,
  },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum By {
  LeaseKind,
  TypeVariant,
}

impl From<By> for DistributionKey {
  fn from(by: By) -> Self {
    match by {
      By::LeaseKind => DistributionKey::LeaseKind,
      By::TypeVariant => DistributionKey::TypeVariant,
    }
  }
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| DEFAULT_URL.to_string()),
  };

  let client = ApiClient::new(api_config)?;
  run(&client, args.command).await
}

async fn run(client: &ApiClient, command: Command) -> Result<()> {
  match command {
    Command::List => {
      let fleet = client.list_aircraft().await?;
      print!("{}", render::fleet_table(&fleet));
    }
    Command::Add {
      registration,
      msn,
      manufactured,
      lease,
      aircraft_type,
      variant,
      fleet_in,
      fleet_out,
      next_c_check,
    } => {
      let input = NewAircraft {
        registration,
        manufacturing_serial_number: msn,
        manufactured_date: manufactured,
        lease_kind: lease,
        aircraft_type,
        aircraft_variant: variant,
        fleet_in_date: fleet_in,
        fleet_out_date: fleet_out,
        next_c_check_date: next_c_check,
      };
      let record = client.add_aircraft(&input).await?;
      println!("Aircraft {} added to fleet.", record.registration);
      if let Some(change) = record.ownership_change_date {
        println!("Ownership transfers on {change}.");
      }
    }
    Command::FleetOut { registration, date } => {
      let record = client.fleet_out(&registration, date).await?;
      println!("Aircraft {} leaves the fleet on {date}.", record.registration);
    }
    Command::Remove { registration } => {
      client.remove_aircraft(&registration).await?;
      println!("Aircraft {registration} removed from fleet.");
    }
    Command::Status { as_of, all } => {
      let view = client.status(as_of, all).await?;
      print!("{}", render::status(&view));
    }
    Command::Projection { start, years } => {
      let points = client.projection(start, years).await?;
      print!("{}", render::projection(&points));
    }
    Command::Distribution { as_of, by } => {
      let dist = client.distribution(as_of, by.into()).await?;
      print!("{}", render::distribution(&dist));
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use clap::CommandFactory;

  #[test]
  fn args_are_well_formed() { Args::command().debug_assert(); }

  #[test]
  fn add_parses_short_lease_spelling() {
    let args = Args::try_parse_from([
      "fleet",
      "add",
      "--registration",
      "9H-NEW",
      "--lease",
      "finance",
      "--type",
      "Airbus 320",
      "--variant",
      "A320neo",
      "--fleet-in",
      "2023-06-01",
    ])
    .unwrap();
    match args.command {
      Command::Add { lease, fleet_in, manufactured, .. } => {
        assert_eq!(lease, LeaseKind::FinanceLease);
        assert_eq!(fleet_in, NaiveDate::from_ymd_opt(2023, 6, 1).unwrap());
        assert_eq!(manufactured, None);
      }
      other => panic!("unexpected command: {other:?}"),
    }
  }

  #[test]
  fn distribution_defaults_to_lease_kind() {
    let args = Args::try_parse_from(["fleet", "distribution"]).unwrap();
    assert!(matches!(
      args.command,
      Command::Distribution { by: By::LeaseKind, as_of: None }
    ));
  }

  #[test]
  fn projection_defaults_to_ten_years() {
    let args = Args::try_parse_from(["fleet", "projection"]).unwrap();
    assert!(matches!(args.command, Command::Projection { years: 10, start: None }));
  }
}
