//! Async HTTP client wrapping the fleet JSON API.

use std::{collections::BTreeMap, time::Duration};

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use fleet_core::{
  aggregate::{DistributionKey, ProjectionPoint},
  aircraft::{AircraftRecord, NewAircraft},
  state::FleetView,
};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Connection settings for the fleet API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// A categorical breakdown as returned by `GET /api/fleet/distribution`.
#[derive(Debug, Deserialize)]
pub struct Distribution {
  pub as_of:  NaiveDate,
  pub by:     DistributionKey,
  pub counts: BTreeMap<String, usize>,
}

#[derive(Serialize)]
struct DistributionQuery {
  #[serde(skip_serializing_if = "Option::is_none")]
  as_of: Option<NaiveDate>,
  by:    DistributionKey,
}

/// Async HTTP client for the fleet JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  /// Turn a non-success response into an error carrying the server's
  /// `{"error": ...}` message when there is one.
  async fn check(resp: Response, what: &str) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }
    let message = resp
      .json::<serde_json::Value>()
      .await
      .ok()
      .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_owned))
      .unwrap_or_else(|| status.to_string());
    Err(anyhow!("{what} → {status}: {message}"))
  }

  // ── Fleet table ───────────────────────────────────────────────────────────

  /// `GET /api/aircraft`
  pub async fn list_aircraft(&self) -> Result<Vec<AircraftRecord>> {
    tracing::debug!("GET /aircraft");
    let resp = self
      .client
      .get(self.url("/aircraft"))
      .send()
      .await
      .context("GET /aircraft failed")?;
    Self::check(resp, "GET /aircraft")
      .await?
      .json()
      .await
      .context("deserialising aircraft")
  }

  /// `POST /api/aircraft`
  pub async fn add_aircraft(&self, input: &NewAircraft) -> Result<AircraftRecord> {
    tracing::debug!(registration = %input.registration, "POST /aircraft");
    let resp = self
      .client
      .post(self.url("/aircraft"))
      .json(input)
      .send()
      .await
      .context("POST /aircraft failed")?;
    Self::check(resp, "POST /aircraft")
      .await?
      .json()
      .await
      .context("deserialising added aircraft")
  }

  /// `POST /api/aircraft/:registration/fleet-out`
  pub async fn fleet_out(
    &self,
    registration: &str,
    fleet_out_date: NaiveDate,
  ) -> Result<AircraftRecord> {
    let path = format!("/aircraft/{registration}/fleet-out");
    tracing::debug!("POST {path}");
    let resp = self
      .client
      .post(self.url(&path))
      .json(&json!({ "fleet_out_date": fleet_out_date }))
      .send()
      .await
      .with_context(|| format!("POST {path} failed"))?;
    Self::check(resp, &format!("POST {path}"))
      .await?
      .json()
      .await
      .context("deserialising closed aircraft")
  }

  /// `DELETE /api/aircraft/:registration`
  pub async fn remove_aircraft(&self, registration: &str) -> Result<()> {
    let path = format!("/aircraft/{registration}");
    tracing::debug!("DELETE {path}");
    let resp = self
      .client
      .delete(self.url(&path))
      .send()
      .await
      .with_context(|| format!("DELETE {path} failed"))?;
    Self::check(resp, &format!("DELETE {path}")).await?;
    Ok(())
  }

  // ── Reports ───────────────────────────────────────────────────────────────

  /// `GET /api/fleet/status?as_of=<date>[&include_inactive=true]`
  pub async fn status(
    &self,
    as_of: Option<NaiveDate>,
    include_inactive: bool,
  ) -> Result<FleetView> {
    let mut query = vec![("include_inactive", include_inactive.to_string())];
    if let Some(d) = as_of {
      query.push(("as_of", d.to_string()));
    }
    let resp = self
      .client
      .get(self.url("/fleet/status"))
      .query(&query)
      .send()
      .await
      .context("GET /fleet/status failed")?;
    Self::check(resp, "GET /fleet/status")
      .await?
      .json()
      .await
      .context("deserialising fleet status")
  }

  /// `GET /api/fleet/projection?start=<date>&years=<n>`
  pub async fn projection(
    &self,
    start: Option<NaiveDate>,
    years: u32,
  ) -> Result<Vec<ProjectionPoint>> {
    let mut query = vec![("years", years.to_string())];
    if let Some(d) = start {
      query.push(("start", d.to_string()));
    }
    let resp = self
      .client
      .get(self.url("/fleet/projection"))
      .query(&query)
      .send()
      .await
      .context("GET /fleet/projection failed")?;
    Self::check(resp, "GET /fleet/projection")
      .await?
      .json()
      .await
      .context("deserialising projection")
  }

  /// `GET /api/fleet/distribution?as_of=<date>&by=<key>`
  pub async fn distribution(
    &self,
    as_of: Option<NaiveDate>,
    by: DistributionKey,
  ) -> Result<Distribution> {
    let resp = self
      .client
      .get(self.url("/fleet/distribution"))
      .query(&DistributionQuery { as_of, by })
      .send()
      .await
      .context("GET /fleet/distribution failed")?;
    Self::check(resp, "GET /fleet/distribution")
      .await?
      .json()
      .await
      .context("deserialising distribution")
  }
}
