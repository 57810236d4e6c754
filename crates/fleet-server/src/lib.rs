//! HTTP server wiring for the fleet scenario API.
//!
//! Holds the runtime configuration and assembles the top-level router; the
//! `fleet-server` binary only parses arguments, opens the store and serves.

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use fleet_api::{ApiState, DEFAULT_MAX_PROJECTION_YEARS};
use fleet_core::store::FleetStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `FLEET_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                 String,
  #[serde(default = "default_port")]
  pub port:                 u16,
  #[serde(default = "default_store_path")]
  pub store_path:           PathBuf,
  #[serde(default = "default_max_projection_years")]
  pub max_projection_years: u32,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8080 }

fn default_store_path() -> PathBuf { PathBuf::from("fleet.db") }

fn default_max_projection_years() -> u32 { DEFAULT_MAX_PROJECTION_YEARS }

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the server router: the JSON API under `/api` plus a liveness probe.
pub fn router<S>(store: Arc<S>, config: &ServerConfig) -> Router
where
  S: FleetStore + Clone + 'static,
{
  let api = fleet_api::api_router(ApiState {
    store,
    max_projection_years: config.max_projection_years,
  });

  Router::new()
    .route("/health", get(|| async { "ok" }))
    .nest("/api", api)
    .layer(TraceLayer::new_for_http())
}
