//! Core types and the temporal fleet state engine.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Everything here is a pure function of an [`aircraft::AircraftRecord`]
//! collection and a scenario date; storage backends implement
//! [`store::FleetStore`].

pub mod aggregate;
pub mod aircraft;
pub mod calendar;
pub mod error;
pub mod state;
pub mod store;

pub use error::{Error, Result};
