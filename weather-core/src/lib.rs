//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Field-safe access to untrusted OpenWeather response bodies
//! - Current-conditions snapshots and daily forecast aggregation
//! - Temperature and wind unit conversion, display formatting
//! - Persisted preferences (unit, saved and default locations)
//! - The transport abstraction and last-write-wins request tracking
//!
//! Everything between a received body and a display string is synchronous
//! and total: malformed input degrades to documented defaults, never to an
//! error.

pub mod access;
pub mod config;
pub mod error;
pub mod forecast;
pub mod format;
pub mod model;
pub mod provider;
pub mod request;
pub mod snapshot;
pub mod units;
pub mod view;

pub use config::{Config, SavedLocation};
pub use error::WeatherError;
pub use model::{
    Atmosphere, Coordinates, CurrentConditions, DailyForecastSummary, DayKey, DayPeriod,
    HourlySlot, Place, TemperatureSnapshot, WeatherCondition, WindReading,
};
pub use provider::{Report, WeatherProvider, fetch_report, provider_from_config};
pub use request::{RequestToken, RequestTracker};
pub use units::{Measure, TemperatureUnit, WindSpeeds, WindUnit};
pub use view::WeatherView;
