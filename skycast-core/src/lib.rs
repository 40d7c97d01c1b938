//! Core library for the `skycast` weather dashboard.
//!
//! This crate defines:
//! - WMO weather code classification and unit formatting
//! - Location resolution on top of geocoding services
//! - Forecast fetching (always in canonical metric units)
//! - The presentation pipeline producing renderable view models
//! - The dashboard session, search history and on-disk configuration
//!
//! It is used by `skycast-cli`, but rendering is left to the caller so other
//! front ends can reuse it.

pub mod config;
pub mod error;
pub mod geocode;
pub mod history;
mod http;
pub mod model;
pub mod present;
pub mod provider;
pub mod session;
pub mod units;
pub mod wmo;

pub use config::Config;
pub use error::WeatherError;
pub use geocode::{Geocoder, LocationResolver, OpenMeteoGeocoder};
pub use history::{HistoryStore, SearchHistory};
pub use model::{CurrentConditions, DailyEntry, Forecast, HourlyEntry, Location};
pub use present::DashboardView;
pub use provider::{ForecastProvider, OpenMeteoProvider};
pub use session::{Dashboard, Phase};
pub use units::UnitSystem;
