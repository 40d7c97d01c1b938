use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::WeatherError, model::Forecast};

pub mod openmeteo;

pub use openmeteo::OpenMeteoProvider;

/// Number of days every fetch covers, for both daily and hourly series.
pub const FORECAST_DAYS: usize = 7;

/// Source of forecast data. Implementations always return canonical metric
/// values (°C, km/h, mm) whatever unit system is being displayed.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch_forecast(&self, latitude: f64, longitude: f64) -> Result<Forecast, WeatherError>;
}
