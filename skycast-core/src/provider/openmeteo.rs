use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{
    config::Config,
    error::{WeatherError, validate_coordinates},
    http::{build_client, get_json},
    model::{CurrentConditions, DailyEntry, Forecast, HourlyEntry},
};

use super::{FORECAST_DAYS, ForecastProvider};

const CURRENT_FIELDS: &str = "temperature_2m,apparent_temperature,relative_humidity_2m,\
                              wind_speed_10m,precipitation,weather_code";
const HOURLY_FIELDS: &str = "temperature_2m,weather_code";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min";

/// Forecast provider for the Open-Meteo API (no API key required).
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    url: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, WeatherError> {
        Ok(Self {
            url: url.into(),
            http: build_client(timeout)?,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        Self::new(
            config.endpoints.forecast_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn query(latitude: f64, longitude: f64) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("current", CURRENT_FIELDS.to_string()),
            ("hourly", HOURLY_FIELDS.to_string()),
            ("daily", DAILY_FIELDS.to_string()),
            ("timezone", "auto".to_string()),
            ("forecast_days", FORECAST_DAYS.to_string()),
            ("temperature_unit", "celsius".to_string()),
            ("wind_speed_unit", "kmh".to_string()),
            ("precipitation_unit", "mm".to_string()),
        ]
    }
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    time: String,
    temperature_2m: f64,
    apparent_temperature: f64,
    relative_humidity_2m: f64,
    wind_speed_10m: f64,
    precipitation: f64,
    weather_code: i32,
}

#[derive(Debug, Deserialize)]
struct OmHourly {
    time: Vec<String>,
    temperature_2m: Vec<f64>,
    weather_code: Vec<i32>,
}

#[derive(Debug, Deserialize)]
struct OmDaily {
    time: Vec<String>,
    weather_code: Vec<i32>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    current: OmCurrent,
    hourly: OmHourly,
    daily: OmDaily,
}

#[async_trait]
impl ForecastProvider for OpenMeteoProvider {
    #[instrument(skip(self))]
    async fn fetch_forecast(&self, latitude: f64, longitude: f64) -> Result<Forecast, WeatherError> {
        validate_coordinates(latitude, longitude)?;

        let parsed: OmForecastResponse = get_json(
            &self.http,
            &self.url,
            &Self::query(latitude, longitude),
            "forecast",
        )
        .await?;

        let forecast = to_forecast(parsed)?;
        debug!(
            hourly = forecast.hourly.len(),
            daily = forecast.daily.len(),
            "forecast parsed"
        );
        Ok(forecast)
    }
}

fn to_forecast(parsed: OmForecastResponse) -> Result<Forecast, WeatherError> {
    let OmForecastResponse { current, hourly, daily } = parsed;

    let current = CurrentConditions {
        time: parse_local_time(&current.time)?,
        temperature_c: current.temperature_2m,
        apparent_temperature_c: current.apparent_temperature,
        humidity_pct: current.relative_humidity_2m,
        wind_speed_kph: current.wind_speed_10m,
        precipitation_mm: current.precipitation,
        weather_code: current.weather_code,
    };

    ensure_aligned(
        "hourly",
        hourly.time.len(),
        &[hourly.temperature_2m.len(), hourly.weather_code.len()],
    )?;
    let hourly = hourly
        .time
        .iter()
        .zip(hourly.weather_code)
        .zip(hourly.temperature_2m)
        .map(|((time, weather_code), temperature_c)| -> Result<_, WeatherError> {
            Ok(HourlyEntry {
                time: parse_local_time(time)?,
                weather_code,
                temperature_c,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    ensure_aligned(
        "daily",
        daily.time.len(),
        &[
            daily.weather_code.len(),
            daily.temperature_2m_max.len(),
            daily.temperature_2m_min.len(),
        ],
    )?;
    if daily.time.len() < FORECAST_DAYS {
        return Err(WeatherError::Network(format!(
            "forecast response contained {} daily entries, expected {FORECAST_DAYS}",
            daily.time.len()
        )));
    }
    let daily = daily
        .time
        .iter()
        .zip(daily.weather_code)
        .zip(daily.temperature_2m_max.into_iter().zip(daily.temperature_2m_min))
        .map(|((date, weather_code), (temp_max_c, temp_min_c))| -> Result<_, WeatherError> {
            Ok(DailyEntry {
                date: NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| {
                    WeatherError::Network(format!("Invalid date '{date}' in forecast: {e}"))
                })?,
                weather_code,
                temp_max_c,
                temp_min_c,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Forecast { current, hourly, daily })
}

fn ensure_aligned(series: &str, expected: usize, lengths: &[usize]) -> Result<(), WeatherError> {
    if lengths.iter().any(|len| *len != expected) {
        return Err(WeatherError::Network(format!(
            "{series} arrays in forecast response are not aligned: time has {expected} entries, fields have {lengths:?}"
        )));
    }
    Ok(())
}

/// Open-Meteo sends local times like `2024-01-15T14:00` when `timezone=auto`.
fn parse_local_time(s: &str) -> Result<NaiveDateTime, WeatherError> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|e| WeatherError::Network(format!("Invalid timestamp '{s}' in forecast: {e}")))
}
