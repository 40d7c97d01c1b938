use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A named place. Replaced wholesale whenever a new location is resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(name: impl Into<String>, country: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            latitude,
            longitude,
        }
    }

    /// "Name, Country", or just the name when the country is unknown.
    pub fn label(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}

/// Conditions at fetch time, in canonical metric units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Local time at the location.
    pub time: NaiveDateTime,
    pub temperature_c: f64,
    pub apparent_temperature_c: f64,
    pub humidity_pct: f64,
    pub wind_speed_kph: f64,
    pub precipitation_mm: f64,
    pub weather_code: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntry {
    pub date: NaiveDate,
    pub weather_code: i32,
    pub temp_max_c: f64,
    pub temp_min_c: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyEntry {
    pub time: NaiveDateTime,
    pub weather_code: i32,
    pub temperature_c: f64,
}

/// Everything returned by one forecast fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub current: CurrentConditions,
    pub hourly: Vec<HourlyEntry>,
    pub daily: Vec<DailyEntry>,
}
