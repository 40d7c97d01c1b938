//! Pure functions turning fetched data into renderable view models.
//!
//! Nothing here touches the network or the terminal; adapters in the binary
//! decide how the views are drawn.

use serde::Serialize;

use crate::{
    model::{CurrentConditions, DailyEntry, Forecast, HourlyEntry, Location},
    units::{UnitSystem, format_humidity, format_precipitation, format_temperature, format_wind_speed},
    wmo::classify,
};

pub const DAYS_SHOWN: usize = 7;
pub const HOURS_PER_DAY: usize = 24;
pub const HOUR_STEP: usize = 3;

const TODAY_LABEL: &str = "Today";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentView {
    pub location: String,
    pub date: String,
    pub temperature: String,
    pub feels_like: String,
    pub humidity: String,
    pub wind: String,
    pub precipitation: String,
    pub icon_file: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRow {
    pub label: String,
    pub emoji: &'static str,
    pub high: String,
    pub low: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayOption {
    pub label: String,
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyRow {
    pub emoji: &'static str,
    pub time: String,
    pub temperature: String,
}

/// Everything one dashboard render needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub units: UnitSystem,
    pub current: CurrentView,
    pub daily: Vec<DailyRow>,
    pub days: Vec<DayOption>,
    pub selected_day: usize,
    pub hourly: Vec<HourlyRow>,
}

/// The date shown is the observation's local date, e.g. "Monday, Jan 15, 2024".
pub fn current_view(location: &Location, current: &CurrentConditions, unit: UnitSystem) -> CurrentView {
    let code = classify(current.weather_code);
    CurrentView {
        location: location.label(),
        date: current.time.format("%A, %b %-d, %Y").to_string(),
        temperature: format_temperature(current.temperature_c, unit),
        feels_like: format_temperature(current.apparent_temperature_c, unit),
        humidity: format_humidity(current.humidity_pct),
        wind: format_wind_speed(current.wind_speed_kph, unit),
        precipitation: format_precipitation(current.precipitation_mm, unit),
        icon_file: code.icon_file,
        emoji: code.emoji,
        description: code.description,
    }
}

fn day_label(index: usize, entry: &DailyEntry, fmt: &str) -> String {
    if index == 0 {
        TODAY_LABEL.to_string()
    } else {
        entry.date.format(fmt).to_string()
    }
}

/// One row per day for the first seven days; extra entries are ignored.
pub fn daily_summary(daily: &[DailyEntry], unit: UnitSystem) -> Vec<DailyRow> {
    daily
        .iter()
        .take(DAYS_SHOWN)
        .enumerate()
        .map(|(i, day)| DailyRow {
            label: day_label(i, day, "%a"),
            emoji: classify(day.weather_code).emoji,
            high: format_temperature(day.temp_max_c, unit),
            low: format_temperature(day.temp_min_c, unit),
        })
        .collect()
}

pub fn day_options(daily: &[DailyEntry]) -> Vec<DayOption> {
    daily
        .iter()
        .take(DAYS_SHOWN)
        .enumerate()
        .map(|(i, day)| DayOption {
            label: day_label(i, day, "%A"),
            value: i,
        })
        .collect()
}

/// Every third hour of day `day`, clamped to the fetched series. `None`
/// when no hourly data exists for that day.
pub fn hourly_window(hourly: &[HourlyEntry], day: usize, unit: UnitSystem) -> Option<Vec<HourlyRow>> {
    let start = day.checked_mul(HOURS_PER_DAY)?;
    if start >= hourly.len() {
        return None;
    }
    let end = (start + HOURS_PER_DAY).min(hourly.len());

    Some(
        hourly[start..end]
            .iter()
            .step_by(HOUR_STEP)
            .map(|hour| HourlyRow {
                emoji: classify(hour.weather_code).emoji,
                time: hour.time.format("%-I %p").to_string(),
                temperature: format_temperature(hour.temperature_c, unit),
            })
            .collect(),
    )
}

pub fn dashboard_view(
    location: &Location,
    forecast: &Forecast,
    unit: UnitSystem,
    selected_day: usize,
) -> DashboardView {
    DashboardView {
        units: unit,
        current: current_view(location, &forecast.current, unit),
        daily: daily_summary(&forecast.daily, unit),
        days: day_options(&forecast.daily),
        selected_day,
        hourly: hourly_window(&forecast.hourly, selected_day, unit).unwrap_or_default(),
    }
}
