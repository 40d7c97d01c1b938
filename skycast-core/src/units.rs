//! Display formatting for canonical metric measurements.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

const MPH_PER_KPH: f64 = 0.621371;
const INCHES_PER_MM: f64 = 0.0393701;

/// Unit system used when formatting values for display. Stored data is
/// always metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [UnitSystem] {
        &[UnitSystem::Metric, UnitSystem::Imperial]
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitSystem {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported: metric, imperial."
            )),
        }
    }
}

// Halves round toward positive infinity, so -1.5 becomes -1. An integer
// result cannot render as "-0".
fn round_to_int(value: f64) -> i64 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i64
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn format_temperature(celsius: f64, unit: UnitSystem) -> String {
    let value = match unit {
        UnitSystem::Metric => celsius,
        UnitSystem::Imperial => celsius_to_fahrenheit(celsius),
    };
    format!("{}°", round_to_int(value))
}

pub fn format_wind_speed(kph: f64, unit: UnitSystem) -> String {
    match unit {
        UnitSystem::Metric => format!("{} km/h", round_to_int(kph)),
        UnitSystem::Imperial => format!("{} mph", round_to_int(kph * MPH_PER_KPH)),
    }
}

/// Metric precipitation is shown exactly as fetched; imperial is converted
/// and fixed to two decimals.
pub fn format_precipitation(mm: f64, unit: UnitSystem) -> String {
    match unit {
        UnitSystem::Metric => format!("{mm} mm"),
        UnitSystem::Imperial => format!("{:.2} in", mm * INCHES_PER_MM),
    }
}

pub fn format_humidity(pct: f64) -> String {
    format!("{}%", round_to_int(pct))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_metric() {
        assert_eq!(format_temperature(0.0, UnitSystem::Metric), "0°");
        assert_eq!(format_temperature(21.6, UnitSystem::Metric), "22°");
        assert_eq!(format_temperature(-3.4, UnitSystem::Metric), "-3°");
    }

    #[test]
    fn temperature_imperial() {
        assert_eq!(format_temperature(0.0, UnitSystem::Imperial), "32°");
        assert_eq!(format_temperature(100.0, UnitSystem::Imperial), "212°");
        assert_eq!(format_temperature(-40.0, UnitSystem::Imperial), "-40°");
    }

    #[test]
    fn temperature_never_renders_negative_zero() {
        assert_eq!(format_temperature(-0.4, UnitSystem::Metric), "0°");
        assert_eq!(format_temperature(-0.0, UnitSystem::Metric), "0°");
        assert_eq!(format_temperature(-0.5, UnitSystem::Metric), "0°");
    }

    #[test]
    fn negative_halves_round_up() {
        assert_eq!(format_temperature(-1.5, UnitSystem::Metric), "-1°");
        assert_eq!(format_temperature(-2.5, UnitSystem::Metric), "-2°");
        assert_eq!(format_temperature(-2.6, UnitSystem::Metric), "-3°");
        assert_eq!(format_temperature(2.5, UnitSystem::Metric), "3°");
        // -25.5 °C is -13.9 °F
        assert_eq!(format_temperature(-25.5, UnitSystem::Imperial), "-14°");
    }

    #[test]
    fn wind_speed() {
        assert_eq!(format_wind_speed(10.0, UnitSystem::Imperial), "6 mph");
        assert_eq!(format_wind_speed(12.5, UnitSystem::Metric), "13 km/h");
        assert_eq!(format_wind_speed(0.0, UnitSystem::Metric), "0 km/h");
    }

    #[test]
    fn precipitation_metric_is_unrounded() {
        assert_eq!(format_precipitation(1.5, UnitSystem::Metric), "1.5 mm");
        assert_eq!(format_precipitation(0.25, UnitSystem::Metric), "0.25 mm");
        assert_eq!(format_precipitation(0.0, UnitSystem::Metric), "0 mm");
    }

    #[test]
    fn precipitation_imperial_has_two_decimals() {
        assert_eq!(format_precipitation(1.0, UnitSystem::Imperial), "0.04 in");
        assert_eq!(format_precipitation(0.0, UnitSystem::Imperial), "0.00 in");
        assert_eq!(format_precipitation(25.4, UnitSystem::Imperial), "1.00 in");
    }

    #[test]
    fn humidity() {
        assert_eq!(format_humidity(75.0), "75%");
        assert_eq!(format_humidity(62.5), "63%");
    }

    #[test]
    fn unit_system_parse_roundtrip() {
        for unit in UnitSystem::all() {
            let parsed: UnitSystem = unit.as_str().parse().expect("roundtrip should succeed");
            assert_eq!(*unit, parsed);
        }
        assert_eq!("Imperial".parse::<UnitSystem>().unwrap(), UnitSystem::Imperial);
    }

    #[test]
    fn unknown_unit_system_error() {
        let err = "kelvin".parse::<UnitSystem>().unwrap_err();
        assert!(err.to_string().contains("Unknown unit system"));
    }

    #[test]
    fn default_is_metric() {
        assert_eq!(UnitSystem::default(), UnitSystem::Metric);
    }
}
