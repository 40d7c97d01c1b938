//! WMO weather code classification.
//!
//! See: https://open-meteo.com/en/docs#weathervariables

use serde::Serialize;

/// Display category for a weather code: icon asset, emoji glyph and a
/// human-readable description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeatherCodeEntry {
    pub icon_file: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Sunny,
    PartlyCloudy,
    Overcast,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Storm,
}

impl Category {
    fn icon_file(self) -> &'static str {
        match self {
            Category::Sunny => "icon-sunny.webp",
            Category::PartlyCloudy => "icon-partly-cloudy.webp",
            Category::Overcast => "icon-overcast.webp",
            Category::Fog => "icon-fog.webp",
            Category::Drizzle => "icon-drizzle.webp",
            Category::Rain => "icon-rain.webp",
            Category::Snow => "icon-snow.webp",
            Category::Storm => "icon-storm.webp",
        }
    }

    fn emoji(self) -> &'static str {
        match self {
            Category::Sunny => "☀️",
            Category::PartlyCloudy => "⛅",
            Category::Overcast => "☁️",
            Category::Fog => "🌫️",
            Category::Drizzle => "🌦️",
            Category::Rain => "🌧️",
            Category::Snow => "🌨️",
            Category::Storm => "⛈️",
        }
    }
}

/// Entry used for any code missing from the table.
pub const DEFAULT_ENTRY: WeatherCodeEntry = WeatherCodeEntry {
    icon_file: "icon-overcast.webp",
    emoji: "☁️",
    description: "Cloudy",
};

fn lookup(code: i32) -> Option<(Category, &'static str)> {
    let entry = match code {
        0 => (Category::Sunny, "Clear sky"),
        1 => (Category::PartlyCloudy, "Mainly clear"),
        2 => (Category::PartlyCloudy, "Partly cloudy"),
        3 => (Category::Overcast, "Overcast"),
        45 => (Category::Fog, "Fog"),
        48 => (Category::Fog, "Depositing rime fog"),
        51 => (Category::Drizzle, "Light drizzle"),
        53 => (Category::Drizzle, "Moderate drizzle"),
        55 => (Category::Drizzle, "Dense drizzle"),
        56 => (Category::Drizzle, "Light freezing drizzle"),
        57 => (Category::Drizzle, "Dense freezing drizzle"),
        61 => (Category::Rain, "Slight rain"),
        63 => (Category::Rain, "Moderate rain"),
        65 => (Category::Rain, "Heavy rain"),
        66 => (Category::Rain, "Light freezing rain"),
        67 => (Category::Rain, "Heavy freezing rain"),
        71 => (Category::Snow, "Slight snowfall"),
        73 => (Category::Snow, "Moderate snowfall"),
        75 => (Category::Snow, "Heavy snowfall"),
        77 => (Category::Snow, "Snow grains"),
        80 => (Category::Rain, "Slight rain showers"),
        81 => (Category::Rain, "Moderate rain showers"),
        82 => (Category::Rain, "Violent rain showers"),
        85 => (Category::Snow, "Slight snow showers"),
        86 => (Category::Snow, "Heavy snow showers"),
        95 => (Category::Storm, "Thunderstorm"),
        96 => (Category::Storm, "Thunderstorm with slight hail"),
        99 => (Category::Storm, "Thunderstorm with heavy hail"),
        _ => return None,
    };
    Some(entry)
}

/// Classify a WMO weather code. Unknown codes get [`DEFAULT_ENTRY`].
pub fn classify(code: i32) -> WeatherCodeEntry {
    match lookup(code) {
        Some((category, description)) => WeatherCodeEntry {
            icon_file: category.icon_file(),
            emoji: category.emoji(),
            description,
        },
        None => DEFAULT_ENTRY,
    }
}
