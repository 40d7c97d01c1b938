use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{model::Location, units::UnitSystem};

pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const DEFAULT_REVERSE_GEOCODING_URL: &str = "https://nominatim.openstreetmap.org/reverse";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Base URLs of the external services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub forecast_url: String,
    pub geocoding_url: String,
    pub reverse_geocoding_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            reverse_geocoding_url: DEFAULT_REVERSE_GEOCODING_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Point every endpoint at one base URL, keeping the default paths.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            forecast_url: format!("{base}/v1/forecast"),
            geocoding_url: format!("{base}/v1/search"),
            reverse_geocoding_url: format!("{base}/reverse"),
        }
    }
}

/// Device coordinates used at startup when none are given explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

pub fn default_fallback_location() -> Location {
    Location::new("London", "United Kingdom", 51.5074, -0.1278)
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// units = "imperial"
///
/// [home]
/// latitude = 40.71
/// longitude = -74.01
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub units: UnitSystem,

    pub timeout_secs: u64,

    pub home: Option<Coordinates>,

    /// Shown whenever reverse geocoding fails or no coordinates are known.
    pub fallback: Location,

    pub endpoints: Endpoints,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            units: UnitSystem::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            home: None,
            fallback: default_fallback_location(),
            endpoints: Endpoints::default(),
        }
    }
}

impl Config {
    pub fn set_home(&mut self, latitude: f64, longitude: f64) {
        self.home = Some(Coordinates { latitude, longitude });
    }

    pub fn home_coordinates(&self) -> Option<(f64, f64)> {
        self.home.map(|c| (c.latitude, c.longitude))
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    pub fn history_file_path() -> Result<PathBuf> {
        Ok(project_dirs()?.data_dir().join("history.json"))
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "skycast", "skycast")
        .ok_or_else(|| anyhow!("Could not determine platform config directory"))
}
