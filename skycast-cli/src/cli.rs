use anyhow::{Context, bail};
use clap::{ArgAction, Parser, Subcommand};
use inquire::{Confirm, CustomType, Select, Text};
use tracing::warn;

use skycast_core::{
    Config, Dashboard, HistoryStore, LocationResolver, OpenMeteoGeocoder, OpenMeteoProvider,
    UnitSystem, WeatherError, error::validate_coordinates,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather dashboard for the terminal")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively set units, home coordinates and the default city.
    Configure,

    /// Show the dashboard for a place, coordinates, or the configured home.
    Show {
        /// Place to search for, e.g. "Berlin".
        query: Option<String>,

        #[arg(long, allow_negative_numbers = true, requires = "lon", conflicts_with = "query")]
        lat: Option<f64>,

        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lon: Option<f64>,

        /// Override the configured unit system (metric or imperial).
        #[arg(long)]
        units: Option<UnitSystem>,

        /// Day shown in the hourly view, 0 = today.
        #[arg(long, default_value_t = 0)]
        day: usize,

        /// Print the view model as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// List recent searches.
    History {
        /// Choose a recent search and show its dashboard.
        #[arg(long)]
        pick: bool,

        /// Unit system for the picked dashboard.
        #[arg(long, requires = "pick")]
        units: Option<UnitSystem>,

        /// Print the picked dashboard as JSON.
        #[arg(long, requires = "pick")]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure().await,
            Command::Show { query, lat, lon, units, day, json } => {
                let coords = lat.zip(lon);
                show(query, coords, units, day, json).await
            }
            Command::History { pick, units, json } => history(pick, units, json).await,
        }
    }
}

fn resolver(config: &Config) -> anyhow::Result<LocationResolver<OpenMeteoGeocoder>> {
    let geocoder =
        OpenMeteoGeocoder::from_config(config).context("Failed to set up geocoding client")?;
    Ok(LocationResolver::new(geocoder, config.fallback.clone()))
}

async fn show(
    query: Option<String>,
    coords: Option<(f64, f64)>,
    units: Option<UnitSystem>,
    day: usize,
    json: bool,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let provider =
        OpenMeteoProvider::from_config(&config).context("Failed to set up forecast client")?;

    let store = HistoryStore::new(Config::history_file_path()?);
    let history_path = store.path().display().to_string();
    let mut dashboard = Dashboard::new(resolver(&config)?, provider, units.unwrap_or(config.units))
        .with_history_store(store)
        .with_context(|| format!("Failed to load search history from {history_path}"))?;

    match query {
        Some(query) => match dashboard.search(&query).await {
            Ok(_) => {}
            Err(WeatherError::NotFound(_)) => bail!("Location not found: '{}'", query.trim()),
            Err(e) => return Err(e).context("Failed to load weather"),
        },
        None => {
            dashboard
                .start(coords.or(config.home_coordinates()))
                .await
                .context("Failed to load weather")?;
        }
    }

    if day != 0 && !dashboard.select_day(day) {
        warn!(day, "no hourly data for the requested day, showing today");
    }

    let view = dashboard.view().context("No weather data to display")?;

    if json {
        println!("{}", render::to_json(&view)?);
    } else {
        print!("{}", render::to_text(&view));
    }

    Ok(())
}

async fn history(pick: bool, units: Option<UnitSystem>, json: bool) -> anyhow::Result<()> {
    let store = HistoryStore::new(Config::history_file_path()?);
    let history = store
        .load()
        .with_context(|| format!("Failed to read {}", store.path().display()))?;

    if !pick || history.is_empty() {
        print!("{}", render::history_to_text(history.entries()));
        return Ok(());
    }

    let query = Select::new("Recent searches:", history.entries().to_vec()).prompt()?;
    show(Some(query), None, units, 0, json).await
}

async fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let start = UnitSystem::all()
        .iter()
        .position(|u| *u == config.units)
        .unwrap_or(0);
    config.units = Select::new("Display units:", UnitSystem::all().to_vec())
        .with_starting_cursor(start)
        .prompt()?;

    if Confirm::new("Set home coordinates?")
        .with_default(config.home.is_some())
        .prompt()?
    {
        let latitude = CustomType::<f64>::new("Latitude:")
            .with_error_message("Please type a number, e.g. 52.52")
            .prompt()?;
        let longitude = CustomType::<f64>::new("Longitude:")
            .with_error_message("Please type a number, e.g. 13.41")
            .prompt()?;
        validate_coordinates(latitude, longitude)?;
        config.set_home(latitude, longitude);
    } else {
        config.home = None;
    }

    let city = Text::new("Default city (leave empty to keep current):")
        .with_placeholder(&config.fallback.label())
        .prompt()?;
    if !city.trim().is_empty() {
        let location = resolver(&config)?
            .resolve_by_query(&city)
            .await
            .with_context(|| format!("Could not find '{}'", city.trim()))?;
        println!("Default city set to {}", location.label());
        config.fallback = location;
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
