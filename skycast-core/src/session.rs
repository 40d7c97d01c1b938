//! Dashboard session: the current location, the last fetched forecast, the
//! unit system and the selected day, replaced wholesale on every successful
//! fetch.

use serde::Serialize;
use tracing::{info, warn};

use crate::{
    error::WeatherError,
    geocode::{Geocoder, LocationResolver},
    history::{HistoryStore, SearchHistory},
    model::{Forecast, Location},
    present::{DashboardView, dashboard_view, hourly_window},
    provider::ForecastProvider,
    units::UnitSystem,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Uninitialized,
    Resolving,
    Fetching,
    Displaying,
}

#[derive(Debug, Clone)]
struct Snapshot {
    location: Location,
    forecast: Forecast,
    selected_day: usize,
}

#[derive(Debug)]
pub struct Dashboard<G, P> {
    resolver: LocationResolver<G>,
    provider: P,
    units: UnitSystem,
    history: SearchHistory,
    history_store: Option<HistoryStore>,
    phase: Phase,
    snapshot: Option<Snapshot>,
}

impl<G: Geocoder, P: ForecastProvider> Dashboard<G, P> {
    pub fn new(resolver: LocationResolver<G>, provider: P, units: UnitSystem) -> Self {
        Self {
            resolver,
            provider,
            units,
            history: SearchHistory::default(),
            history_store: None,
            phase: Phase::Uninitialized,
            snapshot: None,
        }
    }

    /// Load the persisted history and save it back after each search.
    pub fn with_history_store(mut self, store: HistoryStore) -> Result<Self, WeatherError> {
        self.history = store.load()?;
        self.history_store = Some(store);
        Ok(self)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn units(&self) -> UnitSystem {
        self.units
    }

    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    pub fn location(&self) -> Option<&Location> {
        self.snapshot.as_ref().map(|s| &s.location)
    }

    pub fn forecast(&self) -> Option<&Forecast> {
        self.snapshot.as_ref().map(|s| &s.forecast)
    }

    pub fn selected_day(&self) -> Option<usize> {
        self.snapshot.as_ref().map(|s| s.selected_day)
    }

    /// Resolve the device coordinates, or use the fallback location when
    /// there are none or they are invalid, then fetch.
    pub async fn start(&mut self, coords: Option<(f64, f64)>) -> Result<DashboardView, WeatherError> {
        self.phase = Phase::Resolving;
        let location = match coords {
            Some((lat, lon)) => match self.resolver.resolve_by_coordinates(lat, lon).await {
                Ok(location) => location,
                Err(e) => {
                    warn!(error = %e, "ignoring startup coordinates");
                    self.resolver.fallback().clone()
                }
            },
            None => self.resolver.fallback().clone(),
        };

        self.load(location).await
    }

    /// Show the weather for a searched place. On failure the previously
    /// displayed data is kept as it was.
    pub async fn search(&mut self, query: &str) -> Result<DashboardView, WeatherError> {
        self.phase = Phase::Resolving;
        let location = match self.resolver.resolve_by_query(query).await {
            Ok(location) => location,
            Err(e) => {
                self.restore_phase();
                return Err(e);
            }
        };

        let view = self.load(location).await?;

        self.history.record(query);
        if let Some(store) = &self.history_store {
            if let Err(e) = store.save(&self.history) {
                warn!(error = %e, "failed to save search history");
            }
        }

        Ok(view)
    }

    /// Change the display units. Cached data is reformatted, nothing is
    /// fetched.
    pub fn set_units(&mut self, units: UnitSystem) -> Option<DashboardView> {
        self.units = units;
        self.view()
    }

    /// Select the day shown in the hourly view. Returns `false` and leaves
    /// the selection alone when no hourly data exists for `day`.
    pub fn select_day(&mut self, day: usize) -> bool {
        let Some(snapshot) = self.snapshot.as_mut() else {
            return false;
        };
        if hourly_window(&snapshot.forecast.hourly, day, self.units).is_none() {
            return false;
        }
        snapshot.selected_day = day;
        true
    }

    pub fn view(&self) -> Option<DashboardView> {
        self.snapshot
            .as_ref()
            .map(|s| dashboard_view(&s.location, &s.forecast, self.units, s.selected_day))
    }

    async fn load(&mut self, location: Location) -> Result<DashboardView, WeatherError> {
        self.phase = Phase::Fetching;
        let forecast = match self
            .provider
            .fetch_forecast(location.latitude, location.longitude)
            .await
        {
            Ok(forecast) => forecast,
            Err(e) => {
                warn!(error = %e, location = %location.label(), "forecast fetch failed");
                self.restore_phase();
                return Err(e);
            }
        };

        info!(location = %location.label(), "forecast loaded");
        let snapshot = Snapshot {
            location,
            forecast,
            selected_day: 0,
        };
        let view = dashboard_view(&snapshot.location, &snapshot.forecast, self.units, 0);
        self.snapshot = Some(snapshot);
        self.phase = Phase::Displaying;
        Ok(view)
    }

    fn restore_phase(&mut self) {
        self.phase = if self.snapshot.is_some() {
            Phase::Displaying
        } else {
            Phase::Uninitialized
        };
    }
}
