//! Resolving search text or coordinates to a named [`Location`].
//!
//! Forward lookups go to the Open-Meteo geocoding API, reverse lookups to
//! Nominatim (OpenStreetMap). Both are free and need no API key.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::{fmt::Debug, time::Duration};
use tracing::{debug, info, instrument, warn};

use crate::{
    config::{Config, Endpoints},
    error::{WeatherError, validate_coordinates},
    http::{build_client, get_json},
    model::Location,
};

/// Name used when reverse geocoding yields nothing usable.
pub const UNNAMED_LOCATION: &str = "Location";

const SEARCH_RESULT_COUNT: u8 = 5;

/// A forward-geocoding candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub name: String,
    pub country: Option<String>,
    pub admin1: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Place> for Location {
    fn from(place: Place) -> Self {
        Location {
            name: place.name,
            country: place.country.unwrap_or_default(),
            latitude: place.latitude,
            longitude: place.longitude,
        }
    }
}

/// A reverse-geocoding hit. Every naming field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReversePlace {
    pub name: Option<String>,
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub municipality: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

impl ReversePlace {
    /// First non-blank of name > city > town > village > municipality > state.
    pub fn display_name(&self) -> String {
        [
            &self.name,
            &self.city,
            &self.town,
            &self.village,
            &self.municipality,
            &self.state,
        ]
        .into_iter()
        .flatten()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .unwrap_or(UNNAMED_LOCATION)
        .to_string()
    }
}

#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// Forward lookup by free text, best match first.
    async fn search(&self, query: &str) -> Result<Vec<Place>, WeatherError>;

    /// Reverse lookup; an empty vec means the service knows nothing there.
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Vec<ReversePlace>, WeatherError>;
}

/// HTTP geocoder backed by Open-Meteo (forward) and Nominatim (reverse).
#[derive(Debug, Clone)]
pub struct OpenMeteoGeocoder {
    search_url: String,
    reverse_url: String,
    http: Client,
}

impl OpenMeteoGeocoder {
    pub fn new(endpoints: &Endpoints, timeout: Duration) -> Result<Self, WeatherError> {
        Ok(Self {
            search_url: endpoints.geocoding_url.clone(),
            reverse_url: endpoints.reverse_geocoding_url.clone(),
            http: build_client(timeout)?,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        Self::new(&config.endpoints, Duration::from_secs(config.timeout_secs))
    }
}

#[derive(Debug, Deserialize)]
struct OmSearchResponse {
    #[serde(default)]
    results: Vec<OmSearchResult>,
}

#[derive(Debug, Deserialize)]
struct OmSearchResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
    admin1: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    error: Option<String>,
    name: Option<String>,
    address: Option<NominatimAddress>,
}

#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    municipality: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

#[async_trait]
impl Geocoder for OpenMeteoGeocoder {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<Place>, WeatherError> {
        let parsed: OmSearchResponse = get_json(
            &self.http,
            &self.search_url,
            &[
                ("name", query.to_string()),
                ("count", SEARCH_RESULT_COUNT.to_string()),
                ("language", "en".to_string()),
                ("format", "json".to_string()),
            ],
            "geocoding search",
        )
        .await?;

        debug!(candidates = parsed.results.len(), "geocoding search finished");

        Ok(parsed
            .results
            .into_iter()
            .map(|r| Place {
                name: r.name,
                country: r.country,
                admin1: r.admin1,
                latitude: r.latitude,
                longitude: r.longitude,
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Vec<ReversePlace>, WeatherError> {
        let parsed: NominatimResponse = get_json(
            &self.http,
            &self.reverse_url,
            &[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("format", "jsonv2".to_string()),
                ("addressdetails", "1".to_string()),
            ],
            "reverse geocoding",
        )
        .await?;

        if let Some(reason) = parsed.error {
            debug!(%reason, "reverse geocoding returned no place");
            return Ok(Vec::new());
        }

        let addr = parsed.address.unwrap_or_default();
        Ok(vec![ReversePlace {
            name: parsed.name,
            city: addr.city,
            town: addr.town,
            village: addr.village,
            municipality: addr.municipality,
            state: addr.state,
            country: addr.country,
        }])
    }
}

/// Turns user input into a [`Location`], applying validation and the
/// fallback policy on top of a [`Geocoder`].
#[derive(Debug, Clone)]
pub struct LocationResolver<G> {
    geocoder: G,
    fallback: Location,
}

impl<G: Geocoder> LocationResolver<G> {
    pub fn new(geocoder: G, fallback: Location) -> Self {
        Self { geocoder, fallback }
    }

    pub fn fallback(&self) -> &Location {
        &self.fallback
    }

    /// Only fails on invalid coordinates. Lookup failures resolve to the
    /// fallback location so startup is never blocked.
    pub async fn resolve_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Location, WeatherError> {
        validate_coordinates(latitude, longitude)?;

        match self.geocoder.reverse(latitude, longitude).await {
            Ok(places) => match places.into_iter().next() {
                Some(place) => {
                    let location = Location {
                        name: place.display_name(),
                        country: place.country.unwrap_or_default(),
                        latitude,
                        longitude,
                    };
                    info!(location = %location.label(), "reverse geocoded");
                    Ok(location)
                }
                None => {
                    debug!("no reverse geocoding result, using coordinates");
                    Ok(Location::new(UNNAMED_LOCATION, "", latitude, longitude))
                }
            },
            Err(e) => {
                warn!(error = %e, fallback = %self.fallback.label(), "reverse geocoding failed");
                Ok(self.fallback.clone())
            }
        }
    }

    pub async fn resolve_by_query(&self, text: &str) -> Result<Location, WeatherError> {
        let query = text.trim();
        if query.is_empty() {
            return Err(WeatherError::NotFound(String::new()));
        }

        let places = self.geocoder.search(query).await?;
        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::NotFound(query.to_string()))?;

        debug!(
            region = place.admin1.as_deref().unwrap_or(""),
            "found location: {} ({:.4}, {:.4})",
            place.name, place.latitude, place.longitude
        );

        Ok(place.into())
    }
}
