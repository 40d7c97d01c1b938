use thiserror::Error;

/// Errors surfaced by location resolution, forecast fetching and history
/// persistence.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Input rejected before any request was made.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// A search produced no candidate places.
    #[error("No location found for '{0}'")]
    NotFound(String),

    /// Transport, HTTP status or response parsing failure.
    #[error("Network error: {0}")]
    Network(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WeatherError {
    pub fn is_validation(&self) -> bool {
        matches!(self, WeatherError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, WeatherError::NotFound(_))
    }

    pub fn is_network(&self) -> bool {
        matches!(self, WeatherError::Network(_))
    }
}

/// Reject non-finite or out-of-range coordinates.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), WeatherError> {
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err(WeatherError::Validation(format!(
            "coordinates must be finite numbers, got ({latitude}, {longitude})"
        )));
    }

    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(WeatherError::Validation(format!(
            "coordinates out of range: latitude must be -90..90 and longitude -180..180, got ({latitude}, {longitude})"
        )));
    }

    Ok(())
}
