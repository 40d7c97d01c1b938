//! Shared plumbing for the JSON-over-HTTP adapters.

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::error::WeatherError;

pub const USER_AGENT: &str = concat!("skycast/", env!("CARGO_PKG_VERSION"));

pub fn build_client(timeout: Duration) -> Result<Client, WeatherError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| WeatherError::Network(format!("Failed to build HTTP client: {e}")))
}

/// GET `url` with `query`, check the status and decode the JSON body.
/// `what` names the request in error messages.
pub async fn get_json<T: DeserializeOwned>(
    http: &Client,
    url: &str,
    query: &[(&str, String)],
    what: &str,
) -> Result<T, WeatherError> {
    let res = http
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| WeatherError::Network(format!("Failed to send {what} request: {e}")))?;

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|e| WeatherError::Network(format!("Failed to read {what} response body: {e}")))?;

    if !status.is_success() {
        return Err(WeatherError::Network(format!(
            "{what} request failed with status {status}: {}",
            truncate_body(&body),
        )));
    }

    debug!(what, bytes = body.len(), "response received");

    serde_json::from_str(&body)
        .map_err(|e| WeatherError::Network(format!("Failed to parse {what} JSON: {e}")))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
