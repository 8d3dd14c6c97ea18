//! Nominatim reverse-geocoding provider.
//!
//! Talks to an OpenStreetMap Nominatim instance (public or self-hosted) via
//! `GET /reverse?format=json&lat=..&lon=..`. The public instance requires an
//! identifying User-Agent.

use super::ReverseGeocoder;
use crate::config::GeocoderConfig;
use crate::error::GeocodeError;
use crate::types::GpsCoordinates;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Nominatim provider.
pub struct NominatimGeocoder {
    endpoint: String,
    client: reqwest::Client,
}

/// Nominatim /reverse response. Unresolvable points come back as `{"error": ...}`.
#[derive(Deserialize)]
struct NominatimResponse {
    display_name: Option<String>,
    error: Option<String>,
}

impl NominatimGeocoder {
    pub fn new(config: &GeocoderConfig) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| GeocodeError::unavailable(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Request URL for a coordinate pair.
    pub fn reverse_url(&self, coords: GpsCoordinates) -> String {
        format!(
            "{}/reverse?format=json&lat={}&lon={}",
            self.endpoint, coords.latitude, coords.longitude
        )
    }
}

/// Pull the display address out of a response body.
fn parse_address(body: &str) -> Result<String, GeocodeError> {
    let resp: NominatimResponse = serde_json::from_str(body).map_err(|e| {
        GeocodeError::unavailable(format!("Failed to parse Nominatim response: {e}"))
    })?;

    match (resp.display_name, resp.error) {
        (Some(name), _) if !name.trim().is_empty() => Ok(name.trim().to_string()),
        (_, Some(error)) => Err(GeocodeError::unavailable(format!("Nominatim: {error}"))),
        _ => Err(GeocodeError::unavailable(
            "Nominatim response has no display_name",
        )),
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimGeocoder {
    fn name(&self) -> &str {
        "nominatim"
    }

    async fn reverse(&self, coords: GpsCoordinates) -> Result<String, GeocodeError> {
        let url = self.reverse_url(coords);
        tracing::debug!("Reverse geocoding via {url}");

        let resp = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                GeocodeError::Unavailable {
                    message: format!("Nominatim request timed out: {e}"),
                    status_code: None,
                }
            } else if e.is_connect() {
                GeocodeError::unavailable(format!(
                    "Failed to connect to {}: {e}",
                    self.endpoint
                ))
            } else {
                GeocodeError::unavailable(format!("Nominatim request failed: {e}"))
            }
        })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(GeocodeError::Unavailable {
                message: format!("Nominatim HTTP {status}: {text}"),
                status_code: Some(status.as_u16()),
            });
        }

        let body = resp.text().await.map_err(|e| {
            GeocodeError::unavailable(format!("Failed to read Nominatim response: {e}"))
        })?;
        parse_address(&body)
    }
}
