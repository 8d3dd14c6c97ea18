//! Reverse geocoding: decimal coordinates to a human-readable address.
//!
//! A single provider (Nominatim) ships today; the trait keeps the analyzer
//! independent of it so tests can swap in a stub.

mod nominatim;
pub mod retry;

pub use nominatim::NominatimGeocoder;

use async_trait::async_trait;
use std::time::Duration;

use crate::config::GeocoderConfig;
use crate::error::GeocodeError;
use crate::types::GpsCoordinates;

/// A reverse-geocoding backend.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// Provider name for logs.
    fn name(&self) -> &str;

    /// Resolve coordinates to an address string.
    async fn reverse(&self, coords: GpsCoordinates) -> Result<String, GeocodeError>;
}

/// Retry and timeout policy around a geocoder.
#[derive(Debug, Clone)]
pub struct GeocodeOptions {
    /// Per-attempt timeout in milliseconds
    pub timeout_ms: u64,
    /// Retries after the first attempt
    pub retry_attempts: u32,
    /// Base backoff delay in milliseconds
    pub retry_delay_ms: u64,
}

impl Default for GeocodeOptions {
    fn default() -> Self {
        Self::from(&GeocoderConfig::default())
    }
}

impl From<&GeocoderConfig> for GeocodeOptions {
    fn from(config: &GeocoderConfig) -> Self {
        Self {
            timeout_ms: config.timeout_ms,
            retry_attempts: config.retry_attempts,
            retry_delay_ms: config.retry_delay_ms,
        }
    }
}

/// Resolve an address with a bounded timeout per attempt and retries on transient errors.
pub async fn reverse_with_retry(
    geocoder: &dyn ReverseGeocoder,
    coords: GpsCoordinates,
    options: &GeocodeOptions,
) -> Result<String, GeocodeError> {
    let mut last_error = GeocodeError::unavailable("no attempt made");
    for attempt in 0..=options.retry_attempts {
        if attempt > 0 {
            let delay = retry::backoff_duration(attempt - 1, options.retry_delay_ms);
            tracing::debug!(
                "Geocode retry {attempt}/{} via {} after {delay:?}",
                options.retry_attempts,
                geocoder.name()
            );
            tokio::time::sleep(delay).await;
        }

        match tokio::time::timeout(
            Duration::from_millis(options.timeout_ms),
            geocoder.reverse(coords),
        )
        .await
        {
            Ok(Ok(address)) => return Ok(address),
            Ok(Err(e)) => {
                let retryable = retry::is_retryable(&e);
                last_error = e;
                if !retryable {
                    break;
                }
            }
            Err(_) => {
                // Timeouts are retryable
                last_error = GeocodeError::Timeout {
                    timeout_ms: options.timeout_ms,
                };
            }
        }
    }
    Err(last_error)
}
