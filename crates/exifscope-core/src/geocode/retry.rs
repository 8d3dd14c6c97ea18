//! Retry utilities for transient geocoding failures.
//!
//! Provides classification of retryable errors and exponential backoff.

use crate::error::GeocodeError;
use std::time::Duration;

/// Determine whether a geocoding error is worth retrying.
///
/// Retryable errors: timeouts, rate limits (429), server errors (5xx),
/// connection failures. Non-retryable: other 4xx, unusable response bodies.
pub fn is_retryable(error: &GeocodeError) -> bool {
    match error {
        GeocodeError::Timeout { .. } => true,
        GeocodeError::Unavailable {
            status_code,
            message,
        } => {
            if let Some(code) = status_code {
                return *code == 429 || (500..=599).contains(code);
            }
            // Fallback for non-HTTP errors (e.g., connection refused, DNS failure)
            message.contains("timed out") || message.contains("connect")
        }
    }
}

/// Calculate exponential backoff duration for a given attempt.
///
/// Uses `base_delay * 2^attempt` with a cap at 30 seconds.
pub fn backoff_duration(attempt: u32, base_delay_ms: u64) -> Duration {
    let delay = base_delay_ms.saturating_mul(2u64.saturating_pow(attempt));
    Duration::from_millis(delay.min(30_000))
}
