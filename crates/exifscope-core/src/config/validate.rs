//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.max_file_size_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_file_size_mb must be > 0".into(),
            ));
        }
        if self.limits.max_image_dimension == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_image_dimension must be > 0".into(),
            ));
        }
        if self.limits.decode_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "limits.decode_timeout_ms must be > 0".into(),
            ));
        }
        if self.geocoder.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "geocoder.timeout_ms must be > 0".into(),
            ));
        }
        if self.geocoder.enabled {
            if self.geocoder.endpoint.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "geocoder.endpoint must not be empty".into(),
                ));
            }
            if self.geocoder.user_agent.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "geocoder.user_agent must not be empty".into(),
                ));
            }
        }
        Ok(())
    }
}
