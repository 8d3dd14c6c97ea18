//! Sub-configuration structs with their defaults.

use crate::pipeline::hash::HashAlgorithm;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Resource limits to protect against problematic inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum file size in megabytes
    pub max_file_size_mb: u64,

    /// Maximum image dimension (width or height)
    pub max_image_dimension: u32,

    /// Decode timeout in milliseconds
    pub decode_timeout_ms: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 100,
            max_image_dimension: 10000,
            decode_timeout_ms: 5000,
        }
    }
}

/// Reverse-geocoding settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    /// Look up an address for GPS-tagged images
    pub enabled: bool,

    /// Base URL of a Nominatim-compatible service
    pub endpoint: String,

    /// User-Agent header sent with every request (Nominatim rejects anonymous clients)
    pub user_agent: String,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,

    /// Retries after the first attempt
    pub retry_attempts: u32,

    /// Base backoff delay in milliseconds
    pub retry_delay_ms: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: format!("exifscope/{}", env!("CARGO_PKG_VERSION")),
            timeout_ms: 10_000,
            retry_attempts: 1,
            retry_delay_ms: 500,
        }
    }
}

/// File hashing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HashConfig {
    /// Digest algorithm: "sha256" or "blake3"
    pub algorithm: HashAlgorithm,
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output
    pub pretty: bool,

    /// Default path for the JSON export
    pub export_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            export_path: PathBuf::from("metadata.json"),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
