//! Error types for the exifscope analysis pipeline.
//!
//! Errors are organized by stage. Only [`PipelineError`] is fatal for an
//! image; metadata and geocoding errors are degraded into placeholder values
//! by the analyzer and recorded as notes on the output record.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for exifscope operations.
#[derive(Error, Debug)]
pub enum ExifscopeError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Fatal errors that stop the pipeline for one image.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Image decoding failed
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Operation timed out
    #[error("Timeout in {stage} stage for {path} after {timeout_ms}ms")]
    Timeout {
        path: PathBuf,
        stage: String,
        timeout_ms: u64,
    },

    /// File exceeds size limit
    #[error("File too large: {path} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        path: PathBuf,
        size_mb: u64,
        max_mb: u64,
    },

    /// Image dimensions exceed limit
    #[error("Image too large: {path} ({width}x{height} > {max_dim})")]
    ImageTooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
        max_dim: u32,
    },

    /// Unsupported image format
    #[error("Unsupported format for {path}: {format}")]
    UnsupportedFormat { path: PathBuf, format: String },

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
}

/// EXIF reading errors. Never fatal: the analyzer reports them and keeps going.
#[derive(Error, Debug)]
pub enum MetadataError {
    /// The container carries no EXIF block (or an empty one)
    #[error("No EXIF metadata found")]
    NoMetadata,

    /// An EXIF block exists but could not be parsed
    #[error("Malformed EXIF metadata: {0}")]
    Malformed(String),
}

/// Why GPS coordinates could not be derived. Degrades to "unavailable".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GpsError {
    /// A required GPS tag is absent
    #[error("GPS tag {0} is missing")]
    MissingTag(&'static str),

    /// A GPS tag is present but not a usable degrees/minutes/seconds triple or reference
    #[error("GPS tag {0} is malformed")]
    Malformed(&'static str),
}

/// Reverse-geocoding errors. The caller substitutes a placeholder address.
#[derive(Error, Debug)]
pub enum GeocodeError {
    /// Network failure, non-success status or an unusable response body
    #[error("Geocoding unavailable: {message}")]
    Unavailable {
        message: String,
        status_code: Option<u16>,
    },

    /// The request did not complete in time
    #[error("Geocoding timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

impl GeocodeError {
    pub(crate) fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
            status_code: None,
        }
    }
}

/// Convenience type alias for exifscope results.
pub type Result<T> = std::result::Result<T, ExifscopeError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
