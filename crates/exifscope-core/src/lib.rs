//! exifscope core - image metadata inspection library.
//!
//! Takes an uploaded image and produces one [`MetadataRecord`]: camera and
//! lens info, GPS coordinates with a reverse-geocoded address, timestamp
//! fields with an inconsistency check, a file digest, and the result of a
//! hidden-text check. The record renders as key/value pairs and exports
//! verbatim to JSON.
//!
//! # Architecture
//!
//! A single linear pipeline with no persistent state:
//!
//! ```text
//! Bytes → Decode → Read EXIF → Interpret fields → Geocode → Hash → Stego check → Record → JSON
//! ```
//!
//! Only decoding is fatal. Missing EXIF, missing GPS or an unreachable
//! geocoder degrade their own fields to placeholders.
//!
//! # Usage
//!
//! ```rust,ignore
//! use exifscope_core::{AnalyzeOptions, Analyzer, Config};
//!
//! #[tokio::main]
//! async fn main() -> exifscope_core::Result<()> {
//!     let config = Config::load()?;
//!     let analyzer = Analyzer::new(&config);
//!
//!     let record = analyzer
//!         .analyze_path("./photo.jpg".as_ref(), &AnalyzeOptions::default())
//!         .await?;
//!     println!("Camera: {}", record.camera.model);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod geocode;
pub mod metadata;
pub mod output;
pub mod pipeline;
pub mod stego;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{
    ConfigError, ExifscopeError, GeocodeError, GpsError, MetadataError, PipelineError,
    PipelineResult, Result,
};
pub use geocode::{NominatimGeocoder, ReverseGeocoder};
pub use output::OutputWriter;
pub use pipeline::{AnalyzeOptions, Analyzer, HashAlgorithm};
pub use types::{
    CameraInfo, FileDigest, GpsCoordinates, MetadataRecord, StegoResult, TimestampField,
    TimestampReport,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
