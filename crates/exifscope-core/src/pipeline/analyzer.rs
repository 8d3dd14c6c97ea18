//! Pipeline orchestration - wires together all analysis stages.
//!
//! Only validation and decoding are fatal. Every interpreter after that is
//! isolated: it either produces its field or a placeholder plus a note.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::error::{MetadataError, Result};
use crate::geocode::{self, GeocodeOptions, NominatimGeocoder, ReverseGeocoder};
use crate::metadata::{camera, gps, timestamps, ExifReader, RawExif};
use crate::stego::StegoChecker;
use crate::types::{
    GpsCoordinates, MetadataRecord, StegoResult, ADDRESS_UNAVAILABLE, GEOCODING_DISABLED,
    GPS_UNAVAILABLE,
};

use super::decode::{format_to_string, ImageDecoder};
use super::hash::Hasher;
use super::validate::Validator;

/// Options for one analysis call.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// Skip the reverse-geocoding request even if a geocoder is configured
    pub skip_geocode: bool,
}

/// Runs the full analysis for one uploaded image.
pub struct Analyzer {
    decoder: ImageDecoder,
    validator: Validator,
    hasher: Hasher,
    geocoder: Option<Box<dyn ReverseGeocoder>>,
    geocode_options: GeocodeOptions,
}

impl Analyzer {
    /// Create an analyzer from configuration.
    ///
    /// Uses Nominatim when geocoding is enabled. If the HTTP client cannot be
    /// built, geocoding is turned off with a warning rather than failing.
    pub fn new(config: &Config) -> Self {
        let geocoder: Option<Box<dyn ReverseGeocoder>> = if config.geocoder.enabled {
            match NominatimGeocoder::new(&config.geocoder) {
                Ok(g) => Some(Box::new(g)),
                Err(e) => {
                    tracing::warn!("Reverse geocoding disabled: {e}");
                    None
                }
            }
        } else {
            None
        };

        Self {
            decoder: ImageDecoder::new(config.limits.clone()),
            validator: Validator::new(config.limits.clone()),
            hasher: Hasher::new(config.hash.algorithm),
            geocoder,
            geocode_options: GeocodeOptions::from(&config.geocoder),
        }
    }

    /// Replace the geocoder (or remove it with `None`).
    pub fn with_geocoder(mut self, geocoder: Option<Box<dyn ReverseGeocoder>>) -> Self {
        self.geocoder = geocoder;
        self
    }

    /// Check whether a geocoder is configured.
    pub fn geocoding_enabled(&self) -> bool {
        self.geocoder.is_some()
    }

    /// Read a file from disk and analyze it.
    pub async fn analyze_path(
        &self,
        path: &Path,
        options: &AnalyzeOptions,
    ) -> Result<MetadataRecord> {
        self.validator.validate_path(path)?;
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown");
        self.analyze_bytes(bytes, file_name, options).await
    }

    /// Analyze an uploaded byte stream.
    pub async fn analyze_bytes(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
        options: &AnalyzeOptions,
    ) -> Result<MetadataRecord> {
        let start = Instant::now();
        let path = Path::new(file_name);
        tracing::debug!("Analyzing: {file_name}");

        // Validate + decode (fatal)
        self.validator.validate_bytes(&bytes, path)?;
        let bytes: Arc<[u8]> = bytes.into();
        let decode_start = Instant::now();
        let decoded = self.decoder.decode_from_bytes(bytes.clone(), path).await?;
        tracing::trace!("  Decode: {:?}", decode_start.elapsed());

        let mut notes = Vec::new();

        // EXIF
        let raw = match ExifReader::read(&bytes) {
            Ok(raw) => raw,
            Err(e) => {
                match &e {
                    MetadataError::NoMetadata => tracing::info!("{file_name}: no EXIF data found"),
                    MetadataError::Malformed(_) => tracing::warn!("{file_name}: {e}"),
                }
                notes.push(e.to_string());
                RawExif::default()
            }
        };

        let camera = camera::interpret(&raw);
        let timestamps = timestamps::analyze(&raw);
        if timestamps.possible_inconsistency {
            tracing::warn!("{file_name}: timestamps disagree, the image may have been modified");
        }

        let coords = match gps::coordinates(&raw) {
            Ok(coords) => Some(coords),
            Err(e) => {
                tracing::debug!("{file_name}: {e}");
                if !raw.is_empty() {
                    notes.push(format!("GPS unavailable: {e}"));
                }
                None
            }
        };
        let address = self.resolve_address(coords, options, &mut notes).await;
        let map_url = coords.as_ref().map(gps::map_url);

        // Integrity
        let hash_start = Instant::now();
        let file_hash = self.hasher.digest(&bytes);
        tracing::trace!("  Hash: {:?}", hash_start.elapsed());

        // Steganography (CPU-bound, never fails the record)
        let (width, height) = (decoded.width, decoded.height);
        let format = format_to_string(decoded.format);
        let file_size = decoded.file_size;
        let image = decoded.image;
        let steganography = tokio::task::spawn_blocking(move || StegoChecker::check(&image))
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Steganography check aborted: {e}");
                StegoResult::NoHiddenMessage
            });

        tracing::debug!(
            "Analyzed {:?} in {:?} ({}x{})",
            file_name,
            start.elapsed(),
            width,
            height
        );

        Ok(MetadataRecord {
            file_name: file_name.to_string(),
            format,
            width,
            height,
            file_size,
            camera,
            gps: coords,
            address,
            map_url,
            timestamps,
            file_hash,
            steganography,
            exif: raw.to_tags(),
            notes,
        })
    }

    async fn resolve_address(
        &self,
        gps: Option<GpsCoordinates>,
        options: &AnalyzeOptions,
        notes: &mut Vec<String>,
    ) -> String {
        let Some(coords) = gps else {
            return GPS_UNAVAILABLE.to_string();
        };
        let geocoder = match &self.geocoder {
            Some(g) if !options.skip_geocode => g,
            _ => return GEOCODING_DISABLED.to_string(),
        };

        match geocode::reverse_with_retry(geocoder.as_ref(), coords, &self.geocode_options).await {
            Ok(address) => address,
            Err(e) => {
                tracing::warn!("Reverse geocoding via {} failed: {e}", geocoder.name());
                notes.push(format!("Address unavailable: {e}"));
                ADDRESS_UNAVAILABLE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExifscopeError;
    use crate::error::PipelineError;
    use image::{DynamicImage, ImageFormat};
    use std::io::Cursor;

    fn png_bytes() -> Vec<u8> {
        let mut buf = Vec::new();
        DynamicImage::new_rgb8(8, 6)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    fn offline_analyzer() -> Analyzer {
        Analyzer::new(&Config::default()).with_geocoder(None)
    }

    #[test]
    fn test_analyze_options_default() {
        let options = AnalyzeOptions::default();
        assert!(!options.skip_geocode);
    }

    #[test]
    fn test_disabled_geocoder_config() {
        let mut config = Config::default();
        config.geocoder.enabled = false;
        assert!(!Analyzer::new(&config).geocoding_enabled());
    }

    #[tokio::test]
    async fn test_image_without_exif_still_yields_record() {
        let bytes = png_bytes();
        let record = offline_analyzer()
            .analyze_bytes(bytes.clone(), "plain.png", &AnalyzeOptions::default())
            .await
            .unwrap();

        assert_eq!(record.format, "png");
        assert_eq!((record.width, record.height), (8, 6));
        assert_eq!(record.camera.model, crate::types::UNKNOWN);
        assert!(record.gps.is_none());
        assert_eq!(record.address, GPS_UNAVAILABLE);
        assert!(!record.timestamps.possible_inconsistency);
        assert_eq!(record.file_hash.hex, Hasher::sha256_hex(&bytes));
        assert_eq!(record.steganography, StegoResult::NoHiddenMessage);
        assert!(record.exif.is_empty());
        assert_eq!(record.notes, vec!["No EXIF metadata found".to_string()]);
    }

    #[tokio::test]
    async fn test_undecodable_upload_is_fatal() {
        let err = offline_analyzer()
            .analyze_bytes(b"GIF89a but not really".to_vec(), "fake.gif", &AnalyzeOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ExifscopeError::Pipeline(PipelineError::Decode { .. })
        ));
    }

    #[tokio::test]
    async fn test_analyze_path_missing_file() {
        let err = offline_analyzer()
            .analyze_path(Path::new("/nonexistent/photo.jpg"), &AnalyzeOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ExifscopeError::Pipeline(PipelineError::FileNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_analyze_path_uses_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("holiday.png");
        std::fs::write(&path, png_bytes()).unwrap();

        let record = offline_analyzer()
            .analyze_path(&path, &AnalyzeOptions::default())
            .await
            .unwrap();
        assert_eq!(record.file_name, "holiday.png");
    }
}
