//! Core data types for the exifscope analysis pipeline.
//!
//! [`MetadataRecord`] is the single output of analyzing an image. It is what
//! the CLI renders and what the exporter writes, field for field.

use serde::{Deserialize, Serialize};

use crate::pipeline::hash::HashAlgorithm;

/// Fallback for camera and lens fields whose tag is absent.
pub const UNKNOWN: &str = "Unknown";

/// Placeholder for GPS-derived fields when the image has no usable GPS block.
pub const GPS_UNAVAILABLE: &str = "unavailable";

/// Placeholder when the geocoder could not produce an address.
pub const ADDRESS_UNAVAILABLE: &str = "address unavailable";

/// Placeholder when reverse geocoding was turned off.
pub const GEOCODING_DISABLED: &str = "geocoding disabled";

/// Readable EXIF tags, keyed by tag name in the order they were read.
pub type ExifTags = serde_json::Map<String, serde_json::Value>;

/// Everything collected about one image.
///
/// Field order is collection order, and it is the key order of the JSON export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    // === File Identification ===
    /// File name as supplied by the caller
    pub file_name: String,

    /// Detected format ("jpeg", "png", "tiff", etc.)
    pub format: String,

    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// File size in bytes
    pub file_size: u64,

    // === Interpreted EXIF ===
    /// Camera and lens information
    pub camera: CameraInfo,

    /// Decimal GPS coordinates, if the image carries a complete GPS block
    pub gps: Option<GpsCoordinates>,

    /// Reverse-geocoded address or a placeholder
    pub address: String,

    /// OpenStreetMap link for the coordinates
    pub map_url: Option<String>,

    /// Timestamp fields and the inconsistency flag
    pub timestamps: TimestampReport,

    // === Integrity ===
    /// Digest of the raw file bytes
    pub file_hash: FileDigest,

    /// Outcome of the hidden-text check
    pub steganography: StegoResult,

    // === Raw Tags ===
    /// Every readable EXIF tag
    pub exif: ExifTags,

    /// Why individual fields fell back to placeholders
    pub notes: Vec<String>,
}

/// Camera and lens strings. Absent tags read "Unknown".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraInfo {
    pub make: String,
    pub model: String,
    pub lens_model: String,
    pub focal_length: String,
    pub aperture: String,
}

impl Default for CameraInfo {
    fn default() -> Self {
        Self {
            make: UNKNOWN.to_string(),
            model: UNKNOWN.to_string(),
            lens_model: UNKNOWN.to_string(),
            focal_length: UNKNOWN.to_string(),
            aperture: UNKNOWN.to_string(),
        }
    }
}

/// Signed decimal coordinates (south and west are negative).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One timestamp tag, as stored and as ISO-8601.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimestampField {
    /// Value exactly as found in the tag (trimmed)
    pub raw: String,

    /// `YYYY-MM-DDTHH:MM:SS` when the raw value parses as an EXIF date-time
    pub iso: Option<String>,
}

/// The three EXIF date-time tags and whether they disagree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimestampReport {
    /// DateTimeOriginal
    pub original: Option<TimestampField>,

    /// DateTimeDigitized
    pub digitized: Option<TimestampField>,

    /// DateTime (last modification)
    pub modified: Option<TimestampField>,

    /// True when any two present timestamps differ
    pub possible_inconsistency: bool,
}

/// Hex digest of the uploaded bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDigest {
    pub algorithm: HashAlgorithm,
    pub hex: String,
}

/// Result of looking for LSB-embedded text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StegoResult {
    /// A payload was decoded
    HiddenMessage { message: String },
    /// Nothing decodable was found
    NoHiddenMessage,
}

impl StegoResult {
    pub fn message(&self) -> Option<&str> {
        match self {
            StegoResult::HiddenMessage { message } => Some(message),
            StegoResult::NoHiddenMessage => None,
        }
    }
}

impl MetadataRecord {
    /// Flatten the record into labelled display strings, in collection order.
    ///
    /// This is the plain key/value view a UI renders; the raw tag list is
    /// appended after the interpreted fields.
    pub fn fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("File".to_string(), self.file_name.clone()),
            ("Format".to_string(), self.format.clone()),
            (
                "Dimensions".to_string(),
                format!("{}x{}", self.width, self.height),
            ),
            ("File Size".to_string(), format!("{} bytes", self.file_size)),
            ("Camera Make".to_string(), self.camera.make.clone()),
            ("Camera Model".to_string(), self.camera.model.clone()),
            ("Lens Model".to_string(), self.camera.lens_model.clone()),
            ("Focal Length".to_string(), self.camera.focal_length.clone()),
            ("Aperture".to_string(), self.camera.aperture.clone()),
        ];

        match &self.gps {
            Some(gps) => {
                fields.push(("Latitude".to_string(), format!("{:.6}", gps.latitude)));
                fields.push(("Longitude".to_string(), format!("{:.6}", gps.longitude)));
            }
            None => fields.push(("GPS".to_string(), GPS_UNAVAILABLE.to_string())),
        }
        fields.push(("Location".to_string(), self.address.clone()));
        if let Some(url) = &self.map_url {
            fields.push(("Map".to_string(), url.clone()));
        }

        let ts = &self.timestamps;
        for (label, field) in [
            ("Original DateTime", &ts.original),
            ("Digitized DateTime", &ts.digitized),
            ("Modified DateTime", &ts.modified),
        ] {
            let value = field
                .as_ref()
                .map(|f| f.iso.clone().unwrap_or_else(|| f.raw.clone()))
                .unwrap_or_else(|| "None".to_string());
            fields.push((label.to_string(), value));
        }
        fields.push((
            "Timestamp Consistency".to_string(),
            if ts.possible_inconsistency {
                "possible inconsistency".to_string()
            } else {
                "consistent".to_string()
            },
        ));

        fields.push((
            format!("{} Hash", self.file_hash.algorithm.label()),
            self.file_hash.hex.clone(),
        ));
        fields.push((
            "Hidden Message".to_string(),
            self.steganography
                .message()
                .map(str::to_string)
                .unwrap_or_else(|| "No hidden message detected".to_string()),
        ));

        for (name, value) in &self.exif {
            let display = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            fields.push((name.clone(), display));
        }

        fields
    }
}
