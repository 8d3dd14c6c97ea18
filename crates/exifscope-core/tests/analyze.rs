//! End-to-end analysis of synthetic uploads.

mod common;

use async_trait::async_trait;
use exif::{Field, In, Tag, Value};
use exifscope_core::output;
use exifscope_core::pipeline::Hasher;
use exifscope_core::types::{ADDRESS_UNAVAILABLE, GEOCODING_DISABLED, GPS_UNAVAILABLE, UNKNOWN};
use exifscope_core::{
    AnalyzeOptions, Analyzer, Config, GeocodeError, GpsCoordinates, MetadataRecord,
    ReverseGeocoder, StegoResult,
};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use common::{ascii, full_fields, jpeg_with_exif, jpeg_with_tiff, png_with_hidden_text};

/// Returns a fixed address and records how often it was asked.
struct FixedGeocoder {
    result: Result<String, String>,
    calls: Arc<AtomicU32>,
}

#[async_trait]
impl ReverseGeocoder for FixedGeocoder {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn reverse(&self, _coords: GpsCoordinates) -> Result<String, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone().map_err(|message| GeocodeError::Unavailable {
            message,
            status_code: Some(404),
        })
    }
}

fn analyzer_with(result: Result<&str, &str>) -> (Analyzer, Arc<AtomicU32>) {
    let calls = Arc::new(AtomicU32::new(0));
    let geocoder = FixedGeocoder {
        result: result.map(str::to_string).map_err(str::to_string),
        calls: calls.clone(),
    };
    let analyzer = Analyzer::new(&Config::default()).with_geocoder(Some(Box::new(geocoder)));
    (analyzer, calls)
}

async fn analyze(analyzer: &Analyzer, bytes: Vec<u8>, name: &str) -> MetadataRecord {
    analyzer
        .analyze_bytes(bytes, name, &AnalyzeOptions::default())
        .await
        .unwrap()
}

#[tokio::test]
async fn full_exif_jpeg_produces_every_field() {
    let (analyzer, calls) = analyzer_with(Ok("Champ de Mars, Paris, France"));
    let bytes = jpeg_with_exif(&full_fields());
    let record = analyze(&analyzer, bytes.clone(), "eiffel.jpg").await;

    assert_eq!(record.format, "jpeg");
    assert_eq!(record.camera.make, "Canon");
    assert_eq!(record.camera.model, "Canon EOS R5");
    assert_eq!(record.camera.lens_model, "RF24-105mm F4 L IS USM");
    assert_eq!(record.camera.focal_length, "50 mm");
    assert_eq!(record.camera.aperture, "f/4");

    let gps = record.gps.expect("GPS block should be interpreted");
    assert!((gps.latitude - 48.858217).abs() < 1e-6);
    assert!((gps.longitude - 2.2945).abs() < 1e-6);
    assert_eq!(record.address, "Champ de Mars, Paris, France");
    assert!(record.map_url.as_deref().unwrap().contains("mlat=48.858217"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let original = record.timestamps.original.as_ref().unwrap();
    assert_eq!(original.raw, "2023:05:01 10:00:00");
    assert_eq!(original.iso.as_deref(), Some("2023-05-01T10:00:00"));
    assert!(record.timestamps.possible_inconsistency);

    assert_eq!(record.file_hash.hex, Hasher::sha256_hex(&bytes));
    assert_eq!(record.steganography, StegoResult::NoHiddenMessage);
    assert_eq!(record.exif.get("Make"), Some(&serde_json::json!("Canon")));
    assert!(record.exif.contains_key("GPSLatitude"));
    assert!(record.notes.is_empty(), "unexpected notes: {:?}", record.notes);
}

#[tokio::test]
async fn matching_timestamps_are_consistent() {
    let (analyzer, _) = analyzer_with(Ok("unused"));
    let fields = vec![
        ascii(Tag::Model, "Pixel 7"),
        ascii(Tag::DateTime, "2023:05:01 10:00:00"),
        ascii(Tag::DateTimeOriginal, "2023:05:01 10:00:00"),
    ];
    let record = analyze(&analyzer, jpeg_with_exif(&fields), "pixel.jpg").await;
    assert!(!record.timestamps.possible_inconsistency);
}

#[tokio::test]
async fn missing_gps_does_not_hide_camera_model() {
    let (analyzer, calls) = analyzer_with(Ok("unused"));
    let fields = vec![ascii(Tag::Model, "iPhone 12")];
    let record = analyze(&analyzer, jpeg_with_exif(&fields), "phone.jpg").await;

    assert_eq!(record.camera.model, "iPhone 12");
    assert_eq!(record.camera.lens_model, UNKNOWN);
    assert!(record.gps.is_none());
    assert_eq!(record.address, GPS_UNAVAILABLE);
    assert!(record.map_url.is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(record.notes.iter().any(|n| n.starts_with("GPS unavailable")));
}

#[tokio::test]
async fn failed_geocode_degrades_to_placeholder() {
    let (analyzer, _) = analyzer_with(Err("HTTP 404"));
    let record = analyze(&analyzer, jpeg_with_exif(&full_fields()), "eiffel.jpg").await;

    assert_eq!(record.address, ADDRESS_UNAVAILABLE);
    assert!(record.gps.is_some());
    assert_eq!(record.camera.model, "Canon EOS R5");
    assert!(record.notes.iter().any(|n| n.starts_with("Address unavailable")));
}

#[tokio::test]
async fn skip_geocode_leaves_geocoder_untouched() {
    let (analyzer, calls) = analyzer_with(Ok("unused"));
    let record = analyzer
        .analyze_bytes(
            jpeg_with_exif(&full_fields()),
            "eiffel.jpg",
            &AnalyzeOptions { skip_geocode: true },
        )
        .await
        .unwrap();

    assert_eq!(record.address, GEOCODING_DISABLED);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn hidden_text_is_revealed_without_exif() {
    let (analyzer, _) = analyzer_with(Ok("unused"));
    let record = analyze(&analyzer, png_with_hidden_text("the key is under the mat"), "cat.png").await;

    assert_eq!(
        record.steganography.message(),
        Some("the key is under the mat")
    );
    assert_eq!(record.camera.make, UNKNOWN);
    assert_eq!(record.notes, vec!["No EXIF metadata found".to_string()]);
}

#[tokio::test]
async fn malformed_exif_is_noted_and_other_fields_survive() {
    let (analyzer, calls) = analyzer_with(Ok("unused"));
    let bytes = jpeg_with_tiff(b"MX*\0\x08\0\0\0\0\0");
    let record = analyze(&analyzer, bytes.clone(), "broken.jpg").await;

    assert_eq!(record.notes.len(), 1, "notes: {:?}", record.notes);
    assert!(record.notes[0].starts_with("Malformed EXIF metadata"));
    assert_eq!(record.camera.make, UNKNOWN);
    assert_eq!(record.address, GPS_UNAVAILABLE);
    assert_eq!(record.file_hash.hex, Hasher::sha256_hex(&bytes));
    assert_eq!(record.steganography, StegoResult::NoHiddenMessage);
    assert_eq!((record.width, record.height), (16, 16));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn byte_and_latin1_tags_reach_the_export() {
    let (analyzer, _) = analyzer_with(Ok("unused"));
    let mut fields = vec![
        Field {
            tag: Tag::Make,
            ifd_num: In::PRIMARY,
            value: Value::Ascii(vec![b"Caf\xe9 Cam".to_vec()]),
        },
        Field {
            tag: Tag::GPSVersionID,
            ifd_num: In::PRIMARY,
            value: Value::Byte(vec![2, 3, 0, 0]),
        },
        Field {
            tag: Tag::GPSAltitudeRef,
            ifd_num: In::PRIMARY,
            value: Value::Byte(vec![1]),
        },
    ];
    fields.push(ascii(Tag::Model, "Box"));
    let record = analyze(&analyzer, jpeg_with_exif(&fields), "latin1.jpg").await;

    assert_eq!(record.camera.make, "Café Cam");
    assert_eq!(record.exif.get("Make"), Some(&serde_json::json!("Café Cam")));
    assert_eq!(
        record.exif.get("GPSVersionID"),
        Some(&serde_json::json!([2, 3, 0, 0]))
    );
    assert_eq!(record.exif.get("GPSAltitudeRef"), Some(&serde_json::json!(1)));
}

#[tokio::test]
async fn exported_json_round_trips() {
    let (analyzer, _) = analyzer_with(Ok("Champ de Mars, Paris, France"));
    let record = analyze(&analyzer, jpeg_with_exif(&full_fields()), "eiffel.jpg").await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("metadata.json");
    output::export_to_file(&record, &path, true).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let parsed: MetadataRecord = output::from_json(&content).unwrap();
    assert_eq!(parsed, record);

    // Keys appear in collection order
    let camera_pos = content.find("\"camera\"").unwrap();
    let hash_pos = content.find("\"file_hash\"").unwrap();
    let exif_pos = content.find("\"exif\"").unwrap();
    assert!(camera_pos < hash_pos && hash_pos < exif_pos);
}

#[tokio::test]
async fn same_bytes_same_digest() {
    let (analyzer, _) = analyzer_with(Ok("unused"));
    let bytes = jpeg_with_exif(&full_fields());
    let first = analyze(&analyzer, bytes.clone(), "a.jpg").await;
    let second = analyze(&analyzer, bytes, "b.jpg").await;
    assert_eq!(first.file_hash, second.file_hash);
}
