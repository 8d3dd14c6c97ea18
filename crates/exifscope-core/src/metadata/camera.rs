//! Camera and lens fields.

use exif::Tag;

use super::reader::RawExif;
use crate::types::{CameraInfo, UNKNOWN};

/// Look up make, model, lens, focal length and aperture. Absent tags read "Unknown".
pub fn interpret(raw: &RawExif) -> CameraInfo {
    CameraInfo {
        make: text_or_unknown(raw, Tag::Make),
        model: text_or_unknown(raw, Tag::Model),
        lens_model: text_or_unknown(raw, Tag::LensModel),
        focal_length: focal_length(raw).unwrap_or_else(|| UNKNOWN.to_string()),
        aperture: aperture(raw).unwrap_or_else(|| UNKNOWN.to_string()),
    }
}

fn text_or_unknown(raw: &RawExif, tag: Tag) -> String {
    raw.text(tag).unwrap_or(UNKNOWN).to_string()
}

/// Focal length in millimetres, e.g. "50 mm".
fn focal_length(raw: &RawExif) -> Option<String> {
    let mm = raw.get(Tag::FocalLength)?.first_f64()?;
    Some(format!("{} mm", format_number(mm)))
}

/// Aperture as an f-number, e.g. "f/1.8".
///
/// Prefers FNumber; ApertureValue is an APEX value (f = 2^(Av/2)).
fn aperture(raw: &RawExif) -> Option<String> {
    if let Some(f) = raw.get(Tag::FNumber).and_then(|v| v.first_f64()) {
        return Some(format!("f/{}", format_number(f)));
    }
    let apex = raw.get(Tag::ApertureValue)?.first_f64()?;
    let f = 2f64.powf(apex / 2.0);
    Some(format!("f/{}", format_number((f * 10.0).round() / 10.0)))
}

/// Up to two decimals, without trailing zeros.
fn format_number(value: f64) -> String {
    let s = format!("{value:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::reader::{RawEntry, RawValue};

    fn entry(tag: Tag, value: RawValue) -> RawEntry {
        RawEntry { tag, value }
    }

    #[test]
    fn test_all_unknown_when_absent() {
        let camera = interpret(&RawExif::default());
        assert_eq!(camera, CameraInfo::default());
    }

    #[test]
    fn test_reads_strings_and_numbers() {
        let raw = RawExif::from_entries(vec![
            entry(Tag::Make, RawValue::Text("NIKON CORPORATION".into())),
            entry(Tag::Model, RawValue::Text("NIKON Z 6".into())),
            entry(Tag::LensModel, RawValue::Text("NIKKOR Z 24-70mm f/4 S".into())),
            entry(Tag::FocalLength, RawValue::Rational(vec![(500, 10)])),
            entry(Tag::FNumber, RawValue::Rational(vec![(18, 10)])),
        ]);
        let camera = interpret(&raw);
        assert_eq!(camera.make, "NIKON CORPORATION");
        assert_eq!(camera.model, "NIKON Z 6");
        assert_eq!(camera.lens_model, "NIKKOR Z 24-70mm f/4 S");
        assert_eq!(camera.focal_length, "50 mm");
        assert_eq!(camera.aperture, "f/1.8");
    }

    #[test]
    fn test_lens_missing_does_not_hide_model() {
        let raw = RawExif::from_entries(vec![entry(Tag::Model, RawValue::Text("iPhone 12".into()))]);
        let camera = interpret(&raw);
        assert_eq!(camera.model, "iPhone 12");
        assert_eq!(camera.lens_model, UNKNOWN);
    }

    #[test]
    fn test_aperture_value_fallback() {
        // Av 5 -> f/5.66 -> f/5.7
        let raw = RawExif::from_entries(vec![entry(
            Tag::ApertureValue,
            RawValue::Rational(vec![(5, 1)]),
        )]);
        assert_eq!(interpret(&raw).aperture, "f/5.7");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(4.25), "4.25");
        assert_eq!(format_number(50.0), "50");
        assert_eq!(format_number(2.8), "2.8");
    }
}
