//! GPS coordinate interpretation.
//!
//! EXIF stores each axis as three rationals (degrees, minutes, seconds) plus
//! a hemisphere reference tag. All four tags must be present.

use exif::Tag;

use super::reader::RawExif;
use crate::error::GpsError;
use crate::types::GpsCoordinates;

/// Degrees/minutes/seconds with the sign held separately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dms {
    pub degrees: f64,
    pub minutes: f64,
    pub seconds: f64,
    pub negative: bool,
}

/// Convert a DMS triple to unsigned decimal degrees.
pub fn dms_to_decimal(degrees: f64, minutes: f64, seconds: f64) -> f64 {
    degrees + minutes / 60.0 + seconds / 3600.0
}

/// Split signed decimal degrees back into whole degrees, whole minutes and seconds.
pub fn decimal_to_dms(decimal: f64) -> Dms {
    let magnitude = decimal.abs();
    let degrees = magnitude.trunc();
    let minutes_total = (magnitude - degrees) * 60.0;
    let minutes = minutes_total.trunc();
    let seconds = (minutes_total - minutes) * 60.0;
    Dms {
        degrees,
        minutes,
        seconds,
        negative: decimal < 0.0,
    }
}

impl Dms {
    /// Signed decimal degrees.
    pub fn to_decimal(&self) -> f64 {
        let value = dms_to_decimal(self.degrees, self.minutes, self.seconds);
        if self.negative {
            -value
        } else {
            value
        }
    }
}

/// Derive signed decimal latitude/longitude from the GPS tags.
pub fn coordinates(raw: &RawExif) -> Result<GpsCoordinates, GpsError> {
    let latitude = axis(
        raw,
        (Tag::GPSLatitude, "GPSLatitude"),
        (Tag::GPSLatitudeRef, "GPSLatitudeRef"),
        'S',
    )?;
    let longitude = axis(
        raw,
        (Tag::GPSLongitude, "GPSLongitude"),
        (Tag::GPSLongitudeRef, "GPSLongitudeRef"),
        'W',
    )?;
    Ok(GpsCoordinates {
        latitude,
        longitude,
    })
}

fn axis(
    raw: &RawExif,
    (coord_tag, coord_name): (Tag, &'static str),
    (ref_tag, ref_name): (Tag, &'static str),
    negative_ref: char,
) -> Result<f64, GpsError> {
    let coord = raw
        .get(coord_tag)
        .ok_or(GpsError::MissingTag(coord_name))?;
    let reference = raw.text(ref_tag).ok_or(GpsError::MissingTag(ref_name))?;

    let parts = coord
        .as_rationals()
        .filter(|parts| parts.len() >= 3)
        .ok_or(GpsError::Malformed(coord_name))?;

    let hemisphere = reference
        .trim()
        .chars()
        .next()
        .map(|c| c.to_ascii_uppercase())
        .ok_or(GpsError::Malformed(ref_name))?;

    let dms = Dms {
        degrees: parts[0],
        minutes: parts[1],
        seconds: parts[2],
        negative: hemisphere == negative_ref,
    };
    Ok(dms.to_decimal())
}

/// OpenStreetMap link centred on the coordinates.
pub fn map_url(coords: &GpsCoordinates) -> String {
    format!(
        "https://www.openstreetmap.org/?mlat={lat:.6}&mlon={lon:.6}#map=15/{lat:.6}/{lon:.6}",
        lat = coords.latitude,
        lon = coords.longitude
    )
}
