//! Timestamp interpretation and consistency analysis.

use exif::{DateTime, Tag};

use super::reader::RawExif;
use crate::types::{TimestampField, TimestampReport};

/// Read the original, digitized and modified date-times and compare them.
///
/// Every present value is compared with every other one; the report is
/// flagged as a possible inconsistency if any pair differs. Fewer than two
/// timestamps can never be inconsistent.
pub fn analyze(raw: &RawExif) -> TimestampReport {
    let original = field(raw, Tag::DateTimeOriginal);
    let digitized = field(raw, Tag::DateTimeDigitized);
    let modified = field(raw, Tag::DateTime);

    let present: Vec<&str> = [&original, &digitized, &modified]
        .into_iter()
        .flatten()
        .map(|f| f.raw.as_str())
        .collect();
    let possible_inconsistency = any_differ(&present);

    if possible_inconsistency {
        tracing::debug!("Timestamps disagree: {:?}", present);
    }

    TimestampReport {
        original,
        digitized,
        modified,
        possible_inconsistency,
    }
}

/// Pairwise comparison: true if any two values differ.
pub fn any_differ(values: &[&str]) -> bool {
    values
        .iter()
        .enumerate()
        .any(|(i, a)| values[i + 1..].iter().any(|b| a != b))
}

/// Format an EXIF `YYYY:MM:DD HH:MM:SS` string as ISO-8601.
pub fn to_iso(raw: &str) -> Option<String> {
    let dt = DateTime::from_ascii(raw.trim().as_bytes()).ok()?;
    Some(format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        dt.year, dt.month, dt.day, dt.hour, dt.minute, dt.second
    ))
}

fn field(raw: &RawExif, tag: Tag) -> Option<TimestampField> {
    let value = raw.text(tag)?.trim();
    if value.is_empty() {
        return None;
    }
    Some(TimestampField {
        raw: value.to_string(),
        iso: to_iso(value),
    })
}
