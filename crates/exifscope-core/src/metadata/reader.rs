//! Raw EXIF extraction from uploaded bytes.
//!
//! Parsing is delegated to `kamadak-exif`. This module only copies the
//! primary-image fields into an owned [`RawExif`] so the interpreters can
//! work on plain values (and tests can build a mapping by hand).

use exif::{In, Reader, Tag, Value};
use std::io::Cursor;

use crate::error::MetadataError;

/// A tag value, as stored in the EXIF block.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// ASCII (Latin-1 when not UTF-8), or UNDEFINED payloads that read as text
    Text(String),
    /// BYTE/SHORT/LONG
    Unsigned(Vec<u32>),
    /// SBYTE/SSHORT/SLONG
    Signed(Vec<i32>),
    /// FLOAT/DOUBLE
    Float(Vec<f64>),
    /// RATIONAL as (numerator, denominator)
    Rational(Vec<(u32, u32)>),
    /// SRATIONAL as (numerator, denominator)
    SignedRational(Vec<(i32, i32)>),
    /// Binary payloads that are not text (maker notes, thumbnails, ...)
    Bytes(Vec<u8>),
}

impl RawValue {
    /// The value as text, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Rational components as floats. `None` if any denominator is zero.
    pub fn as_rationals(&self) -> Option<Vec<f64>> {
        match self {
            RawValue::Rational(v) => v
                .iter()
                .map(|&(n, d)| (d != 0).then(|| n as f64 / d as f64))
                .collect(),
            RawValue::SignedRational(v) => v
                .iter()
                .map(|&(n, d)| (d != 0).then(|| n as f64 / d as f64))
                .collect(),
            _ => None,
        }
    }

    /// First component as a float, for single-valued numeric tags.
    pub fn first_f64(&self) -> Option<f64> {
        match self {
            RawValue::Unsigned(v) => v.first().map(|&x| x as f64),
            RawValue::Signed(v) => v.first().map(|&x| x as f64),
            RawValue::Float(v) => v.first().copied(),
            RawValue::Rational(_) | RawValue::SignedRational(_) => {
                self.as_rationals()?.first().copied()
            }
            RawValue::Text(_) | RawValue::Bytes(_) => None,
        }
    }

    /// JSON form for the export. Binary payloads have none.
    ///
    /// Rationals become floats; a zero denominator is kept as `"n/0"` text.
    pub fn to_json(&self) -> Option<serde_json::Value> {
        use serde_json::Value as J;

        fn collapse(mut items: Vec<J>) -> J {
            if items.len() == 1 {
                items.remove(0)
            } else {
                J::Array(items)
            }
        }

        fn ratio<T: Into<f64> + Copy + std::fmt::Display>(n: T, d: T) -> J {
            let num: f64 = n.into();
            let denom: f64 = d.into();
            if denom == 0.0 {
                J::String(format!("{n}/{d}"))
            } else {
                serde_json::Number::from_f64(num / denom)
                    .map(J::Number)
                    .unwrap_or_else(|| J::String(format!("{n}/{d}")))
            }
        }

        let json = match self {
            RawValue::Text(s) => J::String(s.clone()),
            RawValue::Unsigned(v) => collapse(v.iter().map(|&x| J::from(x)).collect()),
            RawValue::Signed(v) => collapse(v.iter().map(|&x| J::from(x)).collect()),
            RawValue::Float(v) => collapse(
                v.iter()
                    .map(|&x| {
                        serde_json::Number::from_f64(x)
                            .map(J::Number)
                            .unwrap_or(J::Null)
                    })
                    .collect(),
            ),
            RawValue::Rational(v) => collapse(v.iter().map(|&(n, d)| ratio(n, d)).collect()),
            RawValue::SignedRational(v) => {
                collapse(v.iter().map(|&(n, d)| ratio(n, d)).collect())
            }
            RawValue::Bytes(_) => return None,
        };
        Some(json)
    }
}

impl From<&Value> for RawValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Ascii(parts) => RawValue::Text(ascii_text(parts.join(&b' '))),
            Value::Byte(v) => RawValue::Unsigned(v.iter().map(|&x| x as u32).collect()),
            Value::Undefined(v, _) => text_or_bytes(v.clone()),
            Value::Short(v) => RawValue::Unsigned(v.iter().map(|&x| x as u32).collect()),
            Value::Long(v) => RawValue::Unsigned(v.clone()),
            Value::SByte(v) => RawValue::Signed(v.iter().map(|&x| x as i32).collect()),
            Value::SShort(v) => RawValue::Signed(v.iter().map(|&x| x as i32).collect()),
            Value::SLong(v) => RawValue::Signed(v.clone()),
            Value::Float(v) => RawValue::Float(v.iter().map(|&x| x as f64).collect()),
            Value::Double(v) => RawValue::Float(v.clone()),
            Value::Rational(v) => RawValue::Rational(v.iter().map(|r| (r.num, r.denom)).collect()),
            Value::SRational(v) => {
                RawValue::SignedRational(v.iter().map(|r| (r.num, r.denom)).collect())
            }
            _ => RawValue::Bytes(Vec::new()),
        }
    }
}

/// ASCII tags in the wild often hold Latin-1; fall back to it when UTF-8 fails.
fn ascii_text(bytes: Vec<u8>) -> String {
    let text = String::from_utf8(bytes)
        .unwrap_or_else(|e| e.into_bytes().iter().map(|&b| char::from(b)).collect());
    text.trim_end_matches('\0').trim().to_string()
}

/// Keep UNDEFINED payloads that decode as printable UTF-8 as text.
fn text_or_bytes(bytes: Vec<u8>) -> RawValue {
    match String::from_utf8(bytes) {
        Ok(s) => {
            let trimmed = s.trim_end_matches('\0').trim();
            if trimmed.chars().any(|c| c.is_control()) {
                RawValue::Bytes(s.into_bytes())
            } else {
                RawValue::Text(trimmed.to_string())
            }
        }
        Err(e) => RawValue::Bytes(e.into_bytes()),
    }
}

/// One primary-IFD tag and its value.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntry {
    pub tag: Tag,
    pub value: RawValue,
}

/// Tag-to-value mapping for one image, in read order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawExif {
    entries: Vec<RawEntry>,
}

impl RawExif {
    /// Build a mapping from already-extracted entries.
    pub fn from_entries(entries: Vec<RawEntry>) -> Self {
        Self { entries }
    }

    /// Look up a tag. GPS and primary tags share numbers, so the tag carries its IFD.
    pub fn get(&self, tag: Tag) -> Option<&RawValue> {
        self.entries
            .iter()
            .find(|e| e.tag == tag)
            .map(|e| &e.value)
    }

    /// Text value of a tag, skipping blank strings.
    pub fn text(&self, tag: Tag) -> Option<&str> {
        self.get(tag)
            .and_then(RawValue::as_text)
            .filter(|s| !s.is_empty())
    }

    pub fn entries(&self) -> &[RawEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Readable tags keyed by tag name, for display and export.
    ///
    /// Binary payloads are left out. When a name repeats (same number in
    /// different IFDs never share a name), the first value wins.
    pub fn to_tags(&self) -> crate::types::ExifTags {
        let mut tags = crate::types::ExifTags::new();
        for entry in &self.entries {
            if let Some(value) = entry.value.to_json() {
                tags.entry(entry.tag.to_string()).or_insert(value);
            }
        }
        tags
    }
}

/// Reads EXIF blocks out of image containers.
pub struct ExifReader;

impl ExifReader {
    /// Read the primary-image EXIF fields from an in-memory container.
    ///
    /// Returns [`MetadataError::NoMetadata`] when there is no EXIF block or it
    /// holds no primary fields. A partly corrupt block yields what parsed.
    pub fn read(bytes: &[u8]) -> Result<RawExif, MetadataError> {
        let exif = match Reader::new()
            .continue_on_error(true)
            .read_from_container(&mut Cursor::new(bytes))
        {
            Ok(exif) => exif,
            Err(exif::Error::PartialResult(partial)) => {
                let (exif, errors) = partial.into_inner();
                for e in &errors {
                    tracing::warn!("Ignoring unreadable EXIF entry: {e}");
                }
                exif
            }
            Err(exif::Error::NotFound(_)) => return Err(MetadataError::NoMetadata),
            // kamadak reports containers it cannot look inside this way
            Err(exif::Error::InvalidFormat(msg)) if msg == "Unknown image format" => {
                return Err(MetadataError::NoMetadata)
            }
            Err(e) => return Err(MetadataError::Malformed(e.to_string())),
        };

        let entries: Vec<RawEntry> = exif
            .fields()
            .filter(|f| f.ifd_num == In::PRIMARY)
            .map(|f| RawEntry {
                tag: f.tag,
                value: RawValue::from(&f.value),
            })
            .collect();

        if entries.is_empty() {
            return Err(MetadataError::NoMetadata);
        }

        tracing::debug!("Read {} EXIF fields", entries.len());
        Ok(RawExif::from_entries(entries))
    }
}
