//! EXIF reading and field interpretation.
//!
//! - **reader**: pull the raw tag mapping out of the uploaded bytes
//! - **gps**: degrees/minutes/seconds to signed decimal degrees
//! - **timestamps**: date-time fields and the inconsistency check
//! - **camera**: camera and lens strings
//!
//! The interpreters are pure functions over [`RawExif`] and never fail the
//! whole record: each one falls back to a placeholder on its own.

pub mod camera;
pub mod gps;
pub mod reader;
pub mod timestamps;

pub use reader::{ExifReader, RawEntry, RawExif, RawValue};
