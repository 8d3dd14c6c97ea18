//! JSON export of metadata records.
//!
//! Key order in the document is the field order of the serialized type,
//! so an exported [`MetadataRecord`](crate::types::MetadataRecord) lists
//! its fields in collection order.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// A writer that serializes items as JSON documents.
pub struct OutputWriter<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> OutputWriter<W> {
    /// Create a new output writer.
    ///
    /// # Arguments
    ///
    /// * `writer` - The underlying writer (file, stdout, etc.)
    /// * `pretty` - Whether to pretty-print JSON
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
        }
    }

    /// Write a single item as one JSON document followed by a newline.
    pub fn write<T: Serialize>(&mut self, item: &T) -> io::Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, item).map_err(io::Error::other)?;
        } else {
            serde_json::to_writer(&mut self.writer, item).map_err(io::Error::other)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Write one item to a file, replacing any existing file.
pub fn export_to_file<T: Serialize>(item: &T, path: &Path, pretty: bool) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = OutputWriter::new(BufWriter::new(File::create(path)?), pretty);
    writer.write(item)?;
    writer.flush()?;
    tracing::debug!("Exported metadata to {}", path.display());
    Ok(())
}

/// Convenience function to serialize an item to a JSON string.
pub fn to_json<T: Serialize>(item: &T, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(item)
    } else {
        serde_json::to_string(item)
    }
}

/// Parse an exported document back into its type.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(json)
}
