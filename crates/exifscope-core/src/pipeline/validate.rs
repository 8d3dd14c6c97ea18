//! Upload validation before decoding.

use std::path::Path;

use crate::config::LimitsConfig;
use crate::error::{PipelineError, PipelineResult};

/// Validates uploads before they reach the decoder.
pub struct Validator {
    limits: LimitsConfig,
}

impl Validator {
    /// Create a new validator with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Check a file on disk exists and is within the size limit, without reading it.
    pub fn validate_path(&self, path: &Path) -> PipelineResult<()> {
        if !path.exists() {
            return Err(PipelineError::FileNotFound(path.to_path_buf()));
        }
        let metadata = std::fs::metadata(path).map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: format!("Cannot read metadata: {}", e),
        })?;
        self.check_size(metadata.len(), path)
    }

    /// Check an in-memory upload: size limit and a recognizable image signature.
    pub fn validate_bytes(&self, bytes: &[u8], path: &Path) -> PipelineResult<()> {
        self.check_size(bytes.len() as u64, path)?;

        if bytes.len() < 4 {
            return Err(PipelineError::Decode {
                path: path.to_path_buf(),
                message: "File too small to be a valid image".to_string(),
            });
        }
        if !Self::is_valid_image_header(bytes) {
            return Err(PipelineError::Decode {
                path: path.to_path_buf(),
                message: "Unrecognized image format (invalid magic bytes)".to_string(),
            });
        }
        Ok(())
    }

    fn check_size(&self, len: u64, path: &Path) -> PipelineResult<()> {
        let max_bytes = self.limits.max_file_size_mb.saturating_mul(1024 * 1024);
        if len > max_bytes {
            return Err(PipelineError::FileTooLarge {
                path: path.to_path_buf(),
                size_mb: len / (1024 * 1024),
                max_mb: self.limits.max_file_size_mb,
            });
        }
        Ok(())
    }

    /// Check if the leading bytes match a format that can carry pixels we decode.
    fn is_valid_image_header(header: &[u8]) -> bool {
        match header {
            // JPEG
            [0xFF, 0xD8, 0xFF, ..] => true,
            // PNG
            [0x89, b'P', b'N', b'G', ..] => true,
            // GIF
            [b'G', b'I', b'F', b'8', ..] => true,
            // WebP: RIFF....WEBP
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => true,
            // BMP
            [b'B', b'M', ..] => true,
            // TIFF, little- and big-endian, version 42
            [b'I', b'I', 0x2A, 0x00, ..] | [b'M', b'M', 0x00, 0x2A, ..] => true,
            // HEIF/AVIF: ftyp box at offset 4
            [_, _, _, _, b'f', b't', b'y', b'p', ..] => true,
            _ => false,
        }
    }
}
