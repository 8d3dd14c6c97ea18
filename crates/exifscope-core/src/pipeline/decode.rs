//! Image decoding with format detection, validation, and timeout support.

use image::{DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::config::LimitsConfig;
use crate::error::{PipelineError, PipelineResult};

/// Image decoder with configurable limits and timeout.
pub struct ImageDecoder {
    limits: LimitsConfig,
}

/// Result of decoding an image.
pub struct DecodedImage {
    /// The decoded image data
    pub image: DynamicImage,
    /// Detected image format
    pub format: ImageFormat,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Original file size in bytes
    pub file_size: u64,
}

impl ImageDecoder {
    /// Create a new decoder with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Decode an uploaded byte buffer with dimension checks and a timeout.
    ///
    /// The buffer is shared so the caller can keep hashing and reading EXIF
    /// from the same bytes.
    pub async fn decode_from_bytes(
        &self,
        bytes: Arc<[u8]>,
        path: &Path,
    ) -> PipelineResult<DecodedImage> {
        let path_owned = path.to_path_buf();
        let timeout_duration = Duration::from_millis(self.limits.decode_timeout_ms);

        let decode_result = timeout(timeout_duration, async {
            tokio::task::spawn_blocking(move || Self::decode_bytes_sync(&bytes, &path_owned))
                .await
        })
        .await;

        match decode_result {
            Ok(Ok(Ok(decoded))) => {
                if decoded.width > self.limits.max_image_dimension
                    || decoded.height > self.limits.max_image_dimension
                {
                    return Err(PipelineError::ImageTooLarge {
                        path: path.to_path_buf(),
                        width: decoded.width,
                        height: decoded.height,
                        max_dim: self.limits.max_image_dimension,
                    });
                }
                Ok(decoded)
            }
            Ok(Ok(Err(e))) => Err(e),
            Ok(Err(e)) => Err(PipelineError::Decode {
                path: path.to_path_buf(),
                message: format!("Task join error: {}", e),
            }),
            Err(_) => Err(PipelineError::Timeout {
                path: path.to_path_buf(),
                stage: "decode".to_string(),
                timeout_ms: self.limits.decode_timeout_ms,
            }),
        }
    }

    /// Synchronous decode (runs in spawn_blocking).
    fn decode_bytes_sync(bytes: &[u8], path: &Path) -> PipelineResult<DecodedImage> {
        let reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| PipelineError::Decode {
                path: path.to_path_buf(),
                message: format!("Cannot detect image format: {}", e),
            })?;
        let format = match reader.format() {
            Some(f) => f,
            None => ImageFormat::from_path(path).map_err(|_| PipelineError::UnsupportedFormat {
                path: path.to_path_buf(),
                format: path
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("unknown")
                    .to_string(),
            })?,
        };
        let image = reader.decode().map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let (width, height) = image.dimensions();
        Ok(DecodedImage {
            image,
            format,
            width,
            height,
            file_size: bytes.len() as u64,
        })
    }
}

/// Convert an ImageFormat to a string representation.
pub fn format_to_string(format: ImageFormat) -> String {
    match format {
        ImageFormat::Jpeg => "jpeg".to_string(),
        ImageFormat::Png => "png".to_string(),
        ImageFormat::WebP => "webp".to_string(),
        ImageFormat::Gif => "gif".to_string(),
        ImageFormat::Tiff => "tiff".to_string(),
        ImageFormat::Bmp => "bmp".to_string(),
        ImageFormat::Ico => "ico".to_string(),
        ImageFormat::Pnm => "pnm".to_string(),
        ImageFormat::Avif => "avif".to_string(),
        _ => "unknown".to_string(),
    }
}
