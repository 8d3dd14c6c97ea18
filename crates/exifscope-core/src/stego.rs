//! Hidden-text detection in pixel least significant bits.
//!
//! The payload layout is the common LSB text scheme:
//!
//! ```text
//! pixels in row-major order, channels R, G, B (alpha ignored)
//! one bit per channel, most significant bit first, 8 bits per character
//! stream = "<decimal length>:<message>"
//! ```
//!
//! Anything that does not follow this layout is reported as "no hidden
//! message". Absence of a payload is never an error for the caller.

use image::DynamicImage;
use thiserror::Error;

use crate::types::StegoResult;

/// Longest length prefix accepted before the `:` separator.
const MAX_PREFIX_DIGITS: usize = 10;

/// Why no payload could be decoded.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RevealError {
    /// The bit stream does not start with `<digits>:`
    #[error("no length prefix in pixel data")]
    NoLengthPrefix,

    /// The announced length runs past the end of the image
    #[error("payload of {announced} bytes exceeds remaining capacity of {available} bytes")]
    Truncated { announced: usize, available: usize },
}

/// Looks for LSB-embedded text in decoded images.
pub struct StegoChecker;

impl StegoChecker {
    /// Check an image, folding every decode failure into `NoHiddenMessage`.
    pub fn check(image: &DynamicImage) -> StegoResult {
        match reveal(image) {
            Ok(message) if !message.is_empty() => {
                tracing::warn!("Hidden message found ({} bytes)", message.len());
                StegoResult::HiddenMessage { message }
            }
            Ok(_) => StegoResult::NoHiddenMessage,
            Err(e) => {
                tracing::debug!("No hidden message: {e}");
                StegoResult::NoHiddenMessage
            }
        }
    }
}

/// Decode the LSB payload from an image.
pub fn reveal(image: &DynamicImage) -> Result<String, RevealError> {
    let rgb = image.to_rgb8();
    let channels = rgb.as_raw();
    let mut bytes = channels
        .chunks_exact(8)
        .map(|bits| bits.iter().fold(0u8, |acc, &c| (acc << 1) | (c & 1)));
    let capacity = channels.len() / 8;

    let mut prefix = String::new();
    loop {
        match bytes.next() {
            Some(b':') if !prefix.is_empty() => break,
            Some(b) if b.is_ascii_digit() && prefix.len() < MAX_PREFIX_DIGITS => {
                prefix.push(b as char)
            }
            _ => return Err(RevealError::NoLengthPrefix),
        }
    }

    let announced: usize = prefix.parse().map_err(|_| RevealError::NoLengthPrefix)?;
    let available = capacity - prefix.len() - 1;
    if announced > available {
        return Err(RevealError::Truncated {
            announced,
            available,
        });
    }

    let payload: Vec<u8> = bytes.take(announced).collect();
    Ok(String::from_utf8_lossy(&payload).into_owned())
}
