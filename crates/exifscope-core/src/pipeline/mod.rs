//! Image analysis pipeline components.
//!
//! - **validate**: size limit and signature checks on the upload
//! - **decode**: load and decode images from various formats
//! - **hash**: digest the raw bytes
//! - **analyzer**: orchestrates the full pipeline

pub mod analyzer;
pub mod decode;
pub mod hash;
pub mod validate;

// Re-exports for convenient access
pub use analyzer::{AnalyzeOptions, Analyzer};
pub use decode::{DecodedImage, ImageDecoder};
pub use hash::{HashAlgorithm, Hasher};
pub use validate::Validator;
