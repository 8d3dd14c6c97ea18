//! Content hashing for file integrity checks.

use blake3::Hasher as Blake3Hasher;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::types::FileDigest;

/// Supported digest algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// SHA-256, the common choice for published checksums
    #[default]
    Sha256,
    /// BLAKE3
    Blake3,
}

impl HashAlgorithm {
    /// Display name used in rendered output.
    pub fn label(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "SHA-256",
            HashAlgorithm::Blake3 => "BLAKE3",
        }
    }
}

/// Hashes the raw uploaded bytes as a single unit.
pub struct Hasher {
    algorithm: HashAlgorithm,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new(HashAlgorithm::default())
    }
}

impl Hasher {
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Digest the whole byte buffer and return it with its algorithm.
    pub fn digest(&self, data: &[u8]) -> FileDigest {
        let hex = match self.algorithm {
            HashAlgorithm::Sha256 => Self::sha256_hex(data),
            HashAlgorithm::Blake3 => Self::blake3_hex(data),
        };
        FileDigest {
            algorithm: self.algorithm,
            hex,
        }
    }

    /// Lowercase hex SHA-256 of a byte buffer.
    pub fn sha256_hex(data: &[u8]) -> String {
        let digest = Sha256::digest(data);
        format!("{:x}", digest)
    }

    /// Lowercase hex BLAKE3 of a byte buffer.
    pub fn blake3_hex(data: &[u8]) -> String {
        let mut hasher = Blake3Hasher::new();
        hasher.update(data);
        hasher.finalize().to_hex().to_string()
    }
}
