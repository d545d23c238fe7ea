//! Artifact manifest: fingerprints of what was loaded and when.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactManifest {
    /// CRC32 of the feature schema, hex encoded
    pub layout_hash: String,
    /// SHA-256 of the serialized model, when loaded from bytes
    pub model_checksum: Option<String>,
    pub loaded_at: DateTime<Utc>,
}

impl ArtifactManifest {
    pub fn new(layout_hash: u32) -> Self {
        Self {
            layout_hash: format_layout_hash(layout_hash),
            model_checksum: None,
            loaded_at: Utc::now(),
        }
    }
}

pub fn format_layout_hash(hash: u32) -> String {
    format!("{:08x}", hash)
}

/// Hex SHA-256 of artifact bytes
pub fn checksum(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_is_sha256_hex() {
        assert_eq!(
            checksum(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(checksum(b"model").len(), 64);
    }

    #[test]
    fn test_layout_hash_is_zero_padded() {
        assert_eq!(format_layout_hash(0xbeef), "0000beef");
        assert_eq!(ArtifactManifest::new(1).layout_hash, "00000001");
    }
}
