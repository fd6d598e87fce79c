//! # Snapshot Format
//!
//! Binary serialization for Archplan datasets.
//!
//! Format: Header (5 bytes) + postcard-serialized `Dataset`.
//! - 4 bytes: Magic ("ARCH")
//! - 1 byte: Version
//!
//! Size and header are validated before the payload is decoded.

use crate::formats::Dataset;
use crate::{ArchplanError, primitives};

// =============================================================================
// FILE HEADER
// =============================================================================

/// The snapshot header precedes all dataset data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotHeader {
    /// Magic bytes, always `ARCH` for a valid snapshot.
    pub magic: [u8; 4],
    /// Format version the payload was written with.
    pub version: u8,
}

impl SnapshotHeader {
    /// Create a new header with the current format version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            magic: *primitives::MAGIC_BYTES,
            version: primitives::FORMAT_VERSION,
        }
    }

    /// Validate the header.
    pub fn validate(&self) -> Result<(), ArchplanError> {
        if &self.magic != primitives::MAGIC_BYTES {
            return Err(ArchplanError::DeserializationError(
                "Invalid magic bytes".to_string(),
            ));
        }
        if self.version != primitives::FORMAT_VERSION {
            return Err(ArchplanError::DeserializationError(format!(
                "Unsupported version: {} (expected {})",
                self.version,
                primitives::FORMAT_VERSION
            )));
        }
        Ok(())
    }

    /// Write header to bytes.
    pub fn to_bytes(&self) -> [u8; primitives::HEADER_LEN] {
        let [m0, m1, m2, m3] = self.magic;
        [m0, m1, m2, m3, self.version]
    }

    /// Read header from the start of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArchplanError> {
        match bytes {
            [m0, m1, m2, m3, version, ..] => Ok(Self {
                magic: [*m0, *m1, *m2, *m3],
                version: *version,
            }),
            _ => Err(ArchplanError::DeserializationError(
                "Header too short".to_string(),
            )),
        }
    }

    /// Check whether `bytes` start with the snapshot magic.
    #[must_use]
    pub fn matches(bytes: &[u8]) -> bool {
        bytes.starts_with(primitives::MAGIC_BYTES)
    }
}

impl Default for SnapshotHeader {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// SERIALIZATION FUNCTIONS
// =============================================================================

/// Serialize a dataset to bytes (header + payload).
pub fn dataset_to_bytes(dataset: &Dataset) -> Result<Vec<u8>, ArchplanError> {
    let header = SnapshotHeader::new();

    let payload = postcard::to_stdvec(dataset)
        .map_err(|e| ArchplanError::SerializationError(e.to_string()))?;

    let mut result = Vec::with_capacity(primitives::HEADER_LEN + payload.len());
    result.extend_from_slice(&header.to_bytes());
    result.extend_from_slice(&payload);

    Ok(result)
}

/// Deserialize a dataset from bytes.
///
/// Validates, in order:
/// 1. Maximum size (before anything else is read)
/// 2. Header presence, magic bytes, and version
/// 3. Payload decoding
pub fn dataset_from_bytes(bytes: &[u8]) -> Result<Dataset, ArchplanError> {
    if bytes.len() > primitives::MAX_SNAPSHOT_SIZE {
        return Err(ArchplanError::DeserializationError(format!(
            "Data size {} bytes exceeds maximum allowed {} bytes",
            bytes.len(),
            primitives::MAX_SNAPSHOT_SIZE
        )));
    }

    let header = SnapshotHeader::from_bytes(bytes)?;
    header.validate()?;

    let payload = bytes.get(primitives::HEADER_LEN..).unwrap_or_default();
    postcard::from_bytes(payload).map_err(|e| {
        ArchplanError::DeserializationError(format!("Failed to decode dataset: {}", e))
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::{ArtefactRecord, CollectionRecord};
    use std::collections::BTreeMap;

    fn sample() -> Dataset {
        Dataset {
            materials: vec!["Clockwork".to_string(), "Keramos".to_string()],
            artefacts: vec![ArtefactRecord {
                name: "Dominarian device".to_string(),
                materials: BTreeMap::from([
                    ("Clockwork".to_string(), 1),
                    ("Keramos".to_string(), 22),
                ]),
            }],
            collections: vec![CollectionRecord {
                name: "Saradominist III".to_string(),
                artefacts: vec!["Dominarian device".to_string()],
            }],
        }
    }

    #[test]
    fn header_roundtrip() {
        let header = SnapshotHeader::new();
        let bytes = header.to_bytes();
        let restored = SnapshotHeader::from_bytes(&bytes).expect("parse header");

        assert_eq!(restored, header);
        assert!(SnapshotHeader::matches(&bytes));
    }

    #[test]
    fn bytes_roundtrip_bit_exact() {
        let bytes1 = dataset_to_bytes(&sample()).expect("first serialize");
        let restored = dataset_from_bytes(&bytes1).expect("deserialize");
        let bytes2 = dataset_to_bytes(&restored).expect("second serialize");

        assert_eq!(restored, sample());
        assert_eq!(bytes1, bytes2, "save -> load -> save must produce identical bytes");
    }

    #[test]
    fn invalid_magic_rejected() {
        let mut bytes = vec![0u8; 10];
        bytes[0..4].copy_from_slice(b"XXXX");

        assert!(dataset_from_bytes(&bytes).is_err());
    }

    #[test]
    fn wrong_version_rejected() {
        let mut bytes = dataset_to_bytes(&sample()).expect("serialize");
        bytes[4] = primitives::FORMAT_VERSION + 1;

        assert!(matches!(
            dataset_from_bytes(&bytes),
            Err(ArchplanError::DeserializationError(_))
        ));
    }

    #[test]
    fn truncated_data_rejected() {
        assert!(dataset_from_bytes(b"ARC").is_err());

        let bytes = dataset_to_bytes(&sample()).expect("serialize");
        assert!(dataset_from_bytes(&bytes[..bytes.len() - 3]).is_err());
    }
}
