//! # Planner Primitives
//!
//! Hardcoded constants for the Archplan core.
//!
//! These are compiled into the binary and are immutable at runtime.

/// Magic bytes for the Archplan binary snapshot header.
///
/// - File Header = Magic Bytes ("ARCH") + Version (u8) before payload.
pub const MAGIC_BYTES: &[u8; 4] = b"ARCH";

/// Current snapshot format version.
///
/// Increment this when making breaking changes to the snapshot format.
pub const FORMAT_VERSION: u8 = 1;

/// Size of the snapshot header in bytes.
pub const HEADER_LEN: usize = 5;

// =============================================================================
// DEFINITION LIMITS
// =============================================================================

/// Maximum length for material, artefact, and collection names.
///
/// Longer names are rejected before the registry is touched.
pub const MAX_NAME_LENGTH: usize = 256;

/// Maximum number of distinct materials in a single artefact's bill.
pub const MAX_BILL_LENGTH: usize = 64;

/// Maximum number of artefacts listed in a single collection.
pub const MAX_COLLECTION_SIZE: usize = 256;

/// Maximum snapshot payload size (64 MB).
///
/// Checked before any payload decoding takes place.
pub const MAX_SNAPSHOT_SIZE: usize = 64 * 1024 * 1024;
