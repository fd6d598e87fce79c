//! # archplan-core
//!
//! The deterministic restoration planner for Archplan - THE LOGIC.
//!
//! A player restores artefacts; each artefact costs fixed quantities of
//! materials, and artefacts are grouped into collections. This crate holds
//! the reference data and answers one question: which materials, and how
//! many, are still needed for a chosen set of artefacts and collections.
//!
//! ## Components
//!
//! - `types`: `Material`, `Artefact`, `Collection`, `MaterialQuantity`, errors
//! - `knowledge`: the `KnowledgeBase` registry (overwrite-by-name, clearable)
//! - `storage`: owned material quantities (`MaterialSource`, `MaterialStorage`)
//! - `goal`: the `Goal` aggregation engine producing the shortfall report
//! - `formats`: dataset text encodings and the binary snapshot format
//!
//! ## Architectural Constraints
//!
//! - No async, no network, no logging
//! - `BTreeMap` only: every iteration order is deterministic
//! - Integer arithmetic only, saturating on overflow
//! - Never panics; every failure is an `ArchplanError`

// =============================================================================
// MODULES
// =============================================================================

pub mod collation;
pub mod formats;
pub mod goal;
pub mod knowledge;
pub mod primitives;
pub mod storage;
pub mod types;
pub mod validation;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{ArchplanError, Artefact, Collection, EntityKind, Material, MaterialQuantity};

// =============================================================================
// RE-EXPORTS: Registry, Storage, Goal
// =============================================================================

pub use goal::Goal;
pub use knowledge::{DanglingReference, KnowledgeBase};
pub use storage::{MaterialSource, MaterialStorage};

// =============================================================================
// RE-EXPORTS: Formats (from formats module)
// =============================================================================

pub use formats::{
    ArtefactRecord, CollectionRecord, Dataset, SnapshotHeader, dataset_from_bytes,
    dataset_to_bytes,
};
