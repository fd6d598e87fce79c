//! # Formats Module
//!
//! Serialization formats for reference data.
//!
//! - `dataset`: serde model of the static game data (TOML / JSON)
//! - `persistence`: binary snapshot (header + postcard payload)
//!
//! All functions here are pure transformations; file I/O is in the app layer.

pub mod dataset;
pub mod persistence;

pub use dataset::{ArtefactRecord, CollectionRecord, Dataset};
pub use persistence::{SnapshotHeader, dataset_from_bytes, dataset_to_bytes};
