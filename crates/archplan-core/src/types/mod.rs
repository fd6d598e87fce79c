//! # Core Type Definitions
//!
//! This module contains the reference value types of the planner:
//! - `Material`: a named resource
//! - `Artefact`: a restorable object and its bill of materials
//! - `Collection`: a named group of artefact names
//! - `MaterialQuantity`: a `(material, quantity)` pair used in bills and reports
//! - Error types (`ArchplanError`, `EntityKind`)
//!
//! ## Immutability
//!
//! `Material`, `Artefact`, and `Collection` are only constructed by the
//! `KnowledgeBase`, which sorts their contents first. Fields are private and
//! exposed through read-only accessors.

use crate::collation::compare_names;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// MATERIAL QUANTITY
// =============================================================================

/// A material name paired with a quantity.
///
/// Inside an artefact bill the quantity is the cost of one restoration.
/// Inside a shortfall report it is the total still required.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialQuantity {
    /// The material name.
    pub material: String,
    /// The quantity of that material.
    pub quantity: u64,
}

impl MaterialQuantity {
    /// Create a new material quantity.
    #[must_use]
    pub fn new(material: impl Into<String>, quantity: u64) -> Self {
        Self {
            material: material.into(),
            quantity,
        }
    }
}

impl fmt::Display for MaterialQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x{}", self.material, self.quantity)
    }
}

// =============================================================================
// MATERIAL
// =============================================================================

/// A single material used to restore artefacts. Identity is the name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Material {
    name: String,
}

impl Material {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Get the material name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

// =============================================================================
// ARTEFACT
// =============================================================================

/// An artefact and the materials needed to restore one unit of it.
///
/// Required materials are sorted by name with [`compare_names`] and hold at
/// most one entry per material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artefact {
    name: String,
    required_materials: Vec<MaterialQuantity>,
}

impl Artefact {
    /// Build an artefact, sorting the bill by material name.
    ///
    /// The caller-supplied order is not preserved.
    pub(crate) fn new(name: impl Into<String>, mut required_materials: Vec<MaterialQuantity>) -> Self {
        required_materials.sort_by(|a, b| compare_names(&a.material, &b.material));
        Self {
            name: name.into(),
            required_materials,
        }
    }

    /// Get the artefact name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the bill of materials for one restoration, sorted by material name.
    #[must_use]
    pub fn required_materials(&self) -> &[MaterialQuantity] {
        &self.required_materials
    }

    /// Get the per-unit quantity of one material, if the bill lists it.
    #[must_use]
    pub fn quantity_of(&self, material: &str) -> Option<u64> {
        self.required_materials
            .iter()
            .find(|entry| entry.material == material)
            .map(|entry| entry.quantity)
    }
}

// =============================================================================
// COLLECTION
// =============================================================================

/// A named group of artefacts.
///
/// Artefact names are sorted lexicographically and unique. They are not
/// required to exist in the knowledge base when the collection is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collection {
    name: String,
    artefacts: Vec<String>,
}

impl Collection {
    /// Build a collection, sorting its artefact names.
    pub(crate) fn new(name: impl Into<String>, mut artefacts: Vec<String>) -> Self {
        artefacts.sort();
        Self {
            name: name.into(),
            artefacts,
        }
    }

    /// Get the collection name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the artefact names in this collection, sorted.
    #[must_use]
    pub fn artefacts(&self) -> &[String] {
        &self.artefacts
    }

    /// Check whether the collection lists an artefact.
    #[must_use]
    pub fn contains(&self, artefact: &str) -> bool {
        self.artefacts
            .binary_search_by(|probe| probe.as_str().cmp(artefact))
            .is_ok()
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// The kind of reference data an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A material.
    Material,
    /// An artefact.
    Artefact,
    /// A collection.
    Collection,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Material => "Material",
            Self::Artefact => "Artefact",
            Self::Collection => "Collection",
        };
        f.write_str(label)
    }
}

/// Errors that can occur in the Archplan system.
///
/// - No silent failures
/// - Use `Result<T, ArchplanError>` for fallible operations
/// - The core never panics; all errors are returned to the caller
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArchplanError {
    /// A referenced material, artefact, or collection is not registered.
    #[error("{kind} '{name}' does not exist")]
    NotFound {
        /// What kind of entity was looked up.
        kind: EntityKind,
        /// The name that could not be resolved.
        name: String,
    },

    /// A definition violates a data-model invariant.
    #[error("Invalid definition: {0}")]
    InvalidDefinition(String),

    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A deserialization error occurred.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl ArchplanError {
    /// Build a not-found error for the given kind and name.
    #[must_use]
    pub fn not_found(kind: EntityKind, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artefact_bill_is_sorted_by_name() {
        let artefact = Artefact::new(
            "A",
            vec![MaterialQuantity::new("m2", 22), MaterialQuantity::new("m1", 30)],
        );

        assert_eq!(
            artefact.required_materials(),
            &[MaterialQuantity::new("m1", 30), MaterialQuantity::new("m2", 22)]
        );
        assert_eq!(artefact.quantity_of("m2"), Some(22));
        assert_eq!(artefact.quantity_of("m3"), None);
    }

    #[test]
    fn collection_artefacts_are_sorted() {
        let collection = Collection::new("C", vec!["b".to_string(), "a".to_string()]);

        assert_eq!(collection.artefacts(), &["a".to_string(), "b".to_string()]);
        assert!(collection.contains("a"));
        assert!(!collection.contains("c"));
    }

    #[test]
    fn not_found_names_the_missing_entity() {
        let err = ArchplanError::not_found(EntityKind::Collection, "Saradominist III");
        assert_eq!(err.to_string(), "Collection 'Saradominist III' does not exist");
    }

    #[test]
    fn material_quantity_display() {
        assert_eq!(MaterialQuantity::new("Keramos", 68).to_string(), "Keramos x68");
    }
}
