//! # Dataset Format
//!
//! The static game data as a serde model.
//!
//! A dataset lists material names, artefact records, and collection records:
//!
//! ```toml
//! materials = ["Keramos", "Everlight silvthril"]
//!
//! [[artefacts]]
//! name = "Amphora"
//! materials = { Keramos = 46, "Everlight silvthril" = 34 }
//!
//! [[collections]]
//! name = "Saradominist III"
//! artefacts = ["Amphora"]
//! ```

use crate::{ArchplanError, KnowledgeBase};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One artefact definition: its name and per-unit material costs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtefactRecord {
    /// Artefact name.
    pub name: String,
    /// Material name -> quantity needed for one restoration.
    #[serde(default)]
    pub materials: BTreeMap<String, u64>,
}

/// One collection definition: its name and artefact names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRecord {
    /// Collection name.
    pub name: String,
    /// Names of the artefacts in the collection, in any order.
    #[serde(default)]
    pub artefacts: Vec<String>,
}

/// The complete reference dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Material names.
    #[serde(default)]
    pub materials: Vec<String>,
    /// Artefact definitions.
    #[serde(default)]
    pub artefacts: Vec<ArtefactRecord>,
    /// Collection definitions.
    #[serde(default)]
    pub collections: Vec<CollectionRecord>,
}

impl Dataset {
    /// Capture the current contents of a knowledge base.
    ///
    /// Records come out in name order, so equal registries produce equal datasets.
    #[must_use]
    pub fn from_knowledge_base(knowledge: &KnowledgeBase) -> Self {
        Self {
            materials: knowledge
                .materials()
                .map(|material| material.name().to_string())
                .collect(),
            artefacts: knowledge
                .artefacts()
                .map(|artefact| ArtefactRecord {
                    name: artefact.name().to_string(),
                    materials: artefact
                        .required_materials()
                        .iter()
                        .map(|entry| (entry.material.clone(), entry.quantity))
                        .collect(),
                })
                .collect(),
            collections: knowledge
                .collections()
                .map(|collection| CollectionRecord {
                    name: collection.name().to_string(),
                    artefacts: collection.artefacts().to_vec(),
                })
                .collect(),
        }
    }

    /// Register every definition into `knowledge`.
    ///
    /// Materials are added first, then artefacts, then collections. Existing
    /// entries with the same names are overwritten. If any definition is
    /// invalid, `knowledge` is left exactly as it was.
    pub fn load_into(&self, knowledge: &mut KnowledgeBase) -> Result<(), ArchplanError> {
        let mut staged = knowledge.clone();

        for material in &self.materials {
            staged.add_material(material.as_str())?;
        }

        for record in &self.artefacts {
            staged.add_artefact(
                record.name.as_str(),
                record
                    .materials
                    .iter()
                    .map(|(material, quantity)| (material.as_str(), *quantity)),
            )?;
        }

        for record in &self.collections {
            staged.add_collection(
                record.name.as_str(),
                record.artefacts.iter().map(String::as_str),
            )?;
        }

        *knowledge = staged;
        Ok(())
    }

    /// Total number of definitions in the dataset.
    #[must_use]
    pub fn len(&self) -> usize {
        self.materials.len() + self.artefacts.len() + self.collections.len()
    }

    /// Check whether the dataset defines nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // =========================================================================
    // TEXT ENCODINGS
    // =========================================================================

    /// Parse a dataset from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ArchplanError> {
        toml::from_str(text).map_err(|e| ArchplanError::DeserializationError(e.to_string()))
    }

    /// Render the dataset as TOML text.
    pub fn to_toml_string(&self) -> Result<String, ArchplanError> {
        toml::to_string(self).map_err(|e| ArchplanError::SerializationError(e.to_string()))
    }

    /// Parse a dataset from JSON bytes.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ArchplanError> {
        serde_json::from_slice(bytes)
            .map_err(|e| ArchplanError::DeserializationError(e.to_string()))
    }

    /// Render the dataset as pretty-printed JSON.
    pub fn to_json_vec(&self) -> Result<Vec<u8>, ArchplanError> {
        serde_json::to_vec_pretty(self)
            .map_err(|e| ArchplanError::SerializationError(e.to_string()))
    }
}

// =============================================================================
// TESTS
// =============================================================================
