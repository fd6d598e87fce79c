//! # Knowledge Base
//!
//! The authoritative registry of materials, artefacts, and collections.
//!
//! - Keyed by name, stored in `BTreeMap` for deterministic iteration
//! - Registration is overwrite-by-name: re-adding a name replaces the entry
//! - Cross references are not checked on registration; see
//!   [`KnowledgeBase::dangling_references`]
//! - Entries are only removed by [`KnowledgeBase::clear`]
//!
//! ## Process-wide registry
//!
//! Static game data is loaded once per process. [`KnowledgeBase::shared`]
//! returns that single registry; every caller sees the same state,
//! including a `clear()` issued through another reference. Planning code
//! takes `&KnowledgeBase` explicitly, so tests can use private instances.

use crate::validation::{validate_artefact_list, validate_bill, validate_name};
use crate::{ArchplanError, Artefact, Collection, EntityKind, Material, MaterialQuantity};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// The process-wide registry instance.
static SHARED: RwLock<KnowledgeBase> = RwLock::new(KnowledgeBase::new());

/// A reference from one definition to a name nobody registered.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct DanglingReference {
    /// Kind of the definition holding the reference.
    pub owner_kind: EntityKind,
    /// Name of the definition holding the reference.
    pub owner: String,
    /// Kind of the entity that is missing.
    pub missing_kind: EntityKind,
    /// The unresolved name.
    pub missing: String,
}

/// Registry of all reference data, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeBase {
    materials: BTreeMap<String, Material>,
    artefacts: BTreeMap<String, Artefact>,
    collections: BTreeMap<String, Collection>,
}

impl KnowledgeBase {
    /// Create a new, empty knowledge base.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            materials: BTreeMap::new(),
            artefacts: BTreeMap::new(),
            collections: BTreeMap::new(),
        }
    }

    /// The process-wide knowledge base.
    #[must_use]
    pub fn shared() -> &'static RwLock<Self> {
        &SHARED
    }

    /// Lock the process-wide knowledge base for reading.
    ///
    /// A poisoned lock is recovered: registry updates never leave a
    /// half-written entry behind.
    pub fn read_shared() -> RwLockReadGuard<'static, Self> {
        SHARED.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock the process-wide knowledge base for writing.
    pub fn write_shared() -> RwLockWriteGuard<'static, Self> {
        SHARED.write().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // REGISTRATION
    // =========================================================================

    /// Register a material, replacing any material with the same name.
    pub fn add_material(&mut self, name: impl Into<String>) -> Result<(), ArchplanError> {
        let name = name.into();
        validate_name(&name)?;

        self.materials.insert(name.clone(), Material::new(name));
        Ok(())
    }

    /// Register an artefact, replacing any artefact with the same name.
    ///
    /// The bill is stored sorted by material name. Material names are not
    /// required to be registered.
    pub fn add_artefact<I, S>(
        &mut self,
        name: impl Into<String>,
        required_materials: I,
    ) -> Result<(), ArchplanError>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let name = name.into();
        validate_name(&name)?;

        let bill: Vec<MaterialQuantity> = required_materials
            .into_iter()
            .map(|(material, quantity)| MaterialQuantity::new(material, quantity))
            .collect();
        validate_bill(&bill)?;

        self.artefacts
            .insert(name.clone(), Artefact::new(name, bill));
        Ok(())
    }

    /// Register a collection, replacing any collection with the same name.
    ///
    /// Artefact names are stored sorted and are not required to be registered.
    pub fn add_collection<I, S>(
        &mut self,
        name: impl Into<String>,
        artefacts: I,
    ) -> Result<(), ArchplanError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        validate_name(&name)?;

        let artefacts: Vec<String> = artefacts.into_iter().map(Into::into).collect();
        validate_artefact_list(&artefacts)?;

        self.collections
            .insert(name.clone(), Collection::new(name, artefacts));
        Ok(())
    }

    /// Remove every material, artefact, and collection.
    pub fn clear(&mut self) {
        self.materials.clear();
        self.artefacts.clear();
        self.collections.clear();
    }

    // =========================================================================
    // LOOKUP
    // =========================================================================

    /// Get a material by name.
    #[must_use]
    pub fn get_material(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    /// Get an artefact by name.
    #[must_use]
    pub fn get_artefact(&self, name: &str) -> Option<&Artefact> {
        self.artefacts.get(name)
    }

    /// Get a collection by name.
    #[must_use]
    pub fn get_collection(&self, name: &str) -> Option<&Collection> {
        self.collections.get(name)
    }

    /// Get an artefact by name, or a `NotFound` error naming it.
    pub fn require_artefact(&self, name: &str) -> Result<&Artefact, ArchplanError> {
        self.get_artefact(name)
            .ok_or_else(|| ArchplanError::not_found(EntityKind::Artefact, name))
    }

    /// Get a collection by name, or a `NotFound` error naming it.
    pub fn require_collection(&self, name: &str) -> Result<&Collection, ArchplanError> {
        self.get_collection(name)
            .ok_or_else(|| ArchplanError::not_found(EntityKind::Collection, name))
    }

    // =========================================================================
    // ITERATION
    // =========================================================================

    /// Iterate over materials in name order.
    pub fn materials(&self) -> impl Iterator<Item = &Material> {
        self.materials.values()
    }

    /// Iterate over artefacts in name order.
    pub fn artefacts(&self) -> impl Iterator<Item = &Artefact> {
        self.artefacts.values()
    }

    /// Iterate over collections in name order.
    pub fn collections(&self) -> impl Iterator<Item = &Collection> {
        self.collections.values()
    }

    /// Number of registered materials.
    #[must_use]
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Number of registered artefacts.
    #[must_use]
    pub fn artefact_count(&self) -> usize {
        self.artefacts.len()
    }

    /// Number of registered collections.
    #[must_use]
    pub fn collection_count(&self) -> usize {
        self.collections.len()
    }

    /// Check whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty() && self.artefacts.is_empty() && self.collections.is_empty()
    }

    // =========================================================================
    // CONSISTENCY
    // =========================================================================

    /// List every reference to an unregistered material or artefact.
    ///
    /// Artefact bills are checked against materials, collections against
    /// artefacts. The result is sorted and never mutates the registry.
    #[must_use]
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        let mut dangling = Vec::new();

        for artefact in self.artefacts.values() {
            for entry in artefact.required_materials() {
                if !self.materials.contains_key(&entry.material) {
                    dangling.push(DanglingReference {
                        owner_kind: EntityKind::Artefact,
                        owner: artefact.name().to_string(),
                        missing_kind: EntityKind::Material,
                        missing: entry.material.clone(),
                    });
                }
            }
        }

        for collection in self.collections.values() {
            for name in collection.artefacts() {
                if !self.artefacts.contains_key(name) {
                    dangling.push(DanglingReference {
                        owner_kind: EntityKind::Collection,
                        owner: collection.name().to_string(),
                        missing_kind: EntityKind::Artefact,
                        missing: name.clone(),
                    });
                }
            }
        }

        dangling.sort();
        dangling
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_on_empty_registry_return_none() {
        let kb = KnowledgeBase::new();

        assert!(kb.get_material("asdf").is_none());
        assert!(kb.get_artefact("asdf").is_none());
        assert!(kb.get_collection("asdf").is_none());
        assert!(kb.is_empty());
    }

    #[test]
    fn add_material_is_idempotent() {
        let mut kb = KnowledgeBase::new();
        kb.add_material("Everlight silvthril").expect("add");
        kb.add_material("Everlight silvthril").expect("add");

        assert_eq!(kb.material_count(), 1);
        assert_eq!(
            kb.get_material("Everlight silvthril").map(Material::name),
            Some("Everlight silvthril")
        );
    }

    #[test]
    fn add_artefact_overwrites_without_merging() {
        let mut kb = KnowledgeBase::new();
        kb.add_artefact("Amphora", [("Keramos", 46), ("Everlight silvthril", 34)])
            .expect("add");
        kb.add_artefact("Amphora", [("Goldrune", 2)]).expect("add");

        let amphora = kb.get_artefact("Amphora").expect("registered");
        assert_eq!(amphora.required_materials(), &[MaterialQuantity::new("Goldrune", 2)]);
        assert_eq!(kb.artefact_count(), 1);
    }

    #[test]
    fn rejected_artefact_leaves_previous_definition() {
        let mut kb = KnowledgeBase::new();
        kb.add_artefact("Amphora", [("Keramos", 46)]).expect("add");

        let result = kb.add_artefact("Amphora", [("Keramos", 0)]);
        assert!(matches!(result, Err(ArchplanError::InvalidDefinition(_))));

        let amphora = kb.get_artefact("Amphora").expect("registered");
        assert_eq!(amphora.quantity_of("Keramos"), Some(46));
    }

    #[test]
    fn add_collection_sorts_artefacts() {
        let mut kb = KnowledgeBase::new();
        kb.add_collection("C", ["b", "a"]).expect("add");

        let collection = kb.get_collection("C").expect("registered");
        assert_eq!(collection.artefacts(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn require_reports_missing_name() {
        let kb = KnowledgeBase::new();

        assert_eq!(
            kb.require_collection("Zarosian I").err(),
            Some(ArchplanError::not_found(EntityKind::Collection, "Zarosian I"))
        );
        assert_eq!(
            kb.require_artefact("Amphora").err(),
            Some(ArchplanError::not_found(EntityKind::Artefact, "Amphora"))
        );
    }

    #[test]
    fn clear_empties_all_tables() {
        let mut kb = KnowledgeBase::new();
        kb.add_material("Keramos").expect("add");
        kb.add_artefact("Amphora", [("Keramos", 46)]).expect("add");
        kb.add_collection("Saradominist III", ["Amphora"]).expect("add");

        kb.clear();

        assert!(kb.get_material("Keramos").is_none());
        assert!(kb.get_artefact("Amphora").is_none());
        assert!(kb.get_collection("Saradominist III").is_none());
        assert!(kb.is_empty());
    }

    #[test]
    fn dangling_references_are_reported_in_order() {
        let mut kb = KnowledgeBase::new();
        kb.add_material("Keramos").expect("add");
        kb.add_artefact("Amphora", [("Keramos", 46), ("Everlight silvthril", 34)])
            .expect("add");
        kb.add_collection("Saradominist III", ["Kopis dagger", "Amphora"])
            .expect("add");

        let dangling = kb.dangling_references();

        assert_eq!(dangling.len(), 2);
        assert_eq!(dangling[0].owner, "Amphora");
        assert_eq!(dangling[0].missing, "Everlight silvthril");
        assert_eq!(dangling[1].owner_kind, EntityKind::Collection);
        assert_eq!(dangling[1].missing, "Kopis dagger");
    }

    #[test]
    fn iteration_is_in_name_order() {
        let mut kb = KnowledgeBase::new();
        kb.add_material("White marble").expect("add");
        kb.add_material("Clockwork").expect("add");
        kb.add_material("Keramos").expect("add");

        let names: Vec<_> = kb.materials().map(Material::name).collect();
        assert_eq!(names, vec!["Clockwork", "Keramos", "White marble"]);
    }
}
