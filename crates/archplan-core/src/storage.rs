//! # Material Storage
//!
//! A player's owned material quantities.
//!
//! Goal computations only need to read owned amounts, so they depend on the
//! [`MaterialSource`] trait rather than a concrete store. [`MaterialStorage`]
//! is the in-memory implementation shipped with the crate; save-file readers
//! or live inventory adapters can implement the trait themselves.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// MATERIAL SOURCE TRAIT
// =============================================================================

/// Read-only view of owned material quantities.
///
/// # Extension Point
///
/// Implementors must be pure: calling `owned` never changes what later calls
/// return. Unknown materials are owned in quantity zero.
pub trait MaterialSource {
    /// Quantity of `material` currently owned.
    fn owned(&self, material: &str) -> u64;
}

impl MaterialSource for BTreeMap<String, u64> {
    fn owned(&self, material: &str) -> u64 {
        self.get(material).copied().unwrap_or(0)
    }
}

// =============================================================================
// MATERIAL STORAGE
// =============================================================================

/// Owned material quantities, keyed by material name.
///
/// Zero quantities are never stored, so `len()` counts materials actually held.
/// Deserialized storage goes through the same rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StorageFile")]
pub struct MaterialStorage {
    materials: BTreeMap<String, u64>,
}

/// On-disk shape of a storage file, before zero entries are dropped.
#[derive(Deserialize)]
struct StorageFile {
    #[serde(default)]
    materials: BTreeMap<String, u64>,
}

impl From<StorageFile> for MaterialStorage {
    fn from(file: StorageFile) -> Self {
        file.materials.into_iter().collect()
    }
}

impl MaterialStorage {
    /// Create an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the owned quantity of a material, replacing the previous amount.
    pub fn set(&mut self, material: impl Into<String>, quantity: u64) {
        let material = material.into();
        if quantity == 0 {
            self.materials.remove(&material);
        } else {
            self.materials.insert(material, quantity);
        }
    }

    /// Add to the owned quantity of a material, saturating at `u64::MAX`.
    pub fn deposit(&mut self, material: impl Into<String>, quantity: u64) {
        if quantity == 0 {
            return;
        }
        let entry = self.materials.entry(material.into()).or_insert(0);
        *entry = entry.saturating_add(quantity);
    }

    /// Remove up to `quantity` of a material. Returns the amount actually removed.
    pub fn withdraw(&mut self, material: &str, quantity: u64) -> u64 {
        let Some(current) = self.materials.get_mut(material) else {
            return 0;
        };

        let removed = quantity.min(*current);
        *current -= removed;
        if *current == 0 {
            self.materials.remove(material);
        }
        removed
    }

    /// Iterate over owned materials in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.materials
            .iter()
            .map(|(name, quantity)| (name.as_str(), *quantity))
    }

    /// Number of materials with a non-zero quantity.
    #[must_use]
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Check whether nothing is owned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl MaterialSource for MaterialStorage {
    fn owned(&self, material: &str) -> u64 {
        self.materials.get(material).copied().unwrap_or(0)
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for MaterialStorage {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut storage = Self::new();
        for (material, quantity) in iter {
            storage.deposit(material, quantity);
        }
        storage
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_material_is_owned_zero_times() {
        let storage = MaterialStorage::new();
        assert_eq!(storage.owned("Keramos"), 0);
        assert!(storage.is_empty());
    }

    #[test]
    fn set_replaces_and_zero_removes() {
        let mut storage = MaterialStorage::new();
        storage.set("Keramos", 10);
        storage.set("Keramos", 4);
        assert_eq!(storage.owned("Keramos"), 4);

        storage.set("Keramos", 0);
        assert_eq!(storage.len(), 0);
    }

    #[test]
    fn deposit_accumulates_and_saturates() {
        let mut storage = MaterialStorage::new();
        storage.deposit("Goldrune", 5);
        storage.deposit("Goldrune", 7);
        assert_eq!(storage.owned("Goldrune"), 12);

        storage.deposit("Goldrune", u64::MAX);
        assert_eq!(storage.owned("Goldrune"), u64::MAX);
    }

    #[test]
    fn withdraw_never_goes_below_zero() {
        let mut storage = MaterialStorage::new();
        storage.deposit("Clockwork", 3);

        assert_eq!(storage.withdraw("Clockwork", 2), 2);
        assert_eq!(storage.withdraw("Clockwork", 5), 1);
        assert_eq!(storage.withdraw("Clockwork", 1), 0);
        assert!(storage.is_empty());
    }

    #[test]
    fn from_iterator_collects_deposits() {
        let storage: MaterialStorage = [("Keramos", 3), ("Keramos", 4), ("Goldrune", 0)]
            .into_iter()
            .collect();

        assert_eq!(storage.owned("Keramos"), 7);
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn deserialized_zero_quantities_are_dropped() {
        let storage: MaterialStorage =
            toml::from_str("[materials]\nGoldrune = 0\nKeramos = 3\n").expect("parse");

        assert_eq!(storage.len(), 1);
        assert_eq!(storage.iter().collect::<Vec<_>>(), vec![("Keramos", 3)]);
    }

    #[test]
    fn empty_storage_file_deserializes() {
        let storage: MaterialStorage = serde_json::from_str("{}").expect("parse");
        assert!(storage.is_empty());
    }

    #[test]
    fn btreemap_is_a_material_source() {
        let mut owned = BTreeMap::new();
        owned.insert("Keramos".to_string(), 9);

        assert_eq!(MaterialSource::owned(&owned, "Keramos"), 9);
        assert_eq!(MaterialSource::owned(&owned, "Goldrune"), 0);
    }
}
