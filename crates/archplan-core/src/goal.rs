//! # Goal Engine
//!
//! Aggregates material demand across requested artefacts.
//!
//! A `Goal` is a multiset of artefact names. Names are resolved against a
//! `KnowledgeBase` only when a collection is added or when materials are
//! computed, so a goal may be built before the data it names is loaded.
//!
//! ## Shortfall report
//!
//! `materials_needed` returns `(material, quantity)` pairs:
//! - quantity = Σ per-unit cost × requested count, minus owned stock
//! - entries at or below zero are dropped
//! - sorted by quantity ascending, then by material name
//!
//! All arithmetic saturates. Resolution failures abort the whole
//! computation; no partial report is returned.

use crate::collation::compare_names;
use crate::storage::MaterialSource;
use crate::{ArchplanError, KnowledgeBase, MaterialQuantity};
use std::collections::BTreeMap;

/// A set of artefact restorations to achieve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Goal {
    /// Artefact name -> requested count (always >= 1).
    artefacts: BTreeMap<String, u64>,
}

impl Goal {
    /// Create an empty goal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request one more restoration of an artefact.
    ///
    /// The name is not resolved here.
    pub fn add_artefact(&mut self, name: impl Into<String>) -> &mut Self {
        self.add_artefacts(name, 1)
    }

    /// Request `count` more restorations of an artefact.
    ///
    /// A count of zero leaves the goal unchanged.
    pub fn add_artefacts(&mut self, name: impl Into<String>, count: u64) -> &mut Self {
        if count > 0 {
            let requested = self.artefacts.entry(name.into()).or_insert(0);
            *requested = requested.saturating_add(count);
        }
        self
    }

    /// Request one restoration of every artefact in a collection.
    ///
    /// Fails with `NotFound` if the collection is not registered; the goal is
    /// left unchanged in that case.
    pub fn add_collection(
        &mut self,
        knowledge: &KnowledgeBase,
        name: &str,
    ) -> Result<&mut Self, ArchplanError> {
        let collection = knowledge.require_collection(name)?;

        for artefact in collection.artefacts() {
            self.add_artefact(artefact.as_str());
        }
        Ok(self)
    }

    /// Requested restorations of one artefact (zero if not requested).
    #[must_use]
    pub fn requested(&self, name: &str) -> u64 {
        self.artefacts.get(name).copied().unwrap_or(0)
    }

    /// Iterate over `(artefact, requested count)` in name order.
    pub fn artefacts(&self) -> impl Iterator<Item = (&str, u64)> {
        self.artefacts
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
    }

    /// Total number of restorations requested across all artefacts.
    #[must_use]
    pub fn total_restorations(&self) -> u64 {
        self.artefacts
            .values()
            .fold(0u64, |total, count| total.saturating_add(*count))
    }

    /// Check whether nothing has been requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.artefacts.is_empty()
    }

    /// Compute the materials still required to achieve this goal.
    ///
    /// When `storage` is given, each total becomes `max(needed - owned, 0)`.
    /// The storage is only read. Fails with `NotFound` on the first artefact
    /// that is not registered.
    pub fn materials_needed(
        &self,
        knowledge: &KnowledgeBase,
        storage: Option<&dyn MaterialSource>,
    ) -> Result<Vec<MaterialQuantity>, ArchplanError> {
        let mut totals: BTreeMap<&str, u64> = BTreeMap::new();

        for (name, requested) in &self.artefacts {
            let artefact = knowledge.require_artefact(name)?;

            for entry in artefact.required_materials() {
                let total = totals.entry(entry.material.as_str()).or_insert(0);
                *total = total.saturating_add(entry.quantity.saturating_mul(*requested));
            }
        }

        let mut needed: Vec<MaterialQuantity> = totals
            .into_iter()
            .map(|(material, total)| {
                let owned = storage.map_or(0, |source| source.owned(material));
                MaterialQuantity::new(material, total.saturating_sub(owned))
            })
            .filter(|entry| entry.quantity > 0)
            .collect();

        needed.sort_by(|a, b| {
            a.quantity
                .cmp(&b.quantity)
                .then_with(|| compare_names(&a.material, &b.material))
        });

        Ok(needed)
    }
}

// =============================================================================
// TESTS
// =============================================================================
