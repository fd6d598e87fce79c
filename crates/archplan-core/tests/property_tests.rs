//! # Property-Based Tests
//!
//! Determinism and correctness invariants of the goal engine, using proptest.

use archplan_core::{Goal, KnowledgeBase, MaterialSource, MaterialStorage};
use archplan_core::collation::compare_names;
use proptest::collection::{btree_map, vec};
use proptest::prelude::*;
use std::cmp::Ordering;
use std::collections::BTreeMap;

const MATERIALS: [&str; 8] = [
    "Clockwork",
    "Éclat",
    "Everlight silvthril",
    "Goldrune",
    "keramos",
    "Keramos",
    "Leather scraps",
    "White marble",
];

/// Names mixing case and accents over a few shared base letters.
const NAMES: [&str; 10] = [
    "eclat", "Eclat", "éclat", "Éclat", "e\u{301}clat", "Fire", "fire", "Ötzi", "otzi", "Zephyr",
];

/// Bills for up to six artefacts, each drawing on the fixed material pool.
fn bills() -> impl Strategy<Value = Vec<BTreeMap<usize, u64>>> {
    vec(btree_map(0usize..MATERIALS.len(), 1u64..100, 1..5), 1..6)
}

fn build_knowledge_base(bills: &[BTreeMap<usize, u64>]) -> KnowledgeBase {
    let mut kb = KnowledgeBase::new();
    for (index, bill) in bills.iter().enumerate() {
        kb.add_artefact(
            format!("Artefact {index}"),
            bill.iter().map(|(material, quantity)| (MATERIALS[*material], *quantity)),
        )
        .expect("artefact");
    }
    kb
}

fn build_goal(requests: &[usize], artefact_count: usize) -> Goal {
    let mut goal = Goal::new();
    for request in requests {
        goal.add_artefact(format!("Artefact {}", request % artefact_count));
    }
    goal
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Reports are sorted by quantity, then by name, and hold only positive totals.
    #[test]
    fn report_is_sorted_and_positive(
        bills in bills(),
        requests in vec(0usize..6, 0..20),
    ) {
        let kb = build_knowledge_base(&bills);
        let goal = build_goal(&requests, bills.len());

        let needed = goal.materials_needed(&kb, None).expect("needed");

        prop_assert!(needed.iter().all(|entry| entry.quantity > 0));
        for pair in needed.windows(2) {
            let order = pair[0]
                .quantity
                .cmp(&pair[1].quantity)
                .then_with(|| compare_names(&pair[0].material, &pair[1].material));
            prop_assert_eq!(order, Ordering::Less);
        }
    }

    /// Same goal, same registry, same report.
    #[test]
    fn materials_needed_deterministic(
        bills in bills(),
        requests in vec(0usize..6, 1..20),
    ) {
        let kb = build_knowledge_base(&bills);
        let goal = build_goal(&requests, bills.len());

        let first = goal.materials_needed(&kb, None).expect("first");
        let second = goal.materials_needed(&kb, None).expect("second");

        prop_assert_eq!(first, second);
    }

    /// Requesting every artefact k times multiplies every total by k.
    #[test]
    fn totals_scale_linearly(
        bills in bills(),
        times in 1u64..10,
    ) {
        let kb = build_knowledge_base(&bills);

        let mut once = Goal::new();
        let mut scaled = Goal::new();
        for index in 0..bills.len() {
            once.add_artefact(format!("Artefact {index}"));
            scaled.add_artefacts(format!("Artefact {index}"), times);
        }

        let base: BTreeMap<String, u64> = once
            .materials_needed(&kb, None)
            .expect("once")
            .into_iter()
            .map(|entry| (entry.material, entry.quantity))
            .collect();
        let multiplied = scaled.materials_needed(&kb, None).expect("scaled");

        prop_assert_eq!(multiplied.len(), base.len());
        for entry in multiplied {
            prop_assert_eq!(entry.quantity, base[&entry.material] * times);
        }
    }

    /// Storage offset equals max(needed - owned, 0) per material and never mutates storage.
    #[test]
    fn storage_offset_clamps_per_material(
        bills in bills(),
        requests in vec(0usize..6, 1..20),
        owned in btree_map(0usize..MATERIALS.len(), 0u64..400, 0..6),
    ) {
        let kb = build_knowledge_base(&bills);
        let goal = build_goal(&requests, bills.len());
        let storage: MaterialStorage = owned
            .iter()
            .map(|(material, quantity)| (MATERIALS[*material], *quantity))
            .collect();
        let snapshot = storage.clone();

        let gross: BTreeMap<String, u64> = goal
            .materials_needed(&kb, None)
            .expect("gross")
            .into_iter()
            .map(|entry| (entry.material, entry.quantity))
            .collect();
        let net: BTreeMap<String, u64> = goal
            .materials_needed(&kb, Some(&storage))
            .expect("net")
            .into_iter()
            .map(|entry| (entry.material, entry.quantity))
            .collect();

        for (material, total) in &gross {
            let expected = total.saturating_sub(storage.owned(material));
            prop_assert_eq!(net.get(material).copied().unwrap_or(0), expected);
        }
        prop_assert!(net.keys().all(|material| gross.contains_key(material)));
        prop_assert_eq!(storage, snapshot);
    }

    /// compare_names is a total order: antisymmetric, transitive, and
    /// equal only for identical strings.
    #[test]
    fn compare_names_is_total_order(
        a in 0usize..NAMES.len(),
        b in 0usize..NAMES.len(),
        c in 0usize..NAMES.len(),
    ) {
        let (a, b, c) = (NAMES[a], NAMES[b], NAMES[c]);

        prop_assert_eq!(compare_names(a, b), compare_names(b, a).reverse());
        prop_assert_eq!(compare_names(a, b) == Ordering::Equal, a == b);
        if compare_names(a, b) != Ordering::Greater && compare_names(b, c) != Ordering::Greater {
            prop_assert_ne!(compare_names(a, c), Ordering::Greater);
        }
    }

    /// Names with different base letters order by base letter alone,
    /// whatever their accents or case.
    #[test]
    fn base_letters_decide_first(a in 0usize..NAMES.len(), b in 0usize..NAMES.len()) {
        let (a, b) = (NAMES[a], NAMES[b]);
        let base = |name: &str| name.chars().next().map(|c| match c {
            'é' | 'É' | 'E' => 'e',
            'Ö' => 'o',
            other => other.to_ascii_lowercase(),
        });

        if base(a) != base(b) {
            prop_assert_eq!(compare_names(a, b), base(a).cmp(&base(b)));
        }
    }

    /// Re-registering a material any number of times keeps one entry.
    #[test]
    fn material_registration_idempotent(repeats in 1usize..20) {
        let mut kb = KnowledgeBase::new();
        for _ in 0..repeats {
            kb.add_material("Keramos").expect("add");
        }
        prop_assert_eq!(kb.material_count(), 1);
    }
}
