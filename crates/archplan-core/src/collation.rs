//! # Collation
//!
//! Name ordering used throughout the planner.
//!
//! Two orderings exist:
//! - [`compare_names`]: locale-style ordering, used for artefact bills and
//!   report tie-breaks. Names compare level by level:
//!   1. base letters (canonical decomposition, combining marks dropped,
//!      case folded), so `"Éclat"` sorts next to `"Eclat"`
//!   2. accents: an unaccented letter before its accented forms
//!   3. case: lowercase before uppercase
//!   4. raw code points, so the ordering stays total
//! - Plain `str` ordering (code points). Used for collection artefact lists.

use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Compare two names the way a player-facing list would sort them.
///
/// `"clockwork"` sorts before `"Clockwork"`, `"amphora"` before `"Bronze"`,
/// and `"Éclat"` before `"Fire"`, where code points would disagree.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| accented_letters(a).cmp(accented_letters(b)))
        .then_with(|| case_marks(a).cmp(case_marks(b)))
        .then_with(|| a.cmp(b))
}

fn base_letters(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn accented_letters(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfd().flat_map(char::to_lowercase)
}

fn case_marks(name: &str) -> impl Iterator<Item = bool> + '_ {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(char::is_uppercase)
}

// =============================================================================
// TESTS
// =============================================================================
