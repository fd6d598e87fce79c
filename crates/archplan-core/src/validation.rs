//! # Definition Validation
//!
//! Checks applied to reference data before it reaches the knowledge base.
//!
//! - Reject malformed definitions
//! - Never partially register: validation runs before any mutation
//! - Do not check cross references (a bill may name an unknown material)

use crate::primitives::{MAX_BILL_LENGTH, MAX_COLLECTION_SIZE, MAX_NAME_LENGTH};
use crate::{ArchplanError, MaterialQuantity};
use std::collections::BTreeSet;

/// Validate a material, artefact, or collection name.
///
/// A name is valid if it is non-empty, not only whitespace, and within
/// `MAX_NAME_LENGTH` bytes.
pub fn validate_name(name: &str) -> Result<(), ArchplanError> {
    if name.trim().is_empty() {
        return Err(ArchplanError::InvalidDefinition(
            "name must not be empty".to_string(),
        ));
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(ArchplanError::InvalidDefinition(format!(
            "name is {} bytes long, maximum is {}",
            name.len(),
            MAX_NAME_LENGTH
        )));
    }

    Ok(())
}

/// Validate an artefact's bill of materials.
///
/// Every material name must be valid, every quantity positive, and no
/// material may appear twice. An empty bill is allowed.
pub fn validate_bill(bill: &[MaterialQuantity]) -> Result<(), ArchplanError> {
    if bill.len() > MAX_BILL_LENGTH {
        return Err(ArchplanError::InvalidDefinition(format!(
            "bill lists {} materials, maximum is {}",
            bill.len(),
            MAX_BILL_LENGTH
        )));
    }

    let mut seen = BTreeSet::new();
    for entry in bill {
        validate_name(&entry.material)?;

        if entry.quantity == 0 {
            return Err(ArchplanError::InvalidDefinition(format!(
                "material '{}' has zero quantity",
                entry.material
            )));
        }

        if !seen.insert(entry.material.as_str()) {
            return Err(ArchplanError::InvalidDefinition(format!(
                "material '{}' is listed more than once",
                entry.material
            )));
        }
    }

    Ok(())
}

/// Validate the artefact names of a collection.
///
/// Names must be valid and unique within the collection.
pub fn validate_artefact_list(artefacts: &[String]) -> Result<(), ArchplanError> {
    if artefacts.len() > MAX_COLLECTION_SIZE {
        return Err(ArchplanError::InvalidDefinition(format!(
            "collection lists {} artefacts, maximum is {}",
            artefacts.len(),
            MAX_COLLECTION_SIZE
        )));
    }

    let mut seen = BTreeSet::new();
    for artefact in artefacts {
        validate_name(artefact)?;

        if !seen.insert(artefact.as_str()) {
            return Err(ArchplanError::InvalidDefinition(format!(
                "artefact '{}' is listed more than once",
                artefact
            )));
        }
    }

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_name_rejects_empty() {
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
    }

    #[test]
    fn validate_name_rejects_overlong() {
        let name = "x".repeat(MAX_NAME_LENGTH + 1);
        assert!(validate_name(&name).is_err());
        assert!(validate_name(&name[..MAX_NAME_LENGTH]).is_ok());
    }

    #[test]
    fn validate_bill_rejects_zero_quantity() {
        let bill = vec![MaterialQuantity::new("Keramos", 0)];
        assert!(matches!(
            validate_bill(&bill),
            Err(ArchplanError::InvalidDefinition(_))
        ));
    }

    #[test]
    fn validate_bill_rejects_repeated_material() {
        let bill = vec![
            MaterialQuantity::new("Keramos", 22),
            MaterialQuantity::new("Goldrune", 4),
            MaterialQuantity::new("Keramos", 1),
        ];
        assert!(validate_bill(&bill).is_err());
    }

    #[test]
    fn validate_bill_accepts_empty_and_valid() {
        assert!(validate_bill(&[]).is_ok());
        let bill = vec![
            MaterialQuantity::new("Everlight silvthril", 30),
            MaterialQuantity::new("Clockwork", 1),
        ];
        assert!(validate_bill(&bill).is_ok());
    }

    #[test]
    fn validate_artefact_list_rejects_duplicates() {
        let artefacts = vec!["Amphora".to_string(), "Amphora".to_string()];
        assert!(validate_artefact_list(&artefacts).is_err());
    }

    #[test]
    fn validate_artefact_list_rejects_oversized() {
        let artefacts: Vec<String> = (0..=MAX_COLLECTION_SIZE)
            .map(|i| format!("artefact {i}"))
            .collect();
        assert!(validate_artefact_list(&artefacts).is_err());
    }
}
