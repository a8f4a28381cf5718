//! Condition catalog: domain records, wire model and load-time validation.
//!
//! Responsibilities:
//! - Define the domain records the matcher scans ([`ConditionRecord`], [`MedicineEntry`])
//! - Define a strict wire model for `conditions.yaml`
//! - Reject duplicate or incomplete conditions before the catalog is handed out
//!
//! Notes:
//! - Order is preserved exactly as declared; it decides which condition wins a match
//! - Condition names are unique ignoring case, because matching ignores case

use crate::{parse_wire, CatalogError, CatalogResult};
use medvoice_types::NonEmptyText;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ============================================================================
// Public domain-level types
// ============================================================================

/// A single medicine suggestion attached to a condition.
///
/// `dosage` may be empty for advice-style entries such as "Seek immediate medical attention".
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MedicineEntry {
    pub name: NonEmptyText,
    pub dosage: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A condition the matcher can select.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConditionRecord {
    /// Display name, unique across the catalog.
    pub name: NonEmptyText,

    /// Canonical symptom phrases, in declared order.
    pub symptoms: Vec<NonEmptyText>,

    /// Suggested medicines, in declared order. Never empty.
    pub medicines: Vec<MedicineEntry>,
}

/// Ordered, validated list of conditions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConditionCatalog {
    conditions: Vec<ConditionRecord>,
}

impl ConditionCatalog {
    /// Build a catalog from records, keeping their order.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::DuplicateCondition`] if two records share a name (ignoring case)
    /// - [`CatalogError::InvalidInput`] if a record lists no medicines
    pub fn new(conditions: Vec<ConditionRecord>) -> CatalogResult<Self> {
        let mut seen = HashSet::with_capacity(conditions.len());

        for condition in &conditions {
            if !seen.insert(condition.name.folded()) {
                return Err(CatalogError::DuplicateCondition(condition.name.to_string()));
            }

            if condition.medicines.is_empty() {
                return Err(CatalogError::InvalidInput(format!(
                    "condition '{}' lists no medicines",
                    condition.name
                )));
            }
        }

        Ok(Self { conditions })
    }

    /// Parse and validate a condition catalog from YAML text.
    ///
    /// Empty names and empty symptom phrases are rejected while parsing; the error names the
    /// offending path (for example `conditions[4].medicines[2].name`).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Schema`] for structural problems and the errors of
    /// [`ConditionCatalog::new`] for semantic ones.
    pub fn parse(yaml_text: &str) -> CatalogResult<Self> {
        let wire: ConditionCatalogWire = parse_wire(yaml_text, "condition catalog")?;
        Self::new(wire.conditions.into_iter().map(wire_to_domain).collect())
    }

    /// Conditions in precedence order.
    pub fn iter(&self) -> std::slice::Iter<'_, ConditionRecord> {
        self.conditions.iter()
    }

    /// Look up a condition by its exact name.
    pub fn get(&self, name: &str) -> Option<&ConditionRecord> {
        self.conditions.iter().find(|c| c.name.as_str() == name)
    }

    /// Precedence rank of a condition (0 wins over everything).
    pub fn position(&self, name: &str) -> Option<usize> {
        self.conditions.iter().position(|c| c.name.as_str() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl<'a> IntoIterator for &'a ConditionCatalog {
    type Item = &'a ConditionRecord;
    type IntoIter = std::slice::Iter<'a, ConditionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConditionCatalogWire {
    conditions: Vec<ConditionWire>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConditionWire {
    name: NonEmptyText,
    symptoms: Vec<NonEmptyText>,
    medicines: Vec<MedicineWire>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MedicineWire {
    name: NonEmptyText,
    #[serde(default)]
    dosage: String,
    #[serde(default)]
    notes: Option<String>,
}

fn wire_to_domain(wire: ConditionWire) -> ConditionRecord {
    ConditionRecord {
        name: wire.name,
        symptoms: wire.symptoms,
        medicines: wire
            .medicines
            .into_iter()
            .map(|m| MedicineEntry {
                name: m.name,
                dosage: m.dosage.trim().to_owned(),
                notes: m
                    .notes
                    .map(|n| n.trim().to_owned())
                    .filter(|n| !n.is_empty()),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_CONDITIONS: &str = r#"conditions:
  - name: "Migraine"
    symptoms: ["throbbing headache", "aura"]
    medicines:
      - name: "Sumatriptan"
        dosage: "50mg as needed"
  - name: "Sprain"
    symptoms: ["swollen ankle"]
    medicines:
      - name: "Ice pack"
        dosage: "Apply for 15 minutes"
        notes: "First 48 hours"
      - name: "Rest"
"#;

    #[test]
    fn parses_records_in_declared_order() {
        let catalog = ConditionCatalog::parse(TWO_CONDITIONS).expect("parse catalog");

        let names: Vec<&str> = catalog.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Migraine", "Sprain"]);
        assert_eq!(catalog.position("Sprain"), Some(1));

        let sprain = catalog.get("Sprain").expect("sprain present");
        assert_eq!(sprain.medicines.len(), 2);
        assert_eq!(sprain.medicines[0].notes.as_deref(), Some("First 48 hours"));
        assert_eq!(sprain.medicines[1].dosage, "");
        assert_eq!(sprain.medicines[1].notes, None);
    }

    #[test]
    fn lookup_is_exact() {
        let catalog = ConditionCatalog::parse(TWO_CONDITIONS).expect("parse catalog");
        assert!(catalog.contains("Migraine"));
        assert!(!catalog.contains("migraine"));
        assert!(catalog.get("Flu").is_none());
    }

    #[test]
    fn rejects_duplicate_names_ignoring_case() {
        let input = r#"conditions:
  - name: "Fever"
    symptoms: ["chills"]
    medicines: [{ name: "Paracetamol", dosage: "500mg" }]
  - name: "FEVER"
    symptoms: ["sweating"]
    medicines: [{ name: "Ibuprofen", dosage: "400mg" }]
"#;

        let err = ConditionCatalog::parse(input).expect_err("should reject duplicate");
        assert!(matches!(err, CatalogError::DuplicateCondition(name) if name == "FEVER"));
    }

    #[test]
    fn rejects_empty_medicine_name_with_path() {
        let input = r#"conditions:
  - name: "Fever"
    symptoms: ["chills"]
    medicines:
      - name: "   "
        dosage: "500mg"
"#;

        let err = ConditionCatalog::parse(input).expect_err("should reject empty name");
        match err {
            CatalogError::Schema(msg) => {
                assert!(msg.contains("medicines"), "unexpected message: {msg}");
                assert!(msg.contains("cannot be empty"), "unexpected message: {msg}");
            }
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_symptom_phrase() {
        let input = r#"conditions:
  - name: "Fever"
    symptoms: ["chills", ""]
    medicines: [{ name: "Paracetamol", dosage: "500mg" }]
"#;

        let err = ConditionCatalog::parse(input).expect_err("should reject empty symptom");
        assert!(matches!(err, CatalogError::Schema(msg) if msg.contains("symptoms")));
    }

    #[test]
    fn rejects_condition_without_medicines() {
        let input = r#"conditions:
  - name: "Fever"
    symptoms: ["chills"]
    medicines: []
"#;

        let err = ConditionCatalog::parse(input).expect_err("should reject empty medicines");
        assert!(matches!(err, CatalogError::InvalidInput(msg) if msg.contains("Fever")));
    }

    #[test]
    fn strict_validation_rejects_unknown_keys() {
        let input = r#"conditions:
  - name: "Fever"
    symptoms: ["chills"]
    severity: high
    medicines: [{ name: "Paracetamol", dosage: "500mg" }]
"#;

        let err = ConditionCatalog::parse(input).expect_err("should reject unknown key");
        assert!(matches!(err, CatalogError::Schema(msg) if msg.contains("severity")));
    }

    #[test]
    fn blank_notes_are_dropped() {
        let input = r#"conditions:
  - name: "Fever"
    symptoms: ["chills"]
    medicines: [{ name: "Paracetamol", dosage: " 500mg ", notes: "  " }]
"#;

        let catalog = ConditionCatalog::parse(input).expect("parse catalog");
        let medicine = &catalog.iter().next().expect("one condition").medicines[0];
        assert_eq!(medicine.dosage, "500mg");
        assert_eq!(medicine.notes, None);
    }
}
