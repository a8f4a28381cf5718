//! Advisory catalog: diet, lifestyle and home-remedy guidance per condition.
//!
//! An advisory is optional. A matched condition without one simply has no tips; callers get
//! `None` from [`AdvisoryCatalog::get`] and carry on.

use crate::{parse_wire, CatalogError, CatalogResult};
use medvoice_types::NonEmptyText;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Guidance shown alongside a prescription.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AdvisoryRecord {
    /// Name of the condition this advice belongs to.
    pub condition_name: NonEmptyText,
    pub diet_include: Vec<String>,
    pub diet_avoid: Vec<String>,
    pub lifestyle: Vec<String>,
    pub home_remedies: Vec<String>,
}

/// Advisory records indexed by condition name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdvisoryCatalog {
    records: Vec<AdvisoryRecord>,
    by_condition: HashMap<String, usize>,
}

impl AdvisoryCatalog {
    /// Index advisory records by condition name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateAdvisory`] if a condition has more than one record.
    pub fn new(records: Vec<AdvisoryRecord>) -> CatalogResult<Self> {
        let mut by_condition = HashMap::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            let key = record.condition_name.as_str().to_owned();
            if by_condition.insert(key, index).is_some() {
                return Err(CatalogError::DuplicateAdvisory(record.condition_name.to_string()));
            }
        }

        Ok(Self {
            records,
            by_condition,
        })
    }

    /// Parse and index an advisory catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Schema`] if the YAML does not match the wire schema, or
    /// [`CatalogError::DuplicateAdvisory`] for repeated conditions.
    pub fn parse(yaml_text: &str) -> CatalogResult<Self> {
        let wire: AdvisoryCatalogWire = parse_wire(yaml_text, "advisory catalog")?;
        Self::new(wire.advisories.into_iter().map(wire_to_domain).collect())
    }

    /// Advice for the named condition, if any was authored.
    pub fn get(&self, condition_name: &str) -> Option<&AdvisoryRecord> {
        self.by_condition
            .get(condition_name)
            .and_then(|&index| self.records.get(index))
    }

    /// Records in declared order.
    pub fn iter(&self) -> std::slice::Iter<'_, AdvisoryRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AdvisoryCatalogWire {
    advisories: Vec<AdvisoryWire>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AdvisoryWire {
    condition: NonEmptyText,
    #[serde(default)]
    diet: DietWire,
    #[serde(default)]
    lifestyle: Vec<String>,
    #[serde(default)]
    home_remedies: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DietWire {
    #[serde(default)]
    include: Vec<String>,
    #[serde(default)]
    avoid: Vec<String>,
}

fn wire_to_domain(wire: AdvisoryWire) -> AdvisoryRecord {
    AdvisoryRecord {
        condition_name: wire.condition,
        diet_include: wire.diet.include,
        diet_avoid: wire.diet.avoid,
        lifestyle: wire.lifestyle,
        home_remedies: wire.home_remedies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_indexes_by_condition() {
        let input = r#"advisories:
  - condition: "Fever"
    diet:
      include: ["Coconut water"]
      avoid: ["Spicy foods"]
    lifestyle: ["Complete bed rest"]
    home_remedies: ["Cool compress on forehead"]
"#;

        let catalog = AdvisoryCatalog::parse(input).expect("parse advisories");
        assert_eq!(catalog.len(), 1);

        let fever = catalog.get("Fever").expect("fever advice");
        assert_eq!(fever.diet_include, ["Coconut water"]);
        assert_eq!(fever.diet_avoid, ["Spicy foods"]);
        assert_eq!(fever.lifestyle, ["Complete bed rest"]);
        assert_eq!(fever.home_remedies, ["Cool compress on forehead"]);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let input = r#"advisories:
  - condition: "Cough"
    lifestyle: ["Avoid smoke"]
"#;

        let catalog = AdvisoryCatalog::parse(input).expect("parse advisories");
        let cough = catalog.get("Cough").expect("cough advice");
        assert!(cough.diet_include.is_empty());
        assert!(cough.diet_avoid.is_empty());
        assert!(cough.home_remedies.is_empty());
    }

    #[test]
    fn absent_condition_is_none_not_error() {
        let catalog = AdvisoryCatalog::default();
        assert!(catalog.get("Insomnia").is_none());
    }

    #[test]
    fn rejects_duplicate_advisories() {
        let input = r#"advisories:
  - condition: "Fever"
  - condition: "Fever"
"#;

        let err = AdvisoryCatalog::parse(input).expect_err("should reject duplicate");
        assert!(matches!(err, CatalogError::DuplicateAdvisory(name) if name == "Fever"));
    }

    #[test]
    fn strict_validation_rejects_unknown_diet_keys() {
        let input = r#"advisories:
  - condition: "Fever"
    diet:
      include: []
      maybe: ["Toast"]
"#;

        let err = AdvisoryCatalog::parse(input).expect_err("should reject unknown key");
        assert!(matches!(err, CatalogError::Schema(msg) if msg.contains("maybe")));
    }
}
