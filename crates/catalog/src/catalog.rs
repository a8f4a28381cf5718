//! The combined, cross-validated catalog and its process-wide embedded instance.

use crate::{AdvisoryCatalog, AdvisoryRecord, CatalogError, CatalogResult, ConditionCatalog};
use std::path::Path;
use std::sync::OnceLock;

/// File name of the condition catalog inside a catalog directory.
pub const CONDITIONS_FILE_NAME: &str = "conditions.yaml";

/// File name of the advisory catalog inside a catalog directory.
pub const ADVISORIES_FILE_NAME: &str = "advisories.yaml";

const EMBEDDED_CONDITIONS: &str = include_str!("../data/conditions.yaml");
const EMBEDDED_ADVISORIES: &str = include_str!("../data/advisories.yaml");

static EMBEDDED: OnceLock<Catalog> = OnceLock::new();

/// Conditions plus the advice attached to them.
///
/// Every advisory names a condition that exists; conditions without advice are allowed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    conditions: ConditionCatalog,
    advisories: AdvisoryCatalog,
}

impl Catalog {
    /// Pair a condition catalog with its advisories.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownCondition`] if an advisory names a condition that is not in
    /// `conditions`.
    pub fn new(conditions: ConditionCatalog, advisories: AdvisoryCatalog) -> CatalogResult<Self> {
        if let Some(orphan) = advisories
            .iter()
            .find(|a| !conditions.contains(a.condition_name.as_str()))
        {
            return Err(CatalogError::UnknownCondition(orphan.condition_name.to_string()));
        }

        Ok(Self {
            conditions,
            advisories,
        })
    }

    /// Parse both documents and cross-validate them.
    ///
    /// # Errors
    ///
    /// Any parse or validation error from either document.
    pub fn from_yaml(conditions_yaml: &str, advisories_yaml: &str) -> CatalogResult<Self> {
        let conditions = ConditionCatalog::parse(conditions_yaml)?;
        let advisories = AdvisoryCatalog::parse(advisories_yaml)?;
        Self::new(conditions, advisories)
    }

    /// Load `conditions.yaml` and `advisories.yaml` from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if either file cannot be read, otherwise the errors of
    /// [`Catalog::from_yaml`].
    pub fn load_dir(dir: &Path) -> CatalogResult<Self> {
        let read = |name: &str| {
            let path = dir.join(name);
            std::fs::read_to_string(&path).map_err(|source| CatalogError::Io { path, source })
        };

        let catalog = Self::from_yaml(&read(CONDITIONS_FILE_NAME)?, &read(ADVISORIES_FILE_NAME)?)?;
        tracing::info!(
            dir = %dir.display(),
            conditions = catalog.conditions.len(),
            advisories = catalog.advisories.len(),
            "loaded catalog from directory"
        );
        Ok(catalog)
    }

    /// The catalog compiled into the binary.
    ///
    /// Parsed and validated on first use, then shared for the rest of the process.
    ///
    /// # Errors
    ///
    /// Returns the validation error if the embedded data is malformed. Nothing is cached in that
    /// case, so every caller sees the failure.
    pub fn embedded() -> CatalogResult<&'static Catalog> {
        if let Some(catalog) = EMBEDDED.get() {
            return Ok(catalog);
        }

        let catalog = Self::from_yaml(EMBEDDED_CONDITIONS, EMBEDDED_ADVISORIES)?;
        tracing::info!(
            conditions = catalog.conditions.len(),
            advisories = catalog.advisories.len(),
            "loaded embedded catalog"
        );
        Ok(EMBEDDED.get_or_init(|| catalog))
    }

    pub fn conditions(&self) -> &ConditionCatalog {
        &self.conditions
    }

    pub fn advisories(&self) -> &AdvisoryCatalog {
        &self.advisories
    }

    /// Advice for a condition; `None` means "no tips available".
    pub fn advisory_for(&self, condition_name: &str) -> Option<&AdvisoryRecord> {
        self.advisories.get(condition_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONDITIONS: &str = r#"conditions:
  - name: "Fever"
    symptoms: ["chills"]
    medicines: [{ name: "Paracetamol", dosage: "500mg every 6 hours" }]
  - name: "Insomnia"
    symptoms: ["trouble sleeping"]
    medicines: [{ name: "Melatonin", dosage: "3mg" }]
"#;

    const ADVISORIES: &str = r#"advisories:
  - condition: "Fever"
    lifestyle: ["Complete bed rest"]
"#;

    #[test]
    fn embedded_catalog_loads_in_declared_order() {
        let catalog = Catalog::embedded().expect("embedded catalog should be valid");

        assert_eq!(catalog.conditions().len(), 20);
        assert_eq!(catalog.advisories().len(), 10);

        let names: Vec<&str> = catalog
            .conditions()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names.first().copied(), Some("Common Cold"));
        assert_eq!(names.get(1).copied(), Some("Fever"));
        assert_eq!(names.last().copied(), Some("Muscle Strain"));
    }

    #[test]
    fn embedded_catalog_is_shared() {
        let first = Catalog::embedded().expect("embedded catalog");
        let second = Catalog::embedded().expect("embedded catalog");
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn embedded_advisories_cover_a_subset_of_conditions() {
        let catalog = Catalog::embedded().expect("embedded catalog");
        assert!(catalog.advisory_for("Common Cold").is_some());
        assert!(catalog.advisory_for("Ear Pain").is_some());
        assert!(catalog.advisory_for("Insomnia").is_none());
    }

    #[test]
    fn embedded_catalog_keeps_empty_dosages() {
        let catalog = Catalog::embedded().expect("embedded catalog");
        let chest_pain = catalog
            .conditions()
            .get("Chest Pain")
            .expect("chest pain present");
        let last = chest_pain.medicines.last().expect("medicines present");
        assert_eq!(last.name.as_str(), "Seek immediate medical attention");
        assert!(last.dosage.is_empty());
    }

    #[test]
    fn rejects_advisory_for_unknown_condition() {
        let advisories = r#"advisories:
  - condition: "Gout"
"#;

        let err = Catalog::from_yaml(CONDITIONS, advisories).expect_err("should reject orphan");
        assert!(matches!(err, CatalogError::UnknownCondition(name) if name == "Gout"));
    }

    #[test]
    fn load_dir_reads_both_files() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(dir.path().join(CONDITIONS_FILE_NAME), CONDITIONS).expect("write");
        std::fs::write(dir.path().join(ADVISORIES_FILE_NAME), ADVISORIES).expect("write");

        let catalog = Catalog::load_dir(dir.path()).expect("load catalog dir");
        assert_eq!(catalog.conditions().len(), 2);
        assert!(catalog.advisory_for("Fever").is_some());
        assert!(catalog.advisory_for("Insomnia").is_none());
    }

    #[test]
    fn load_dir_reports_missing_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(dir.path().join(CONDITIONS_FILE_NAME), CONDITIONS).expect("write");

        let err = Catalog::load_dir(dir.path()).expect_err("advisories file missing");
        match err {
            CatalogError::Io { path, .. } => {
                assert!(path.ends_with(ADVISORIES_FILE_NAME));
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
