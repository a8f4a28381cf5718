//! Condition and advisory catalogs.
//!
//! This crate owns the static reference data the symptom matcher scans:
//! - the **condition catalog**: an ordered list of conditions, each with canonical symptom
//!   phrases and the medicines suggested for it
//! - the **advisory catalog**: diet, lifestyle and home-remedy guidance keyed by condition name
//!
//! Both are YAML documents compiled into the binary (see `data/`). They are parsed through strict
//! wire structs and validated in full before anything can match against them. A malformed
//! catalog is a startup failure, never a wrong answer at match time.
//!
//! The catalogs are read-only once loaded. Declaration order in `conditions.yaml` is significant:
//! the matcher picks the first condition that matches, so the file lists conditions from most to
//! least specific.

pub mod advisory;
pub mod catalog;
pub mod condition;

pub use advisory::{AdvisoryCatalog, AdvisoryRecord};
pub use catalog::Catalog;
pub use condition::{ConditionCatalog, ConditionRecord, MedicineEntry};

pub use medvoice_types::NonEmptyText;

use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Errors raised while loading or validating catalog data.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to read catalog file (path: {path}): {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("schema error: {0}")]
    Schema(String),

    #[error("duplicate condition name: {0}")]
    DuplicateCondition(String),

    #[error("duplicate advisory for condition: {0}")]
    DuplicateAdvisory(String),

    #[error("advisory references unknown condition: {0}")]
    UnknownCondition(String),
}

/// Type alias for Results that can fail with a [`CatalogError`].
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Deserialise a strict wire document, reporting the path of the first offending field.
pub(crate) fn parse_wire<T: DeserializeOwned>(yaml_text: &str, document: &str) -> CatalogResult<T> {
    let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

    serde_path_to_error::deserialize::<_, T>(deserializer).map_err(|err| {
        let path = err.path().to_string();
        let source = err.into_inner();
        let path = if path.is_empty() {
            "<root>"
        } else {
            path.as_str()
        };
        CatalogError::Schema(format!("{document} schema mismatch at {path}: {source}"))
    })
}
