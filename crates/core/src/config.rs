//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into
//! [`crate::PrescriptionService`].
//! Nothing in the matching or assembly path reads environment variables.

use crate::constants::DEFAULT_ISSUED_BY;
use crate::{CoreError, CoreResult};
use medvoice_catalog::Catalog;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    issued_by: String,
    catalog_dir: Option<PathBuf>,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] if `issued_by` is blank or `catalog_dir` is not a
    /// directory.
    pub fn new(issued_by: String, catalog_dir: Option<PathBuf>) -> CoreResult<Self> {
        let issued_by = issued_by.trim().to_owned();
        if issued_by.is_empty() {
            return Err(CoreError::InvalidInput("issued_by cannot be empty".into()));
        }

        if let Some(dir) = catalog_dir.as_deref() {
            if !dir.is_dir() {
                return Err(CoreError::InvalidInput(format!(
                    "catalog directory {} does not exist or is not a directory",
                    dir.display()
                )));
            }
        }

        Ok(Self {
            issued_by,
            catalog_dir,
        })
    }

    pub fn issued_by(&self) -> &str {
        &self.issued_by
    }

    pub fn catalog_dir(&self) -> Option<&Path> {
        self.catalog_dir.as_deref()
    }

    /// Load the catalog this configuration points at.
    ///
    /// Without a catalog directory this is the shared embedded catalog; with one, the files in
    /// that directory are loaded and validated.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Catalog`] if the catalog fails to load or validate.
    pub fn load_catalog(&self) -> CoreResult<Cow<'static, Catalog>> {
        match self.catalog_dir() {
            Some(dir) => Ok(Cow::Owned(Catalog::load_dir(dir)?)),
            None => Ok(Cow::Borrowed(Catalog::embedded()?)),
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            issued_by: DEFAULT_ISSUED_BY.to_owned(),
            catalog_dir: None,
        }
    }
}

/// Resolve the issuing identity from an optional raw value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_ISSUED_BY`].
pub fn issued_by_from_env_value(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_ISSUED_BY.to_owned())
}

/// Resolve the catalog override directory from an optional raw value.
///
/// Empty or whitespace values mean "use the embedded catalog".
pub fn catalog_dir_from_env_value(value: Option<String>) -> Option<PathBuf> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
