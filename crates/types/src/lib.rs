//! Validated vocabulary types shared by the MedVoice crates.
//!
//! Catalog names, medicine names and transcripts all share one rule: they must carry at least
//! one non-whitespace character. [`NonEmptyText`] encodes that rule once so the catalog loader,
//! the consultation service and the CLI cannot disagree about it.

use serde::{Deserialize, Serialize};

/// Errors that can occur when creating validated text types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    /// The input was empty or contained only whitespace.
    #[error("text cannot be empty")]
    Empty,
}

/// Trimmed text that is guaranteed to contain at least one non-whitespace character.
///
/// Serialises as a plain string. Deserialising runs the same check as [`NonEmptyText::new`],
/// so an empty value in a YAML or JSON document is rejected at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Trims `input` and wraps it, or returns [`TextError::Empty`] if nothing is left.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased copy used for case-insensitive comparison.
    pub fn folded(&self) -> String {
        self.0.to_lowercase()
    }
}

impl TryFrom<String> for NonEmptyText {
    type Error = TextError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for NonEmptyText {
    type Error = TextError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonEmptyText> for String {
    fn from(value: NonEmptyText) -> Self {
        value.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        let text = NonEmptyText::new("  Common Cold \n").expect("should accept text");
        assert_eq!(text.as_str(), "Common Cold");
    }

    #[test]
    fn rejects_empty_and_whitespace_only() {
        assert_eq!(NonEmptyText::new(""), Err(TextError::Empty));
        assert_eq!(NonEmptyText::new(" \t\n "), Err(TextError::Empty));
    }

    #[test]
    fn folded_lowercases_for_comparison() {
        let text = NonEmptyText::new("Urinary Tract Infection").expect("should accept text");
        assert_eq!(text.folded(), "urinary tract infection");
        assert_eq!(text.as_str(), "Urinary Tract Infection");
    }

    #[test]
    fn deserialising_applies_the_same_check() {
        let ok: NonEmptyText = serde_json::from_str("\" Fever \"").expect("should parse");
        assert_eq!(ok.as_str(), "Fever");

        let err = serde_json::from_str::<NonEmptyText>("\"   \"").expect_err("should reject");
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn serialises_as_plain_string() {
        let text = NonEmptyText::new("Ibuprofen").expect("should accept text");
        let json = serde_json::to_string(&text).expect("should serialise");
        assert_eq!(json, "\"Ibuprofen\"");
    }
}
