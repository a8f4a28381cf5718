//! # MedVoice Core
//!
//! Core logic for turning a spoken symptom description into a prescription:
//! - [`matcher`]: picks the first catalog condition the text describes
//! - [`prescription`]: assembles the prescription record and attaches advice
//! - [`render`], [`pdf`] and [`share`]: plain text, Markdown, JSON, PDF and share links
//! - [`speech`]: the capability seam speech recognisers plug into
//!
//! Matching and assembly are pure and hold no state between calls, so a
//! [`PrescriptionService`] can be shared freely.
//!
//! **No front-end concerns**: argument parsing, logging setup and where documents end up belong
//! to `medvoice-cli`.

pub mod config;
pub mod constants;
pub mod error;
pub mod matcher;
pub mod pdf;
pub mod prescription;
pub mod render;
pub mod share;
pub mod speech;

pub use config::CoreConfig;
pub use error::{CoreError, CoreResult};
pub use matcher::{match_symptoms, MatchResult};
pub use medvoice_catalog::{AdvisoryRecord, Catalog, ConditionRecord, MedicineEntry};
pub use medvoice_types::NonEmptyText;
pub use prescription::{Consultation, Prescription};
pub use render::DocumentFormat;
pub use share::ShareTarget;

use chrono::NaiveDate;

/// Matching and prescription operations over one catalog.
#[derive(Clone, Debug)]
pub struct PrescriptionService<'a> {
    catalog: &'a Catalog,
    config: CoreConfig,
}

impl<'a> PrescriptionService<'a> {
    pub fn new(catalog: &'a Catalog, config: CoreConfig) -> Self {
        Self { catalog, config }
    }

    /// Reject transcripts with nothing to match.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyTranscript`] for empty or whitespace-only input.
    pub fn accept_transcript(raw: &str) -> CoreResult<NonEmptyText> {
        NonEmptyText::new(raw).map_err(|_| {
            tracing::warn!("rejected empty transcript");
            CoreError::EmptyTranscript
        })
    }

    /// Run the matcher against this service's catalog.
    pub fn match_text(&self, free_text: &str) -> Option<MatchResult<'a>> {
        match_symptoms(self.catalog.conditions(), free_text)
    }

    /// Match `transcript` and, on success, build the prescription dated `today` with its advice.
    ///
    /// `None` means no condition in the catalog fits the text.
    pub fn consult(&self, transcript: &NonEmptyText, today: NaiveDate) -> Option<Consultation<'a>> {
        let Some(matched) = self.match_text(transcript.as_str()) else {
            tracing::info!("no matching condition found");
            return None;
        };

        let prescription = prescription::assemble(&matched, today, self.config.issued_by());
        tracing::info!(
            condition = %prescription.condition_name,
            symptoms = prescription.matched_symptoms.len(),
            medicines = prescription.medicines.len(),
            "prescription generated"
        );

        Some(prescription::with_advisory(self.catalog, prescription))
    }

    /// Advice for a condition named exactly as in the catalog.
    ///
    /// `Ok(None)` means the condition exists but has no advice.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownCondition`] if no condition has that name.
    pub fn tips(&self, condition_name: &str) -> CoreResult<Option<&'a AdvisoryRecord>> {
        if !self.catalog.conditions().contains(condition_name) {
            return Err(CoreError::UnknownCondition(condition_name.to_owned()));
        }
        Ok(self.catalog.advisory_for(condition_name))
    }

    /// Conditions in the order the matcher tries them.
    pub fn conditions(&self) -> impl Iterator<Item = &'a ConditionRecord> {
        self.catalog.conditions().iter()
    }
}
