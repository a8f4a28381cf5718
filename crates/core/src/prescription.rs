//! Prescription assembly.
//!
//! A [`Prescription`] is built fresh from each successful match. The date is supplied by the
//! caller so assembly never reads a clock.

use crate::matcher::MatchResult;
use chrono::NaiveDate;
use medvoice_catalog::{AdvisoryRecord, Catalog, MedicineEntry};
use serde::Serialize;

/// The structured record handed to the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Prescription {
    pub condition_name: String,

    /// Never empty; see [`MatchResult::matched_symptoms`].
    pub matched_symptoms: Vec<String>,

    pub medicines: Vec<MedicineEntry>,

    pub generated_at: NaiveDate,

    pub issued_by: String,
}

/// A prescription plus the advice for its condition, if the catalog has any.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Consultation<'a> {
    pub prescription: Prescription,
    pub advisory: Option<&'a AdvisoryRecord>,
}

/// Build a prescription from a match.
pub fn assemble(matched: &MatchResult<'_>, now: NaiveDate, issued_by: &str) -> Prescription {
    Prescription {
        condition_name: matched.condition.name.to_string(),
        matched_symptoms: matched.matched_symptoms.clone(),
        medicines: matched.condition.medicines.clone(),
        generated_at: now,
        issued_by: issued_by.to_owned(),
    }
}

/// Pair a prescription with its advisory.
///
/// A condition without advice yields `advisory: None`; that is not an error.
pub fn with_advisory(catalog: &Catalog, prescription: Prescription) -> Consultation<'_> {
    let advisory = catalog.advisory_for(&prescription.condition_name);
    if advisory.is_none() {
        tracing::debug!(condition = %prescription.condition_name, "no advisory for condition");
    }

    Consultation {
        prescription,
        advisory,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_ISSUED_BY;
    use crate::matcher::match_symptoms;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn assembles_fever_prescription_with_injected_date() {
        let catalog = Catalog::embedded().expect("embedded catalog");
        let matched =
            match_symptoms(catalog.conditions(), "I have a fever and headache").expect("match");

        let prescription = assemble(&matched, date(2026, 10, 18), DEFAULT_ISSUED_BY);

        assert_eq!(prescription.condition_name, "Fever");
        assert_eq!(prescription.matched_symptoms, ["headache"]);
        assert_eq!(prescription.issued_by, "Dr. AI Assistant");
        assert_eq!(prescription.generated_at, date(2026, 10, 18));
        assert_eq!(prescription.medicines.len(), 3);
        assert_eq!(prescription.medicines[0].name.as_str(), "Paracetamol");
    }

    #[test]
    fn attaches_advisory_when_present() {
        let catalog = Catalog::embedded().expect("embedded catalog");
        let matched = match_symptoms(catalog.conditions(), "I have a high fever").expect("match");
        let consultation =
            with_advisory(catalog, assemble(&matched, date(2026, 1, 2), DEFAULT_ISSUED_BY));

        let advisory = consultation.advisory.expect("fever has advice");
        assert_eq!(advisory.condition_name.as_str(), "Fever");
        assert!(!advisory.lifestyle.is_empty());
    }

    #[test]
    fn missing_advisory_is_none() {
        let catalog = Catalog::embedded().expect("embedded catalog");
        let matched =
            match_symptoms(catalog.conditions(), "trouble sleeping lately").expect("match");
        assert_eq!(matched.condition.name.as_str(), "Insomnia");

        let consultation =
            with_advisory(catalog, assemble(&matched, date(2026, 1, 2), DEFAULT_ISSUED_BY));
        assert!(consultation.advisory.is_none());
        assert_eq!(consultation.prescription.condition_name, "Insomnia");
    }

    #[test]
    fn serialises_date_as_iso() {
        let catalog = Catalog::embedded().expect("embedded catalog");
        let matched = match_symptoms(catalog.conditions(), "I have an earache").expect("match");
        let prescription = assemble(&matched, date(2026, 3, 9), "Dr. Test");

        let json = serde_json::to_value(&prescription).expect("serialise");
        assert_eq!(json["generated_at"], "2026-03-09");
        assert_eq!(json["issued_by"], "Dr. Test");
    }
}
