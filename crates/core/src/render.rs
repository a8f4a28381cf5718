//! Rendering consultations for people and for other programs.
//!
//! Four formats share one fixed layout (identity, date, diagnosis, symptoms, medicines):
//! - plain text, used for clipboard copies and share-link bodies
//! - PDF, the downloadable document, which also carries the health tips (see [`crate::pdf`])
//! - Markdown, the same document in an editable form
//! - JSON, for tooling
//!
//! The fallback symptom is raw user text, so everything interpolated into Markdown goes through
//! [`escape_inline`].

use crate::constants::{ADVISORY_DISCLAIMER, DATE_DISPLAY_FORMAT, ISSUER_TITLE};
use crate::prescription::{Consultation, Prescription};
use crate::{CoreError, CoreResult};
use chrono::NaiveDate;
use medvoice_catalog::{AdvisoryRecord, MedicineEntry};
use std::fmt::Write as _;
use std::path::Path;

/// Output format for a rendered consultation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DocumentFormat {
    #[default]
    Text,
    Markdown,
    Json,
    Pdf,
}

impl DocumentFormat {
    /// Render `consultation` in this format.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Serialization`] if JSON encoding fails, or [`CoreError::Pdf`] if the
    /// PDF cannot be built.
    pub fn render(self, consultation: &Consultation<'_>) -> CoreResult<Vec<u8>> {
        match self {
            Self::Text => Ok(render_text(&consultation.prescription).into_bytes()),
            Self::Markdown => Ok(render_markdown(consultation).into_bytes()),
            Self::Json => {
                let mut json =
                    serde_json::to_vec_pretty(consultation).map_err(CoreError::Serialization)?;
                json.push(b'\n');
                Ok(json)
            }
            Self::Pdf => crate::pdf::render_pdf(consultation),
        }
    }

    /// Conventional file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Markdown => "md",
            Self::Json => "json",
            Self::Pdf => "pdf",
        }
    }

    /// Whether the output is unfit for a terminal.
    pub fn is_binary(self) -> bool {
        matches!(self, Self::Pdf)
    }

    /// File name used when the caller gives none, e.g. `prescription-2026-10-18.pdf`.
    pub fn default_file_name(self, prescription: &Prescription) -> String {
        format!(
            "prescription-{}.{}",
            prescription.generated_at.format("%Y-%m-%d"),
            self.extension()
        )
    }
}

/// Date as shown on a prescription, e.g. `10/18/2026`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_DISPLAY_FORMAT).to_string()
}

/// Plain-text prescription.
///
/// ```text
/// Doctor: Dr. AI Assistant (AI Healthcare Assistant)
/// Date: 10/18/2026
/// Diagnosis: Fever
///
/// Symptoms:
/// - headache
///
/// Prescribed Medicines:
/// 1. Paracetamol - 500mg every 6 hours
///    Note: Primary fever reducer
/// ```
pub fn render_text(prescription: &Prescription) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Doctor: {} ({ISSUER_TITLE})", prescription.issued_by);
    let _ = writeln!(out, "Date: {}", format_date(prescription.generated_at));
    let _ = writeln!(out, "Diagnosis: {}", prescription.condition_name);

    out.push_str("\nSymptoms:\n");
    for symptom in &prescription.matched_symptoms {
        let _ = writeln!(out, "- {}", single_line(symptom));
    }

    out.push_str("\nPrescribed Medicines:\n");
    for (index, medicine) in prescription.medicines.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", index + 1, medicine_line(medicine, |s| s.to_owned()));
        if let Some(notes) = &medicine.notes {
            let _ = writeln!(out, "   Note: {notes}");
        }
    }

    out
}

/// Markdown document: the prescription followed by health tips when available.
pub fn render_markdown(consultation: &Consultation<'_>) -> String {
    let prescription = &consultation.prescription;
    let mut out = String::from("# Medical Prescription\n\n");

    let _ = writeln!(
        out,
        "**Doctor:** {} ({ISSUER_TITLE})",
        escape_inline(&prescription.issued_by)
    );
    let _ = writeln!(out, "**Date:** {}", format_date(prescription.generated_at));
    let _ = writeln!(
        out,
        "**Diagnosis:** {}",
        escape_inline(&prescription.condition_name)
    );

    out.push_str("\n## Symptoms\n\n");
    for symptom in &prescription.matched_symptoms {
        let _ = writeln!(out, "- {}", escape_inline(symptom));
    }

    out.push_str("\n## Prescribed Medicines\n\n");
    for (index, medicine) in prescription.medicines.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", index + 1, medicine_line(medicine, escape_inline));
        if let Some(notes) = &medicine.notes {
            let _ = writeln!(out, "   _{}_", escape_inline(notes));
        }
    }

    if let Some(advisory) = consultation.advisory {
        render_advisory(&mut out, advisory);
    }

    out
}

/// Markdown health-tips section on its own, disclaimer included.
pub fn render_tips(advisory: &AdvisoryRecord) -> String {
    let mut out = String::new();
    render_advisory(&mut out, advisory);
    out.trim_start().to_owned()
}

fn render_advisory(out: &mut String, advisory: &AdvisoryRecord) {
    out.push_str("\n## Health Tips & Recommendations\n");

    let sections = [
        ("Recommended Diet", &advisory.diet_include),
        ("Foods to Avoid", &advisory.diet_avoid),
        ("Lifestyle Recommendations", &advisory.lifestyle),
        ("Natural Remedies", &advisory.home_remedies),
    ];

    for (title, items) in sections {
        if items.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n### {title}\n");
        for item in items {
            let _ = writeln!(out, "- {}", escape_inline(item));
        }
    }

    let _ = writeln!(out, "\n> {ADVISORY_DISCLAIMER}");
}

pub(crate) fn medicine_line(medicine: &MedicineEntry, escape: impl Fn(&str) -> String) -> String {
    let name = escape(medicine.name.as_str());
    if medicine.dosage.is_empty() {
        name
    } else {
        format!("{name} - {}", escape(&medicine.dosage))
    }
}

pub(crate) fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Escape text for use inside a single Markdown line.
///
/// Line breaks collapse to spaces and a leading list marker (`-`, `+`, `1.`, `1)`) is escaped,
/// so user text cannot start a heading, list or rule. Inline formatting characters are
/// backslash-escaped.
pub fn escape_inline(text: &str) -> String {
    let line = single_line(text);
    let marker = list_marker_position(&line);

    let mut escaped = String::with_capacity(line.len() + 1);
    for (index, ch) in line.char_indices() {
        if Some(index) == marker
            || matches!(ch, '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '#' | '|')
        {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Byte offset of the punctuation that would make `line` a list item or rule.
fn list_marker_position(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    match bytes.get(digits) {
        Some(b'-' | b'+') if digits == 0 => Some(0),
        Some(b'.' | b')') if digits > 0 && matches!(bytes.get(digits + 1), None | Some(b' ')) => {
            Some(digits)
        }
        _ => None,
    }
}

/// Write a rendered document to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`CoreError::FileWrite`] if the file cannot be written.
pub fn write_document(path: &Path, contents: &[u8]) -> CoreResult<()> {
    std::fs::write(path, contents).map_err(|source| CoreError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = contents.len(), "wrote prescription document");
    Ok(())
}
