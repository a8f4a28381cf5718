//! PDF prescription: the downloadable document.
//!
//! Same layout as the Markdown rendering, drawn with the built-in Helvetica faces on A4 pages.
//! Long symptom lists, medicine notes and tips wrap and flow onto further pages.

use crate::constants::{ADVISORY_DISCLAIMER, ISSUER_TITLE};
use crate::prescription::Consultation;
use crate::render::{format_date, medicine_line, single_line};
use crate::{CoreError, CoreResult};
use medvoice_catalog::AdvisoryRecord;
use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};
use std::io::BufWriter;

const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);
const LAYER_NAME: &str = "Layer 1";
const TOP_MM: f32 = 280.0;
const BOTTOM_MM: f32 = 20.0;
const MARGIN: Mm = Mm(20.0);
const INDENT: Mm = Mm(25.0);
const NOTE_INDENT: Mm = Mm(30.0);
const WRAP_CHARS: usize = 85;

const TITLE: &str = "Medical Prescription";

/// Render `consultation` as PDF bytes.
///
/// # Errors
///
/// Returns [`CoreError::Pdf`] if a font cannot be registered or the document cannot be saved.
pub fn render_pdf(consultation: &Consultation<'_>) -> CoreResult<Vec<u8>> {
    let prescription = &consultation.prescription;
    let mut page = PageWriter::new(TITLE)?;

    page.line(TITLE, 18.0, MARGIN, true);
    page.gap(4.0);

    page.line(
        &format!("Doctor: {} ({ISSUER_TITLE})", single_line(&prescription.issued_by)),
        10.0,
        MARGIN,
        false,
    );
    page.line(
        &format!("Date: {}", format_date(prescription.generated_at)),
        10.0,
        MARGIN,
        false,
    );
    page.line(
        &format!("Diagnosis: {}", prescription.condition_name),
        10.0,
        MARGIN,
        true,
    );

    page.heading("Symptoms");
    for symptom in &prescription.matched_symptoms {
        page.paragraph(&format!("- {}", single_line(symptom)), 10.0, INDENT);
    }

    page.heading("Prescribed Medicines");
    for (index, medicine) in prescription.medicines.iter().enumerate() {
        let line = medicine_line(medicine, |s| s.to_owned());
        page.paragraph(&format!("{}. {line}", index + 1), 10.0, INDENT);
        if let Some(notes) = &medicine.notes {
            page.paragraph(&format!("Note: {notes}"), 9.0, NOTE_INDENT);
        }
    }

    if let Some(advisory) = consultation.advisory {
        write_advisory(&mut page, advisory);
    }

    let bytes = page.finish()?;
    tracing::debug!(bytes = bytes.len(), "rendered prescription PDF");
    Ok(bytes)
}

fn write_advisory(page: &mut PageWriter, advisory: &AdvisoryRecord) {
    page.heading("Health Tips & Recommendations");

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
        page.gap(2.0);
        page.line(title, 11.0, MARGIN, true);
        for item in items {
            page.paragraph(&format!("- {item}"), 9.0, INDENT);
        }
    }

    page.gap(4.0);
    page.paragraph(ADVISORY_DISCLAIMER, 8.0, MARGIN);
}

/// Cursor over a growing document; starts a new page when the current one is full.
struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
}

impl PageWriter {
    fn new(title: &str) -> CoreResult<Self> {
        let (doc, page, layer) = PdfDocument::new(title, PAGE_WIDTH, PAGE_HEIGHT, LAYER_NAME);
        let layer = doc.get_page(page).get_layer(layer);
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| CoreError::Pdf(format!("font error: {e}")))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| CoreError::Pdf(format!("font error: {e}")))?;

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: TOP_MM,
        })
    }

    fn heading(&mut self, text: &str) {
        self.gap(6.0);
        self.line(text, 12.0, MARGIN, true);
        self.gap(1.0);
    }

    fn paragraph(&mut self, text: &str, size: f32, x: Mm) {
        for line in wrap_text(text, WRAP_CHARS) {
            self.line(&line, size, x, false);
        }
    }

    fn line(&mut self, text: &str, size: f32, x: Mm, bold: bool) {
        let height = line_height(size);
        if self.y - height < BOTTOM_MM {
            self.new_page();
        }

        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(text, size, x, Mm(self.y), font);
        self.y -= height;
    }

    fn gap(&mut self, mm: f32) {
        self.y -= mm;
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(PAGE_WIDTH, PAGE_HEIGHT, LAYER_NAME);
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = TOP_MM;
    }

    fn finish(self) -> CoreResult<Vec<u8>> {
        let mut buf = BufWriter::new(Vec::new());
        self.doc
            .save(&mut buf)
            .map_err(|e| CoreError::Pdf(format!("save error: {e}")))?;
        buf.into_inner()
            .map_err(|e| CoreError::Pdf(format!("buffer error: {e}")))
    }
}

/// Baseline-to-baseline distance for a font size in points, in millimetres.
fn line_height(size: f32) -> f32 {
    size * 0.5
}

/// Greedy word wrap on character counts. Never returns an empty list.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut width = 0;

    for word in text.split_whitespace() {
        let word_width = word.chars().count();
        if !current.is_empty() && width + 1 + word_width > max_chars {
            lines.push(std::mem::take(&mut current));
            width = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            width += 1;
        }
        current.push_str(word);
        width += word_width;
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
