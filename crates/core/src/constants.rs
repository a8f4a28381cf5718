//! Constants used throughout the MedVoice core crate.
//!
//! Identity strings, link prefixes and environment variable names live here so the renderer,
//! the share-link builder and the CLI agree on them.

/// Identity printed on every prescription unless configured otherwise.
pub const DEFAULT_ISSUED_BY: &str = "Dr. AI Assistant";

/// Title shown under the issuing identity.
pub const ISSUER_TITLE: &str = "AI Healthcare Assistant";

/// A word must have more than this many characters to be picked as the significant word.
pub const SIGNIFICANT_WORD_MIN_EXCLUSIVE: usize = 3;

/// Subject prefix for emailed prescriptions; the condition name is appended.
pub const EMAIL_SUBJECT_PREFIX: &str = "Medical Prescription - ";

/// Messaging deep-link endpoint; the rendered prescription goes in the `text` query parameter.
pub const WHATSAPP_SHARE_URL: &str = "https://wa.me/";

/// Display format for prescription dates (en-US short date, e.g. `10/18/2026`).
pub const DATE_DISPLAY_FORMAT: &str = "%-m/%-d/%Y";

/// Closing note printed under health tips.
pub const ADVISORY_DISCLAIMER: &str = "These tips are general recommendations. Always consult \
with a qualified healthcare professional for personalized medical advice, especially if \
symptoms persist or worsen.";

/// Environment variable overriding [`DEFAULT_ISSUED_BY`].
pub const ISSUED_BY_ENV: &str = "MEDVOICE_ISSUED_BY";

/// Environment variable pointing at a directory with replacement catalog files.
pub const CATALOG_DIR_ENV: &str = "MEDVOICE_CATALOG_DIR";

/// Sample phrases offered to users who are unsure how to describe their symptoms.
pub const EXAMPLE_SYMPTOMS: &[&str] = &[
    "I have a fever and headache",
    "Give medicines for cold and cough",
    "I'm feeling nauseous and have stomach pain",
    "I have chest pain and difficulty breathing",
    "My throat is sore and I have a runny nose",
    "I have back pain and muscle aches",
    "I'm experiencing dizziness and fatigue",
    "I have joint pain and swelling",
    "My ear hurts",
    "I feel weak and tired",
    "I have a bad headache",
    "My stomach is upset",
    "I can't stop coughing",
    "I feel dizzy when I stand up",
    "My back is really painful",
    "I have a high fever",
    "I feel sick to my stomach",
    "My joints are stiff and sore",
];
