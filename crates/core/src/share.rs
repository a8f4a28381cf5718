//! Share links for a rendered prescription.
//!
//! Both targets carry the plain-text rendering, percent-encoded into the link.

use crate::constants::{EMAIL_SUBJECT_PREFIX, WHATSAPP_SHARE_URL};
use crate::prescription::Prescription;
use crate::render::render_text;
use urlencoding::encode;

/// Where a prescription can be shared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShareTarget {
    /// Messaging deep link.
    WhatsApp,
    /// `mailto:` compose link.
    Email,
}

impl ShareTarget {
    pub fn link(self, prescription: &Prescription) -> String {
        let body = render_text(prescription);
        match self {
            Self::WhatsApp => whatsapp_link(&body),
            Self::Email => email_link(&email_subject(prescription), &body),
        }
    }
}

/// `Medical Prescription - <condition>`.
pub fn email_subject(prescription: &Prescription) -> String {
    format!("{EMAIL_SUBJECT_PREFIX}{}", prescription.condition_name)
}

pub fn whatsapp_link(body: &str) -> String {
    format!("{WHATSAPP_SHARE_URL}?text={}", encode(body))
}

pub fn email_link(subject: &str, body: &str) -> String {
    format!("mailto:?subject={}&body={}", encode(subject), encode(body))
}
