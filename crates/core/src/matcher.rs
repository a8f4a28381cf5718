//! Symptom matching.
//!
//! Turns free text into the first catalog condition it plausibly describes. This is a substring
//! heuristic, not language understanding:
//!
//! 1. The input is lowercased.
//! 2. The first whitespace-separated word longer than three characters becomes the
//!    *significant word*.
//! 3. Conditions are scanned in catalog order. A symptom phrase matches if the input contains
//!    it, or if it contains the significant word. A condition matches if any symptom matches or
//!    the input contains the condition's name.
//! 4. The first matching condition wins.
//!
//! Rule 3's second clause lets a short distinctive word ("nausea") hit a longer phrase, and it
//! also produces false positives when an incidental word appears inside an unrelated phrase.
//! Both effects change which condition wins, so the rule is kept exactly as is.

use crate::constants::SIGNIFICANT_WORD_MIN_EXCLUSIVE;
use medvoice_catalog::{ConditionCatalog, ConditionRecord};

/// A condition selected by [`match_symptoms`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchResult<'a> {
    /// The winning catalog entry.
    pub condition: &'a ConditionRecord,

    /// Symptom phrases that matched, in catalog order. When the condition matched by name only,
    /// this holds the trimmed input instead, so it is never empty.
    pub matched_symptoms: Vec<String>,

    /// Whether the input mentioned the condition by name.
    pub name_matched: bool,
}

/// First word of `normalised` with more than three characters, or `""`.
pub fn significant_word(normalised: &str) -> &str {
    normalised
        .split_whitespace()
        .find(|word| word.chars().count() > SIGNIFICANT_WORD_MIN_EXCLUSIVE)
        .unwrap_or("")
}

/// Find the first condition in `conditions` that `free_text` matches.
///
/// Returns `None` when nothing matches, including for empty or whitespace-only input.
pub fn match_symptoms<'a>(
    conditions: &'a ConditionCatalog,
    free_text: &str,
) -> Option<MatchResult<'a>> {
    let normalised = free_text.to_lowercase();
    let keyword = significant_word(&normalised);

    for condition in conditions {
        let matching: Vec<String> = condition
            .symptoms
            .iter()
            .filter(|symptom| {
                let phrase = symptom.folded();
                // An empty keyword would be contained in every phrase.
                normalised.contains(&phrase) || (!keyword.is_empty() && phrase.contains(keyword))
            })
            .map(|symptom| symptom.to_string())
            .collect();

        let name_matched = normalised.contains(&condition.name.folded());

        if matching.is_empty() && !name_matched {
            continue;
        }

        tracing::debug!(
            condition = %condition.name,
            symptoms = matching.len(),
            name_matched,
            "symptom match"
        );

        let matched_symptoms = if matching.is_empty() {
            vec![free_text.trim().to_owned()]
        } else {
            matching
        };

        return Some(MatchResult {
            condition,
            matched_symptoms,
            name_matched,
        });
    }

    tracing::debug!(keyword, "no condition matched");
    None
}
