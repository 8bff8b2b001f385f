//! Step Normalizer: splits a handbook entry's free-text solution field into
//! discrete remediation steps.
//!
//! Solution text is human-edited and mixes delimiter styles freely: full-width
//! `；`, half-width `;`, and plain newlines, with or without leading ordinal
//! markers ("1. ", "2) "). All three styles normalize to the same step list.

use once_cell::sync::Lazy;
use regex::Regex;

/// Leading ordinal marker: one or more digits, optionally followed by a `.`
/// or `)` separator, plus any whitespace after it.
static ORDINAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+[.)]?\s*").unwrap()
});

/// Split `solution` into ordered, non-empty normalized steps.
///
/// Order of appearance is preserved and duplicates are kept; downstream
/// scoring keys by step text and collapses repeats.
pub fn normalize_steps(solution: &str) -> Vec<String> {
    solution
        .replace(['；', '\n', '\r'], ";")
        .split(';')
        .filter_map(|fragment| {
            let fragment = fragment.trim();
            if fragment.is_empty() {
                return None;
            }
            let step = ORDINAL.replace(fragment, "").trim().to_string();
            if step.is_empty() { None } else { Some(step) }
        })
        .collect()
}
