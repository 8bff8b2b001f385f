//! Attribution Matcher: decides whether a free-text "action taken" report
//! counts as a performance of a normalized step.

/// Bidirectional, case-sensitive substring containment. Both sides are
/// expected to be pre-trimmed by the caller. Deliberately loose: no
/// tokenization, no punctuation normalization beyond what the Step
/// Normalizer already did.
pub fn step_matches(action: &str, step: &str) -> bool {
    step.contains(action) || action.contains(step)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_in_either_direction() {
        assert!(step_matches("Restart motor", "Restart motor and wait"));
        assert!(step_matches("Restart motor and wait", "Restart motor"));
        assert!(step_matches("Restart motor", "Restart motor"));
    }

    #[test]
    fn is_case_sensitive() {
        assert!(!step_matches("restart motor", "Restart motor"));
    }

    #[test]
    fn rejects_unrelated_text() {
        assert!(!step_matches("Replaced fuse", "Check belt"));
    }
}
