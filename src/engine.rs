//! Probability Engine: per-step recommendation scores for an issue, derived
//! from the issue's own incident history.
//!
//! Scores are ephemeral and recomputed on every lookup. The probability is a
//! recall among this issue's history, not a calibrated statistic: one record
//! may match several steps against the same denominator, so values need not
//! sum to 100.

use crate::incident::{parse_block, split_blocks, ISSUE_LABEL};
use crate::matcher::step_matches;
use indexmap::IndexMap;

/// Derived score for one step; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct StepScore {
    pub match_count: usize,
    pub probability: f64,
}

/// Presentation band for a step score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    StronglyRecommended,
    Suggested,
    Reference,
    Untested,
}

impl Recommendation {
    /// Band a probability value. A prior above zero bands by magnitude and is
    /// never labeled untested; only a computed 0 is.
    pub fn from_probability(probability: f64) -> Self {
        if probability >= 80.0 {
            Recommendation::StronglyRecommended
        } else if probability >= 50.0 {
            Recommendation::Suggested
        } else if probability > 0.0 {
            Recommendation::Reference
        } else {
            Recommendation::Untested
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::StronglyRecommended => "strongly recommended",
            Recommendation::Suggested => "suggested",
            Recommendation::Reference => "reference",
            Recommendation::Untested => "untested/new",
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Score `steps` for `issue_title` against the full log text.
///
/// Records qualify when their raw block contains the issue-label marker and
/// `issue_title` as a literal substring anywhere in the block. This is a
/// block-wide containment join, not field equality: a title that is a
/// substring of another title over-matches, and a title rename orphans old
/// history. With no qualifying history every step keeps the uniform prior
/// `round(100 / steps.len(), 1)`; once any history exists the prior is
/// overwritten, so zero-match steps score 0.
pub fn score_steps(
    issue_title: &str,
    steps: &[String],
    log_text: &str,
) -> IndexMap<String, StepScore> {
    let mut scores: IndexMap<String, StepScore> = IndexMap::new();
    if steps.is_empty() {
        return scores;
    }

    let initial = round1(100.0 / steps.len() as f64);
    for step in steps {
        // duplicate normalized steps collapse here, keyed by text
        scores.entry(step.clone()).or_insert(StepScore {
            match_count: 0,
            probability: initial,
        });
    }

    if log_text.trim().is_empty() {
        return scores;
    }

    let hits: Vec<&str> = split_blocks(log_text)
        .filter(|block| block.contains(ISSUE_LABEL) && block.contains(issue_title))
        .collect();
    let total_hits = hits.len();
    if total_hits == 0 {
        return scores;
    }
    tracing::debug!(issue = issue_title, total_hits, "scoring against history");

    for block in hits {
        let Some(action) = parse_block(block).action else {
            continue;
        };
        let action = action.trim();
        if action.is_empty() {
            continue;
        }
        // one record may credit several steps, no exclusivity
        for (step, score) in scores.iter_mut() {
            if step_matches(action, step) {
                score.match_count += 1;
            }
        }
    }

    for score in scores.values_mut() {
        score.probability = round1(score.match_count as f64 / total_hits as f64 * 100.0);
    }
    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::incident::IncidentRecord;

    fn log_with(records: &[(&str, &str)]) -> String {
        records
            .iter()
            .map(|(issue, action)| {
                IncidentRecord {
                    timestamp: "2024-03-15 08:30:00".to_string(),
                    reporter_name: "Amy".to_string(),
                    reporter_id: "A1".to_string(),
                    issue: issue.to_string(),
                    action: action.to_string(),
                }
                .to_block()
            })
            .collect()
    }

    fn steps(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_steps_empty_map() {
        assert!(score_steps("Motor Fault", &[], "anything").is_empty());
    }

    #[test]
    fn empty_log_keeps_uniform_prior() {
        let scores = score_steps("Motor Fault", &steps(&["a", "b", "c"]), "");
        assert_eq!(scores.len(), 3);
        for score in scores.values() {
            assert_eq!(score.match_count, 0);
            assert_eq!(score.probability, 33.3);
        }
    }

    #[test]
    fn no_qualifying_history_keeps_prior() {
        let log = log_with(&[("Valve Leak", "Replaced gasket")]);
        let scores = score_steps("Motor Fault", &steps(&["a", "b"]), &log);
        for score in scores.values() {
            assert_eq!(score.probability, 50.0);
        }
    }

    #[test]
    fn motor_fault_scenario_scores_50_50_0() {
        let log = log_with(&[("Motor Fault", "Restart motor"), ("Motor Fault", "Check belt")]);
        let step_list = steps(&["Restart motor", "Check belt", "Replace sensor"]);
        let scores = score_steps("Motor Fault", &step_list, &log);

        assert_eq!(scores["Restart motor"].probability, 50.0);
        assert_eq!(scores["Check belt"].probability, 50.0);
        assert_eq!(scores["Replace sensor"].probability, 0.0);
        assert_eq!(scores["Restart motor"].match_count, 1);
        assert_eq!(scores["Replace sensor"].match_count, 0);
    }

    #[test]
    fn one_record_may_credit_multiple_steps() {
        let log = log_with(&[("Motor Fault", "Restart motor and Check belt")]);
        let scores = score_steps("Motor Fault", &steps(&["Restart motor", "Check belt"]), &log);
        assert_eq!(scores["Restart motor"].probability, 100.0);
        assert_eq!(scores["Check belt"].probability, 100.0);
    }

    #[test]
    fn duplicate_steps_collapse_to_one_entry() {
        let scores = score_steps("Motor Fault", &steps(&["a", "b", "a"]), "");
        assert_eq!(scores.len(), 2);
        // prior still computed over the full step list length
        assert_eq!(scores["a"].probability, 33.3);
    }

    #[test]
    fn insertion_order_is_display_order() {
        let scores = score_steps("Motor Fault", &steps(&["z", "a", "m"]), "");
        let keys: Vec<&String> = scores.keys().collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn title_containment_over_matches_by_design() {
        // "Motor Fault" is a substring of "Motor Fault A", so that record
        // counts toward the shorter title's total_hits too
        let log = log_with(&[("Motor Fault A", "Restart motor")]);
        let scores = score_steps("Motor Fault", &steps(&["Restart motor"]), &log);
        assert_eq!(scores["Restart motor"].match_count, 1);
        assert_eq!(scores["Restart motor"].probability, 100.0);
    }

    #[test]
    fn bands() {
        use Recommendation::*;
        assert_eq!(Recommendation::from_probability(95.0), StronglyRecommended);
        assert_eq!(Recommendation::from_probability(80.0), StronglyRecommended);
        assert_eq!(Recommendation::from_probability(79.9), Suggested);
        assert_eq!(Recommendation::from_probability(50.0), Suggested);
        assert_eq!(Recommendation::from_probability(33.3), Reference);
        assert_eq!(Recommendation::from_probability(0.0), Untested);
    }
}
