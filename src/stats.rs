//! Statistics view over the incident log.
//!
//! Works from fully-parseable records only; partial blocks are skipped here
//! (unlike the probability engine, which needs just issue and action).

use crate::incident::{parse_block, split_blocks};
use indexmap::IndexMap;

/// Aggregate for one issue title, exact field match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueStats {
    pub issue: String,
    pub incident_count: usize,
    /// Most frequently reported action; first-seen wins ties.
    pub top_action: Option<String>,
}

/// Per-issue incident counts and top actions, sorted descending by count.
/// Ties keep first-appearance order.
pub fn issue_stats(log_text: &str) -> Vec<IssueStats> {
    let mut per_issue: IndexMap<String, IndexMap<String, usize>> = IndexMap::new();
    for block in split_blocks(log_text) {
        let Some(record) = parse_block(block).into_record() else {
            continue;
        };
        *per_issue
            .entry(record.issue)
            .or_default()
            .entry(record.action)
            .or_insert(0) += 1;
    }

    let mut stats: Vec<IssueStats> = per_issue
        .into_iter()
        .map(|(issue, actions)| {
            let incident_count = actions.values().sum();
            let mut top: Option<(&String, usize)> = None;
            for (action, count) in &actions {
                if top.is_none_or(|(_, best)| *count > best) {
                    top = Some((action, *count));
                }
            }
            let top_action = top.map(|(action, _)| action.clone());
            IssueStats {
                issue,
                incident_count,
                top_action,
            }
        })
        .collect();
    stats.sort_by(|a, b| b.incident_count.cmp(&a.incident_count));
    stats
}
