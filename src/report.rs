//! Report Writer: appends an incident record to the log and optionally folds
//! the action back into the matched handbook entry's solution.

use crate::error::{Result, WardenError};
use crate::handbook::Handbook;
use crate::incident::IncidentRecord;
use crate::logstore::LogStore;
use crate::session::Session;
use crate::steps::normalize_steps;

/// What the write produced. The handbook rewrite and the log append fail
/// independently; each soft failure lands here instead of aborting the other.
#[derive(Debug)]
pub struct ReportOutcome {
    pub record: IncidentRecord,
    pub handbook_error: Option<WardenError>,
    pub log_error: Option<WardenError>,
}

impl ReportOutcome {
    pub fn is_clean(&self) -> bool {
        self.handbook_error.is_none() && self.log_error.is_none()
    }
}

/// File a report for `issue_title`.
///
/// Empty-after-trim action text is a validation failure: rejected before any
/// write, no partial state change. When `append_to_handbook` is set, the
/// entry's solution is rewritten as a renumbered step list with the new
/// action appended, and the handbook is persisted (backup copy first); the
/// log append that follows runs regardless of how that went.
pub fn file_report(
    handbook: &mut Handbook,
    log: &LogStore,
    issue_title: &str,
    action_text: &str,
    session: &Session,
    append_to_handbook: bool,
) -> Result<ReportOutcome> {
    let action = action_text.trim();
    if action.is_empty() {
        return Err(WardenError::validation(
            "action text must not be empty",
        ));
    }

    let mut handbook_error = None;
    if append_to_handbook {
        let updated = match handbook.entry_mut(issue_title) {
            Some(entry) => {
                let mut steps = normalize_steps(&entry.solution);
                steps.push(action.to_string());
                entry.solution = renumbered_solution(&steps);
                true
            }
            None => {
                handbook_error = Some(WardenError::validation(format!(
                    "no handbook entry titled '{issue_title}'"
                )));
                false
            }
        };
        if updated {
            if let Err(err) = handbook.save() {
                tracing::warn!("Handbook update failed: {}", err);
                handbook_error = Some(err);
            }
        }
    }

    let record = IncidentRecord {
        timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        reporter_name: session.display_name.clone(),
        reporter_id: session.worker_id.clone(),
        issue: issue_title.to_string(),
        action: action.to_string(),
    };
    let log_error = match log.append(&record.to_block()) {
        Ok(()) => None,
        Err(err) => {
            tracing::warn!("Log append failed: {}", err);
            Some(err)
        }
    };

    Ok(ReportOutcome {
        record,
        handbook_error,
        log_error,
    })
}

/// Canonical solution form: `1. <step>；2. <step>`, joined full-width.
/// Round-trips through the Step Normalizer back to the same step list.
pub fn renumbered_solution(steps: &[String]) -> String {
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {}", i + 1, step))
        .collect::<Vec<_>>()
        .join("；")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renumbering_round_trips() {
        let steps = vec!["Check belt".to_string(), "Restart motor".to_string()];
        let solution = renumbered_solution(&steps);
        assert_eq!(solution, "1. Check belt；2. Restart motor");
        assert_eq!(normalize_steps(&solution), steps);
    }

    #[test]
    fn renumbering_empty_is_empty() {
        assert_eq!(renumbered_solution(&[]), "");
    }
}
