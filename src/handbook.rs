//! Handbook store: the catalogue of known issues and their remediation text,
//! persisted as a JSON array, plus the keyword lookup over it.

use crate::error::{Result, WardenError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A catalogued fault description. `issue` doubles as the join key against
/// log records: case-sensitive text, matched by literal substring, not a
/// structural ID. Missing `keyword`/`solution` in stored data default to
/// empty strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssueRecord {
    pub issue: String,
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub solution: String,
}

/// File-backed, ordered list of issue records. Rewritten wholesale on save,
/// with a timestamped best-effort backup copy first.
pub struct Handbook {
    path: PathBuf,
    backup_dir: PathBuf,
    entries: Vec<IssueRecord>,
}

impl Handbook {
    /// Load the handbook, degrading to an empty list when the file is
    /// missing or unreadable so search stays usable.
    pub fn open(path: impl Into<PathBuf>, backup_dir: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match load_entries(&path) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!("Handbook unreadable, starting empty: {}", err);
                Vec::new()
            }
        };
        Self {
            path,
            backup_dir: backup_dir.into(),
            entries,
        }
    }

    pub fn entries(&self) -> &[IssueRecord] {
        &self.entries
    }

    /// First entry (original list order) whose haystack contains every
    /// whitespace-separated, case-folded query token. First-match-wins is
    /// the defined behavior, there is no ranking among multiple matches.
    pub fn find(&self, query: &str) -> Option<&IssueRecord> {
        self.find_all(query).into_iter().next()
    }

    /// Every entry matching the query, in original list order.
    pub fn find_all(&self, query: &str) -> Vec<&IssueRecord> {
        let tokens: Vec<String> = query
            .split_whitespace()
            .map(|t| t.to_lowercase())
            .collect();
        if tokens.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|entry| {
                let haystack = format!("{}{}", entry.keyword, entry.issue).to_lowercase();
                tokens.iter().all(|token| haystack.contains(token.as_str()))
            })
            .collect()
    }

    /// Entry whose title equals `issue_title` exactly, for mutation.
    pub fn entry_mut(&mut self, issue_title: &str) -> Option<&mut IssueRecord> {
        self.entries.iter_mut().find(|e| e.issue == issue_title)
    }

    pub fn push(&mut self, record: IssueRecord) {
        self.entries.push(record);
    }

    /// Remove the entry with this exact title; true when something was removed.
    pub fn remove(&mut self, issue_title: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.issue != issue_title);
        self.entries.len() != before
    }

    /// Rewrite the store wholesale. Takes a timestamped copy of the current
    /// file into the backup directory first; the copy is best-effort and its
    /// failure never blocks the write.
    pub fn save(&self) -> Result<()> {
        self.backup();
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, json).map_err(|e| WardenError::write(&self.path, e))?;
        tracing::debug!(
            "Saved handbook with {} entries to {}",
            self.entries.len(),
            self.path.display()
        );
        Ok(())
    }

    fn backup(&self) {
        if !self.path.exists() {
            return;
        }
        if let Err(err) = std::fs::create_dir_all(&self.backup_dir) {
            tracing::warn!("Handbook backup skipped: {}", err);
            return;
        }
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let stem = self
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("handbook");
        let target = self.backup_dir.join(format!("{stem}_{stamp}.json"));
        if let Err(err) = std::fs::copy(&self.path, &target) {
            tracing::warn!("Handbook backup to {} failed: {}", target.display(), err);
        }
    }
}

fn load_entries(path: &Path) -> Result<Vec<IssueRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path).map_err(|e| WardenError::read(path, e))?;
    // historical exports carry a UTF-8 BOM signature
    let content = content.trim_start_matches('\u{feff}');
    Ok(serde_json::from_str(content)?)
}
