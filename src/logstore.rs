//! Append-only incident log store.

use crate::error::{Result, WardenError};
use std::io::Write;
use std::path::PathBuf;

/// Path-owning handle over the log file. Reads degrade to empty text; the
/// append creates the file when absent, like the shell's `>>`.
pub struct LogStore {
    path: PathBuf,
}

impl LogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Full log text, or empty when the file is missing or unreadable.
    /// Search must stay usable without a log; scores fall back to priors.
    pub fn read_or_empty(&self) -> String {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => content.trim_start_matches('\u{feff}').to_string(),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(err) => {
                tracing::warn!("Log store {} unreadable: {}", self.path.display(), err);
                String::new()
            }
        }
    }

    /// Append one rendered record block.
    pub fn append(&self, block: &str) -> Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| WardenError::write(&self.path, e))?;
        file.write_all(block.as_bytes())
            .map_err(|e| WardenError::write(&self.path, e))?;
        Ok(())
    }
}
