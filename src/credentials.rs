//! Credential store: worker ID to display name, read-only from the core.
//!
//! Plaintext comparison by design; this is floor-terminal convenience, not
//! authentication security.

use std::collections::HashMap;
use std::path::Path;

pub struct CredentialStore {
    workers: HashMap<String, String>,
}

impl CredentialStore {
    /// Load the JSON ID -> name map. A missing or corrupt file degrades to
    /// an empty map so the rest of the tool stays usable.
    pub fn load(path: &Path) -> Self {
        let workers = std::fs::read_to_string(path)
            .ok()
            .and_then(|content| {
                serde_json::from_str(content.trim_start_matches('\u{feff}'))
                    .map_err(|err| {
                        tracing::warn!("Credential store {} unreadable: {}", path.display(), err);
                        err
                    })
                    .ok()
            })
            .unwrap_or_default();
        Self { workers }
    }

    pub fn from_map(workers: HashMap<String, String>) -> Self {
        Self { workers }
    }

    /// Display name for a worker ID, `None` when unknown.
    pub fn authenticate(&self, worker_id: &str) -> Option<&str> {
        self.workers.get(worker_id).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }
}
