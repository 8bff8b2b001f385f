//! Explicit session context for the logged-in technician.
//!
//! The core components stay stateless; whoever drives them holds one of
//! these and passes it where reporter identity is needed.

use crate::credentials::CredentialStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub worker_id: String,
    pub display_name: String,
}

impl Session {
    /// Authenticate a worker ID against the credential store.
    pub fn log_in(credentials: &CredentialStore, worker_id: &str) -> Option<Session> {
        let worker_id = worker_id.trim();
        credentials.authenticate(worker_id).map(|name| Session {
            worker_id: worker_id.to_string(),
            display_name: name.to_string(),
        })
    }
}
