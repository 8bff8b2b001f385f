//! fault-warden: troubleshooting-handbook lookup and incident logging for
//! factory-floor equipment faults.
//!
//! A technician authenticates with a worker ID, searches the handbook by
//! keyword, views remediation steps ranked by how often each one resolved
//! past incidents, and files a report of the action taken. Reports land in an
//! append-only text log that feeds the ranking on future lookups.

pub mod config;
pub mod credentials;
pub mod engine;
pub mod error;
pub mod handbook;
pub mod incident;
pub mod logstore;
pub mod matcher;
pub mod report;
pub mod session;
pub mod stats;
pub mod steps;

// Loads .env if present, silently ignores if missing.
pub fn load_env() {
    let _ = dotenvy::dotenv();
}
