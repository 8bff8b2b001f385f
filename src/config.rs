//! Configuration loaded from fault_warden.toml and FW_* environment variables

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub stores: StoreConfig,
}

/// Locations of the three stores and the backup directory
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    pub handbook_path: PathBuf,
    pub log_path: PathBuf,
    pub credentials_path: PathBuf,
    pub backup_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            handbook_path: PathBuf::from("handbook.json"),
            log_path: PathBuf::from("repair_log.txt"),
            credentials_path: PathBuf::from("credentials.json"),
            backup_dir: PathBuf::from("backups"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stores: StoreConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the toml file named by FW_CONFIG (default
    /// fault_warden.toml), falling back to defaults when the file is absent,
    /// then apply FW_* environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let config_path =
            std::env::var("FW_CONFIG").unwrap_or_else(|_| "fault_warden.toml".to_string());

        let mut config: Config = if let Ok(content) = std::fs::read_to_string(&config_path) {
            toml::from_str(&content)?
        } else {
            tracing::warn!("Config file {} not found, using defaults", config_path);
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("FW_HANDBOOK_PATH") {
            self.stores.handbook_path = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("FW_LOG_PATH") {
            self.stores.log_path = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("FW_CREDENTIALS_PATH") {
            self.stores.credentials_path = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("FW_BACKUP_DIR") {
            self.stores.backup_dir = PathBuf::from(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_stores_section_missing() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.stores.handbook_path, PathBuf::from("handbook.json"));
        assert_eq!(config.stores.log_path, PathBuf::from("repair_log.txt"));
    }

    #[test]
    fn parses_store_paths() {
        let config: Config = toml::from_str(
            r#"
            [stores]
            handbook_path = "/data/handbook.json"
            log_path = "/data/repair_log.txt"
            credentials_path = "/data/credentials.json"
            backup_dir = "/data/backups"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.stores.handbook_path,
            PathBuf::from("/data/handbook.json")
        );
        assert_eq!(config.stores.backup_dir, PathBuf::from("/data/backups"));
    }
}
