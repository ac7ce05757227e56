//! # Configuration
//!
//! Agenda keeps a small JSON configuration file, `config.json`, in its home
//! directory next to the database.
//!
//! ## Home Directory
//!
//! 1. `AGENDA_HOME` environment variable, when set.
//! 2. The platform data directory (via the `directories` crate).
//!
//! ## Available Settings
//!
//! | Key          | Default         | Description                                   |
//! |--------------|-----------------|-----------------------------------------------|
//! | `database`   | `agenda.db`     | Database file, relative to home or absolute   |
//! | `list-order` | `chronological` | `chronological` or `text` (legacy day-first)  |

use crate::error::{AgendaError, Result};
use crate::model::ListOrder;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_DATABASE: &str = "agenda.db";

pub const HOME_ENV: &str = "AGENDA_HOME";
pub const KEYS: &[&str] = &["database", "list-order"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgendaConfig {
    #[serde(default = "default_database")]
    pub database: String,

    #[serde(default)]
    pub list_order: ListOrder,
}

fn default_database() -> String {
    DEFAULT_DATABASE.to_string()
}

impl Default for AgendaConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            list_order: ListOrder::default(),
        }
    }
}

impl AgendaConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: AgendaConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    /// Database location; relative names resolve against `home`.
    pub fn database_path(&self, home: &Path) -> PathBuf {
        let db = Path::new(&self.database);
        if db.is_absolute() {
            db.to_path_buf()
        } else {
            home.join(db)
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "database" => Some(self.database.clone()),
            "list-order" | "list_order" => Some(self.list_order.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "database" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err("database cannot be empty".to_string());
                }
                self.database = value.to_string();
            }
            "list-order" | "list_order" => self.list_order = value.parse()?,
            other => return Err(format!("Unknown config key: {}", other)),
        }
        Ok(())
    }
}

/// Resolve the agenda home directory.
pub fn home_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "agenda", "agenda")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| AgendaError::Config("Could not determine data directory".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AgendaConfig::default();
        assert_eq!(config.database, "agenda.db");
        assert_eq!(config.list_order, ListOrder::Chronological);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = AgendaConfig::load(dir.path().join("absent")).unwrap();
        assert_eq!(config, AgendaConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AgendaConfig::default();
        config.set("list-order", "text").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = AgendaConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.list_order, ListOrder::Text);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"list_order":"text"}"#).unwrap();

        let loaded = AgendaConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.database, "agenda.db");
        assert_eq!(loaded.list_order, ListOrder::Text);
    }

    #[test]
    fn test_set_rejects_unknown_key_and_bad_value() {
        let mut config = AgendaConfig::default();
        assert!(config.set("color", "red").is_err());
        assert!(config.set("list-order", "random").is_err());
        assert!(config.set("database", "  ").is_err());
        assert_eq!(config, AgendaConfig::default());
    }

    #[test]
    fn test_database_path_resolution() {
        let home = Path::new("/home/agenda");
        let mut config = AgendaConfig::default();
        assert_eq!(config.database_path(home), home.join("agenda.db"));

        let absolute = std::env::temp_dir().join("elsewhere.db");
        config.database = absolute.display().to_string();
        assert_eq!(config.database_path(home), absolute);
    }
}
