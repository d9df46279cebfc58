//! Runtime configuration for planner hosts.
//!
//! # Responsibility
//! - Collect storage key, database path and logging settings in one place.
//! - Read overrides from `PLANNER_*` environment variables.
//!
//! # Invariants
//! - `storage_key` is never blank.
//! - `log_level` is always one of trace|debug|info|warn|error.

use crate::logging::{default_log_level, normalize_level};
use crate::storage::{MemoryBackend, PersistenceAdapter, SqliteBackend};
use crate::store::task_store::TaskStore;
use crate::store::TASKS_STORAGE_KEY;
use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_STORAGE_KEY: &str = "PLANNER_STORAGE_KEY";
pub const ENV_DB_PATH: &str = "PLANNER_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "PLANNER_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "PLANNER_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    BlankStorageKey,
    UnsupportedLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankStorageKey => write!(f, "storage key cannot be blank"),
            Self::UnsupportedLogLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Planner host settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Key the serialized task list lives under.
    pub storage_key: String,
    /// SQLite file for durable storage; `None` keeps state in memory.
    pub db_path: Option<PathBuf>,
    pub log_level: &'static str,
    /// Absolute directory for rolling log files; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            storage_key: TASKS_STORAGE_KEY.to_string(),
            db_path: None,
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl PlannerConfig {
    /// Builds a config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from any variable lookup; blank values count as unset
    /// except for the storage key.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(key) = lookup(ENV_STORAGE_KEY) {
            let key = key.trim();
            if key.is_empty() {
                return Err(ConfigError::BlankStorageKey);
            }
            config.storage_key = key.to_string();
        }
        if let Some(path) = non_blank(lookup(ENV_DB_PATH)) {
            config.db_path = Some(PathBuf::from(path));
        }
        if let Some(level) = non_blank(lookup(ENV_LOG_LEVEL)) {
            config.log_level = normalize_level(&level)
                .map_err(|_| ConfigError::UnsupportedLogLevel(level.trim().to_string()))?;
        }
        if let Some(dir) = non_blank(lookup(ENV_LOG_DIR)) {
            config.log_dir = Some(PathBuf::from(dir));
        }

        Ok(config)
    }

    /// Builds the persistence adapter this config points at.
    ///
    /// A database that cannot be opened degrades to an unavailable adapter,
    /// so the store still runs in memory for the session.
    pub fn persistence_adapter(&self) -> PersistenceAdapter {
        let Some(path) = &self.db_path else {
            return PersistenceAdapter::new(MemoryBackend::new());
        };

        match SqliteBackend::open(path) {
            Ok(backend) => PersistenceAdapter::new(backend),
            Err(err) => {
                error!(
                    "event=config_storage module=config status=error path={} error={err}",
                    path.display()
                );
                PersistenceAdapter::unavailable()
            }
        }
    }

    /// Builds a wall-clock task store wired to this config.
    pub fn task_store(&self) -> TaskStore {
        TaskStore::new(self.persistence_adapter()).with_storage_key(self.storage_key.clone())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, PlannerConfig, ENV_DB_PATH, ENV_LOG_LEVEL, ENV_STORAGE_KEY};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = PlannerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, PlannerConfig::default());
        assert_eq!(config.storage_key, "daily-planner-tasks");
    }

    #[test]
    fn overrides_are_applied() {
        let config = PlannerConfig::from_lookup(lookup_from(&[
            (ENV_STORAGE_KEY, " work-tasks "),
            (ENV_DB_PATH, "/tmp/planner.sqlite3"),
            (ENV_LOG_LEVEL, "WARNING"),
        ]))
        .unwrap();

        assert_eq!(config.storage_key, "work-tasks");
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/planner.sqlite3")));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let blank = PlannerConfig::from_lookup(lookup_from(&[(ENV_STORAGE_KEY, "  ")]));
        assert_eq!(blank.unwrap_err(), ConfigError::BlankStorageKey);

        let level = PlannerConfig::from_lookup(lookup_from(&[(ENV_LOG_LEVEL, "loud")]));
        assert_eq!(
            level.unwrap_err(),
            ConfigError::UnsupportedLogLevel("loud".to_string())
        );
    }

    #[test]
    fn unopenable_database_degrades_to_unavailable_adapter() {
        let dir = tempfile::tempdir().unwrap();
        let config = PlannerConfig {
            db_path: Some(dir.path().join("missing").join("nested").join("db.sqlite3")),
            ..PlannerConfig::default()
        };

        assert!(!config.persistence_adapter().is_available());
        assert!(PlannerConfig::default().persistence_adapter().is_available());
    }
}
