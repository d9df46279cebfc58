//! Core task store for the daily planner.
//! This crate is the single source of truth for task invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod storage;
pub mod store;
pub mod view;

pub use config::{ConfigError, PlannerConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::task::{task_id, title_slug, Task, TaskId, TaskPatch};
pub use storage::{
    KeyValueBackend, MemoryBackend, PersistenceAdapter, SqliteBackend, StorageError,
    StorageResult,
};
pub use store::task_store::TaskStore;
pub use store::TASKS_STORAGE_KEY;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
