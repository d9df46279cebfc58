//! Task state management.
//!
//! # Responsibility
//! - Own the canonical in-memory task collection.
//! - Expose mutations and derived views over that collection.
//!
//! # Invariants
//! - The store is single-writer: callers sharing it across threads must wrap
//!   it in one `Mutex`.

pub mod task_store;

/// Storage key holding the serialized task list.
pub const TASKS_STORAGE_KEY: &str = "daily-planner-tasks";
