//! Task domain model.
//!
//! # Responsibility
//! - Define the task record shared by the store and presentation descriptors.
//!
//! # Invariants
//! - Every task is identified by a `TaskId` that is never rewritten.

pub mod task;
