//! Typed presentation descriptors over store records.
//!
//! # Responsibility
//! - Describe table columns, row actions and form fields as plain data.
//! - Route row intents back into the store without UI dependencies.
//!
//! # Invariants
//! - Descriptors never hold task state; they read records handed to them.

pub mod form;
pub mod table;
pub mod task_table;
