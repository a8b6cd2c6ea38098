//! Domain model for the PARA workspace.
//!
//! # Responsibility
//! - Define the records produced by document parsing: projects, tasks,
//!   daily notes and habits.
//! - Keep enum wire names stable (`snake_case`) for every shell.
//!
//! # Invariants
//! - Project and task ids are derived once and never rewritten.
//! - A task's `completed_at` is set iff its status is `done`.

pub mod daily;
pub mod project;
pub mod task;
