//! Workspace use-case services.
//!
//! # Responsibility
//! - Implement task/project lifecycle transitions as pure snapshot updates.
//! - Keep shells (CLI, UI) free of workflow rules.
//!
//! # Invariants
//! - Every operation takes a snapshot and returns a new one; inputs are never
//!   mutated in place.
//! - Stale ids are silent no-ops; illegal transitions are errors.

pub mod daily_service;
pub mod overview;
pub mod planning;
pub mod processing;
pub mod project_service;
pub mod reorder;
pub mod task_board;
