//! Core logic for Paraday, a markdown-backed PARA and GTD planner.
//!
//! Documents are parsed into projects, tasks and daily notes; every workflow
//! operation takes a snapshot and returns a new one.

pub mod config;
pub mod logging;
pub mod model;
pub mod parser;
pub mod service;
pub mod slug;
pub mod source;
pub mod workspace;

pub use config::{ConfigError, SourceMode, WorkspaceConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::daily::{DailyNote, Habit, HabitId};
pub use model::project::{Priority, Project, ProjectId, ProjectStatus};
pub use model::task::{
    Task, TaskFlags, TaskId, TaskStatus, TimeBucket, TransitionKind, MAX_ESTIMATED_MINUTES,
};
pub use service::planning::{MorningPlan, PlanBudget, PlanLoad, PlanningError};
pub use service::project_service::ProjectServiceError;
pub use service::task_board::{LifecycleError, ProcessingDecision, TaskBoard};
pub use source::{DirectorySource, FileSource, IndexedSource, SourceError, SourceFile};
pub use workspace::Workspace;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
