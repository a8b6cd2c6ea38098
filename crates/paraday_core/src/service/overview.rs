//! Read-only projections for dashboards and boards.

use crate::model::project::{Project, ProjectStatus};
use crate::model::task::{Task, TaskStatus};
use crate::service::project_service::distinct_areas;
use crate::service::task_board::TaskBoard;
use serde::Serialize;

/// Column order of the status board.
pub const STATUS_BOARD_ORDER: [TaskStatus; 6] = [
    TaskStatus::Next,
    TaskStatus::PlannedToday,
    TaskStatus::Active,
    TaskStatus::Waiting,
    TaskStatus::Someday,
    TaskStatus::Done,
];

/// Display label for a task status.
pub fn status_label(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Inbox => "Inbox",
        TaskStatus::Clarified => "Clarified",
        TaskStatus::Next => "Next actions",
        TaskStatus::PlannedToday => "Today",
        TaskStatus::Active => "Focus",
        TaskStatus::Waiting => "Waiting for",
        TaskStatus::Someday => "Someday",
        TaskStatus::Done => "Done",
        TaskStatus::Cancelled => "Cancelled",
    }
}

/// Home screen summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary<'a> {
    pub active_projects: Vec<&'a Project>,
    /// `planned_today` or `active` tasks.
    pub today_tasks: Vec<&'a Task>,
    pub next_actions: Vec<&'a Task>,
    pub areas: Vec<&'a str>,
    pub inbox_count: usize,
    pub daily_priority: Option<&'a Task>,
}

impl<'a> DashboardSummary<'a> {
    pub fn build(projects: &'a [Project], board: &'a TaskBoard) -> Self {
        Self {
            active_projects: projects
                .iter()
                .filter(|project| project.status == ProjectStatus::Active)
                .collect(),
            today_tasks: board
                .tasks()
                .iter()
                .filter(|task| task.status.is_today())
                .collect(),
            next_actions: board.with_status(TaskStatus::Next),
            areas: distinct_areas(projects),
            inbox_count: board.with_status(TaskStatus::Inbox).len(),
            daily_priority: board.daily_priority(),
        }
    }
}

/// One status board column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusColumn<'a> {
    pub status: TaskStatus,
    pub label: &'static str,
    pub tasks: Vec<&'a Task>,
}

/// Tasks grouped into [`STATUS_BOARD_ORDER`] columns.
pub fn status_board(board: &TaskBoard) -> Vec<StatusColumn<'_>> {
    STATUS_BOARD_ORDER
        .into_iter()
        .map(|status| StatusColumn {
            status,
            label: status_label(status),
            tasks: board.with_status(status),
        })
        .collect()
}

/// Inbox tasks, optionally narrowed to one execution context.
pub fn inbox_tasks<'a>(board: &'a TaskBoard, context: Option<&str>) -> Vec<&'a Task> {
    tasks_in_context(board, TaskStatus::Inbox, context)
}

/// Tasks with `status`, optionally narrowed to one execution context.
pub fn tasks_in_context<'a>(
    board: &'a TaskBoard,
    status: TaskStatus,
    context: Option<&str>,
) -> Vec<&'a Task> {
    board
        .with_status(status)
        .into_iter()
        .filter(|task| context.map_or(true, |context| task.context == context))
        .collect()
}
