//! Task lifecycle engine.
//!
//! # Responsibility
//! - Hold the ordered task collection together with the single daily
//!   priority pointer.
//! - Apply toggle, triage commit, manual create/edit and reorder transitions
//!   as snapshot-in, snapshot-out updates.
//!
//! # Invariants
//! - At most one task is the daily priority; the pointer always names a task
//!   in `planned_today`, `active` or `done`.
//! - Every status change of an existing task is checked against
//!   [`TaskStatus::permits`].
//! - `completed_at` is set iff the task is `done`.
//! - Unknown ids leave the board unchanged.

use crate::model::project::{Priority, ProjectId, DEFAULT_AREA, INBOX_PROJECT_ID};
use crate::model::task::{
    Task, TaskFlags, TaskId, TaskStatus, TimeBucket, TransitionKind, MAX_ESTIMATED_MINUTES,
};
use crate::service::reorder::reorder_by_id;
use crate::slug::{slugify, unique_slug};
use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, info};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Context assigned to manually created tasks without one.
pub const DEFAULT_MANUAL_CONTEXT: &str = "desktop";

/// Errors raised by lifecycle transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// Transition is not in the status table for this operation.
    IllegalTransition {
        task_id: TaskId,
        from: TaskStatus,
        to: TaskStatus,
        kind: TransitionKind,
    },
    /// Task title is blank after trim.
    EmptyTitle,
    /// Estimates must be positive.
    ZeroEstimate,
    /// Estimate above [`MAX_ESTIMATED_MINUTES`].
    EstimateTooLarge(u32),
    /// Caller-supplied id is already used by another task.
    DuplicateId(TaskId),
}

impl Display for LifecycleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IllegalTransition {
                task_id,
                from,
                to,
                kind,
            } => write!(
                f,
                "illegal {kind:?} transition for task {task_id}: {} -> {}",
                from.as_str(),
                to.as_str()
            ),
            Self::EmptyTitle => write!(f, "task title must not be blank"),
            Self::ZeroEstimate => write!(f, "estimated minutes must be positive"),
            Self::EstimateTooLarge(minutes) => write!(
                f,
                "estimated minutes must not exceed {MAX_ESTIMATED_MINUTES}, got {minutes}"
            ),
            Self::DuplicateId(id) => write!(f, "task id already exists: {id}"),
        }
    }
}

impl Error for LifecycleError {}

/// Triage choices applied to one inbox task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingDecision {
    pub area: String,
    pub context: String,
    /// Sets `estimated_minutes` through [`TimeBucket::default_minutes`].
    pub time_bucket: TimeBucket,
    /// One of [`TaskStatus::PROCESSING_TARGETS`].
    pub target: TaskStatus,
}

/// Input for a manually created task.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskDraft {
    /// Explicit id; otherwise derived from the title.
    pub id: Option<TaskId>,
    pub title: String,
    pub description: Option<String>,
    pub project_id: Option<ProjectId>,
    pub area: Option<String>,
    pub context: Option<String>,
    pub time_bucket: Option<TimeBucket>,
    pub estimated_minutes: Option<u32>,
    /// Starting status; `inbox` when omitted.
    pub status: Option<TaskStatus>,
    pub due_date: Option<NaiveDate>,
    pub planned_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
}

/// Partial update for an existing task. `None` keeps the current value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub project_id: Option<ProjectId>,
    pub area: Option<String>,
    pub context: Option<String>,
    pub time_bucket: Option<TimeBucket>,
    pub estimated_minutes: Option<u32>,
    pub status: Option<TaskStatus>,
    pub flags: Option<TaskFlags>,
    pub due_date: Option<Option<NaiveDate>>,
    pub planned_date: Option<Option<NaiveDate>>,
    pub priority: Option<Priority>,
}

/// Serialized task shape with the derived daily priority marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView<'a> {
    #[serde(flatten)]
    pub task: &'a Task,
    pub daily_priority: bool,
}

/// Ordered task snapshot plus the daily priority pointer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskBoard {
    tasks: Vec<Task>,
    daily_priority: Option<TaskId>,
}

impl TaskBoard {
    /// Builds a board from freshly parsed tasks; no priority is set.
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            daily_priority: None,
        }
    }

    pub(crate) fn from_parts(tasks: Vec<Task>, daily_priority: Option<TaskId>) -> Self {
        let daily_priority = daily_priority.filter(|id| {
            tasks
                .iter()
                .any(|task| &task.id == id && holds_priority(task.status))
        });
        Self {
            tasks,
            daily_priority,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    pub fn daily_priority_id(&self) -> Option<&str> {
        self.daily_priority.as_deref()
    }

    pub fn daily_priority(&self) -> Option<&Task> {
        self.daily_priority_id().and_then(|id| self.get(id))
    }

    pub fn is_daily_priority(&self, task_id: &str) -> bool {
        self.daily_priority_id() == Some(task_id)
    }

    /// Tasks with exactly `status`, in board order.
    pub fn with_status(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks.iter().filter(|task| task.status == status).collect()
    }

    /// Tasks owned by `project_id`, in board order.
    pub fn for_project(&self, project_id: &str) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.project_id == project_id)
            .collect()
    }

    /// Serializable views carrying the derived `daily_priority` flag.
    pub fn views(&self) -> Vec<TaskView<'_>> {
        self.tasks
            .iter()
            .map(|task| TaskView {
                task,
                daily_priority: self.is_daily_priority(&task.id),
            })
            .collect()
    }

    /// Flips a task between `done` and `next`.
    ///
    /// Entering `done` stamps `completed_at = now`; leaving it clears the
    /// stamp.
    pub fn toggle_completion(
        &self,
        task_id: &str,
        now: DateTime<Utc>,
    ) -> Result<TaskBoard, LifecycleError> {
        let Some(index) = self.position(task_id) else {
            return Ok(self.clone());
        };
        let current = &self.tasks[index];
        let target = if current.is_done() {
            TaskStatus::Next
        } else {
            TaskStatus::Done
        };
        ensure_permitted(current, TransitionKind::Toggle, target)?;

        let mut updated = current.clone();
        updated.status = target;
        updated.completed_at = (target == TaskStatus::Done).then_some(now);

        debug!(
            "event=task_toggle module=lifecycle status=ok to={}",
            target.as_str()
        );
        Ok(self.replace_at(index, updated))
    }

    /// Commits triage choices for one `inbox` task.
    pub fn commit_processing(
        &self,
        task_id: &str,
        decision: &ProcessingDecision,
        now: DateTime<Utc>,
    ) -> Result<TaskBoard, LifecycleError> {
        let Some(index) = self.position(task_id) else {
            return Ok(self.clone());
        };
        let current = &self.tasks[index];
        ensure_permitted(current, TransitionKind::ProcessingCommit, decision.target)?;

        let mut updated = current.clone();
        updated.status = decision.target;
        updated.area = decision.area.clone();
        updated.context = decision.context.clone();
        updated.time_bucket = decision.time_bucket;
        updated.estimated_minutes = decision.time_bucket.default_minutes();
        if decision.target == TaskStatus::PlannedToday {
            updated.planned_date = Some(now.date_naive());
        }
        if decision.time_bucket == TimeBucket::Micro {
            updated.flags.quick = true;
        }

        info!(
            "event=task_process module=lifecycle status=ok to={} bucket={}",
            decision.target.as_str(),
            decision.time_bucket.as_str()
        );
        Ok(self.replace_at(index, updated))
    }

    /// Appends a manually created task and returns its id.
    ///
    /// Any starting status is accepted. `planned_today` without a date gets
    /// today's date; `done` is stamped with `completed_at = now`.
    ///
    /// `default_project` is used when the draft names no project; without
    /// either the task goes to the `inbox` sentinel project.
    pub fn create_task(
        &self,
        draft: TaskDraft,
        default_project: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<(TaskBoard, TaskId), LifecycleError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(LifecycleError::EmptyTitle);
        }
        let id = self.new_task_id(draft.id.as_deref(), title)?;

        let status = draft.status.unwrap_or(TaskStatus::Inbox);
        let (time_bucket, estimated_minutes) =
            resolve_estimate(draft.time_bucket, draft.estimated_minutes, TimeBucket::Short)?;

        let project_id = draft
            .project_id
            .filter(|value| !value.trim().is_empty())
            .or_else(|| default_project.map(str::to_string))
            .unwrap_or_else(|| INBOX_PROJECT_ID.to_string());

        let task = Task {
            id: id.clone(),
            title: title.to_string(),
            description: draft.description.filter(|value| !value.trim().is_empty()),
            project_id,
            area: non_blank(draft.area).unwrap_or_else(|| DEFAULT_AREA.to_string()),
            context: non_blank(draft.context)
                .unwrap_or_else(|| DEFAULT_MANUAL_CONTEXT.to_string()),
            estimated_minutes,
            time_bucket,
            status,
            flags: TaskFlags::default(),
            created_at: now,
            due_date: draft.due_date,
            planned_date: stamp_planned_date(status, draft.planned_date, now),
            completed_at: (status == TaskStatus::Done).then_some(now),
            priority: draft.priority.unwrap_or_default(),
        };

        let mut tasks = self.tasks.clone();
        tasks.push(task);
        info!(
            "event=task_create module=lifecycle status=ok initial={}",
            status.as_str()
        );
        Ok((Self::from_parts(tasks, self.daily_priority.clone()), id))
    }

    /// Replaces only the submitted fields of one task.
    ///
    /// A status change keeps `completed_at` in step with `done` and dates a
    /// move into `planned_today` when no planned date is set.
    pub fn edit_task(
        &self,
        task_id: &str,
        patch: TaskPatch,
        now: DateTime<Utc>,
    ) -> Result<TaskBoard, LifecycleError> {
        let Some(index) = self.position(task_id) else {
            return Ok(self.clone());
        };
        let current = &self.tasks[index];
        let mut updated = current.clone();

        if let Some(status) = patch.status {
            ensure_permitted(current, TransitionKind::Manual, status)?;
            updated.status = status;
        }
        if let Some(title) = patch.title {
            let trimmed = title.trim();
            if trimmed.is_empty() {
                return Err(LifecycleError::EmptyTitle);
            }
            updated.title = trimmed.to_string();
        }
        if patch.time_bucket.is_some() || patch.estimated_minutes.is_some() {
            let (bucket, minutes) = resolve_estimate(
                patch.time_bucket,
                patch.estimated_minutes,
                current.time_bucket,
            )?;
            updated.time_bucket = bucket;
            updated.estimated_minutes = minutes;
        }
        if let Some(description) = patch.description {
            updated.description = description;
        }
        if let Some(project_id) = patch.project_id {
            updated.project_id = project_id;
        }
        if let Some(area) = patch.area {
            updated.area = area;
        }
        if let Some(context) = patch.context {
            updated.context = context;
        }
        if let Some(flags) = patch.flags {
            updated.flags = flags;
        }
        if let Some(due_date) = patch.due_date {
            updated.due_date = due_date;
        }
        if let Some(planned_date) = patch.planned_date {
            updated.planned_date = planned_date;
        }
        if let Some(priority) = patch.priority {
            updated.priority = priority;
        }
        if updated.status != current.status {
            updated.completed_at = match updated.status {
                TaskStatus::Done => Some(now),
                _ => None,
            };
            updated.planned_date = stamp_planned_date(updated.status, updated.planned_date, now);
        }

        Ok(self.replace_at(index, updated))
    }

    /// Reorders tasks of one project inside the slots they already occupy.
    ///
    /// Tasks of other projects keep their positions. Ids from different
    /// projects, unknown ids or equal ids leave the board unchanged.
    pub fn reorder_within_project(
        &self,
        project_id: &str,
        source_id: &str,
        target_id: &str,
    ) -> TaskBoard {
        let slots: Vec<usize> = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.project_id == project_id)
            .map(|(index, _)| index)
            .collect();
        let subset: Vec<Task> = slots.iter().map(|&index| self.tasks[index].clone()).collect();
        let reordered = reorder_by_id(subset, source_id, target_id);

        let mut tasks = self.tasks.clone();
        for (slot, task) in slots.into_iter().zip(reordered) {
            tasks[slot] = task;
        }
        Self {
            tasks,
            daily_priority: self.daily_priority.clone(),
        }
    }

    fn position(&self, task_id: &str) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == task_id)
    }

    fn replace_at(&self, index: usize, task: Task) -> TaskBoard {
        let keeps_priority = !(self.is_daily_priority(&task.id) && !holds_priority(task.status));
        let mut tasks = self.tasks.clone();
        tasks[index] = task;
        let daily_priority = if keeps_priority {
            self.daily_priority.clone()
        } else {
            debug!("event=daily_priority_clear module=lifecycle status=ok");
            None
        };
        Self {
            tasks,
            daily_priority,
        }
    }

    fn new_task_id(
        &self,
        requested: Option<&str>,
        title: &str,
    ) -> Result<TaskId, LifecycleError> {
        if let Some(requested) = requested.map(str::trim).filter(|id| !id.is_empty()) {
            if self.get(requested).is_some() {
                return Err(LifecycleError::DuplicateId(requested.to_string()));
            }
            return Ok(requested.to_string());
        }

        let slug = slugify(title);
        if slug.is_empty() {
            return Ok(Uuid::new_v4().to_string());
        }
        Ok(unique_slug(&slug, |candidate| self.get(candidate).is_some()))
    }
}

/// Statuses in which a task may remain the daily priority.
pub(crate) fn holds_priority(status: TaskStatus) -> bool {
    matches!(
        status,
        TaskStatus::PlannedToday | TaskStatus::Active | TaskStatus::Done
    )
}

fn ensure_permitted(
    task: &Task,
    kind: TransitionKind,
    to: TaskStatus,
) -> Result<(), LifecycleError> {
    if task.status.permits(kind, to) {
        return Ok(());
    }
    Err(LifecycleError::IllegalTransition {
        task_id: task.id.clone(),
        from: task.status,
        to,
        kind,
    })
}

/// Keeps bucket and minutes consistent.
///
/// Minutes win when both are given; a bucket alone resets the minutes to its
/// default.
fn resolve_estimate(
    bucket: Option<TimeBucket>,
    minutes: Option<u32>,
    fallback: TimeBucket,
) -> Result<(TimeBucket, u32), LifecycleError> {
    match (bucket, minutes) {
        (_, Some(0)) => Err(LifecycleError::ZeroEstimate),
        (_, Some(minutes)) if minutes > MAX_ESTIMATED_MINUTES => {
            Err(LifecycleError::EstimateTooLarge(minutes))
        }
        (_, Some(minutes)) => Ok((TimeBucket::from_minutes(minutes), minutes)),
        (Some(bucket), None) => Ok((bucket, bucket.default_minutes())),
        (None, None) => Ok((fallback, fallback.default_minutes())),
    }
}

fn stamp_planned_date(
    status: TaskStatus,
    planned_date: Option<NaiveDate>,
    now: DateTime<Utc>,
) -> Option<NaiveDate> {
    match status {
        TaskStatus::PlannedToday => planned_date.or(Some(now.date_naive())),
        _ => planned_date,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{resolve_estimate, LifecycleError};
    use crate::model::task::TimeBucket;

    #[test]
    fn estimate_resolution_keeps_bucket_consistent() {
        assert_eq!(
            resolve_estimate(Some(TimeBucket::Long), None, TimeBucket::Short),
            Ok((TimeBucket::Long, 90))
        );
        assert_eq!(
            resolve_estimate(Some(TimeBucket::Micro), Some(50), TimeBucket::Short),
            Ok((TimeBucket::Medium, 50))
        );
        assert_eq!(
            resolve_estimate(None, None, TimeBucket::Short),
            Ok((TimeBucket::Short, 20))
        );
        assert!(resolve_estimate(None, Some(0), TimeBucket::Short).is_err());
        assert_eq!(
            resolve_estimate(None, Some(1440), TimeBucket::Short),
            Ok((TimeBucket::Long, 1440))
        );
        assert_eq!(
            resolve_estimate(None, Some(4_000_000_000), TimeBucket::Short),
            Err(LifecycleError::EstimateTooLarge(4_000_000_000))
        );
    }
}
