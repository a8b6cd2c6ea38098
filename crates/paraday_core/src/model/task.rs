//! Task domain model and status transition table.
//!
//! # Responsibility
//! - Define the canonical actionable item shared by project checklists and
//!   inbox captures.
//! - Own the explicit table of legal status transitions.
//!
//! # Invariants
//! - `completed_at.is_some()` iff `status == TaskStatus::Done`.
//! - `time_bucket` is the coarse view of `estimated_minutes`.
//! - Leaving `cancelled` by hand only reopens it into `inbox`.

use crate::model::project::{Priority, ProjectId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Stable task identifier.
///
/// Parsed checklist items use `{project_id}::{line_offset}`.
pub type TaskId = String;

/// Minutes used when no bucket or estimate is known.
pub const UNKNOWN_BUCKET_MINUTES: u32 = 25;

/// Largest accepted estimate: one full day.
pub const MAX_ESTIMATED_MINUTES: u32 = 24 * 60;

/// GTD workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Unprocessed capture.
    Inbox,
    /// Reviewed, not yet actionable.
    Clarified,
    /// Ready to do.
    Next,
    /// Scheduled for the current day.
    PlannedToday,
    /// Currently focused.
    Active,
    /// Blocked on external input.
    Waiting,
    /// Deferred indefinitely.
    Someday,
    /// Completed (terminal).
    Done,
    /// Abandoned (terminal).
    Cancelled,
}

/// Which operation is asking for a status change.
///
/// The same pair of states can be legal for one operation and illegal for
/// another, e.g. `done -> next` is a toggle but never a triage commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Checkbox click.
    Toggle,
    /// Inbox triage commit.
    ProcessingCommit,
    /// Morning planning selected the task.
    PlanSelect,
    /// Morning planning dropped a previously planned task.
    PlanRelease,
    /// Status submitted through a create/edit form.
    Manual,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 9] = [
        Self::Inbox,
        Self::Clarified,
        Self::Next,
        Self::PlannedToday,
        Self::Active,
        Self::Waiting,
        Self::Someday,
        Self::Done,
        Self::Cancelled,
    ];

    /// Targets accepted by an inbox processing commit.
    pub const PROCESSING_TARGETS: [TaskStatus; 6] = [
        Self::Clarified,
        Self::Next,
        Self::PlannedToday,
        Self::Waiting,
        Self::Someday,
        Self::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::Clarified => "clarified",
            Self::Next => "next",
            Self::PlannedToday => "planned_today",
            Self::Active => "active",
            Self::Waiting => "waiting",
            Self::Someday => "someday",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
    }

    /// Returns whether this status accepts no further workflow moves.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Cancelled)
    }

    /// Returns whether the task belongs to today's working set.
    pub fn is_today(self) -> bool {
        matches!(self, Self::PlannedToday | Self::Active)
    }

    /// Transition table.
    ///
    /// Staying in place is permitted for every kind except a processing
    /// commit, which always requires an `inbox` source.
    pub fn permits(self, kind: TransitionKind, to: TaskStatus) -> bool {
        use TaskStatus::*;

        if self == to && kind != TransitionKind::ProcessingCommit {
            return true;
        }

        match kind {
            TransitionKind::Toggle => match self {
                Done => to == Next,
                _ => to == Done,
            },
            TransitionKind::ProcessingCommit => {
                self == Inbox && Self::PROCESSING_TARGETS.contains(&to)
            }
            TransitionKind::PlanSelect => self == Next && to == PlannedToday,
            TransitionKind::PlanRelease => matches!(self, PlannedToday | Active) && to == Next,
            TransitionKind::Manual => match self {
                Inbox | Clarified => matches!(
                    to,
                    Inbox | Clarified | Next | PlannedToday | Waiting | Someday | Done | Cancelled
                ),
                Next => matches!(
                    to,
                    Clarified | PlannedToday | Active | Waiting | Someday | Done | Cancelled
                ),
                PlannedToday => matches!(to, Next | Active | Waiting | Done | Cancelled),
                Active => matches!(to, PlannedToday | Next | Waiting | Done),
                Waiting => matches!(to, Next | PlannedToday | Someday | Done | Cancelled),
                Someday => matches!(to, Clarified | Next | Cancelled),
                Done => matches!(to, Inbox | Next | PlannedToday),
                Cancelled => to == Inbox,
            },
        }
    }
}

/// Coarse duration classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeBucket {
    /// Up to 10 minutes.
    Micro,
    /// 11 to 30 minutes.
    Short,
    /// 31 to 60 minutes.
    Medium,
    /// More than an hour.
    Long,
}

impl TimeBucket {
    pub const ALL: [TimeBucket; 4] = [Self::Micro, Self::Short, Self::Medium, Self::Long];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Micro => "micro",
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|bucket| bucket.as_str() == normalized)
    }

    /// Estimate assigned when a task is triaged into this bucket.
    pub fn default_minutes(self) -> u32 {
        match self {
            Self::Micro => 5,
            Self::Short => 20,
            Self::Medium => 45,
            Self::Long => 90,
        }
    }

    /// Classifies a precise estimate.
    pub fn from_minutes(minutes: u32) -> Self {
        match minutes {
            0..=10 => Self::Micro,
            11..=30 => Self::Short,
            31..=60 => Self::Medium,
            _ => Self::Long,
        }
    }

    /// Human label for the bucket range.
    pub fn range_label(self) -> &'static str {
        match self {
            Self::Micro => "up to 10 min",
            Self::Short => "11-30 min",
            Self::Medium => "31-60 min",
            Self::Long => "60+ min",
        }
    }
}

/// Minutes for a raw bucket label; unknown labels map to 25.
pub fn minutes_for_bucket_label(label: &str) -> u32 {
    TimeBucket::parse(label)
        .map(TimeBucket::default_minutes)
        .unwrap_or(UNKNOWN_BUCKET_MINUTES)
}

/// Independent task markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskFlags {
    pub quick: bool,
    /// Avoided task that should be tackled first.
    pub frog: bool,
    pub batchable: bool,
    pub fear: bool,
    pub waiting: bool,
}

/// One actionable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    /// Weak reference to the owning project (or the `inbox` sentinel).
    pub project_id: ProjectId,
    pub area: String,
    /// Execution context tag such as `desktop`, `phone` or `outdoor`.
    pub context: String,
    pub estimated_minutes: u32,
    pub time_bucket: TimeBucket,
    pub status: TaskStatus,
    pub flags: TaskFlags,
    pub created_at: DateTime<Utc>,
    pub due_date: Option<NaiveDate>,
    pub planned_date: Option<NaiveDate>,
    /// Set iff `status == done`.
    pub completed_at: Option<DateTime<Utc>>,
    pub priority: Priority,
}

impl Task {
    /// Returns whether the task counts as completed.
    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }
}
