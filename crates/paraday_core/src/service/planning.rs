//! Smart Morning Planning.
//!
//! # Responsibility
//! - Offer `next` tasks as the candidate pool.
//! - Budget the selection against the recommended working day.
//! - Apply a plan as one all-or-nothing board update.
//!
//! # Invariants
//! - Only pool members are counted or scheduled.
//! - After apply, the board's single priority pointer names the chosen task.
//! - Without a valid priority nothing is applied.

use crate::model::task::{Task, TaskId, TaskStatus, TransitionKind};
use crate::service::task_board::TaskBoard;
use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::ops::RangeInclusive;

/// Above this many minutes the plan is flagged as overloaded.
pub const OVERLOAD_THRESHOLD_MINUTES: u32 = 240;
/// Lower bound of the recommended day.
pub const RECOMMENDED_MIN_MINUTES: u32 = 180;
/// Recommended number of support tasks.
pub const RECOMMENDED_SUPPORT_TASKS: RangeInclusive<usize> = 2..=5;

/// Operator selection for the day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MorningPlan {
    pub daily_priority: Option<TaskId>,
    pub support: Vec<TaskId>,
}

impl MorningPlan {
    /// Union of priority and support ids, priority first, duplicates dropped.
    pub fn selected_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.daily_priority
            .iter()
            .chain(self.support.iter())
            .map(String::as_str)
            .filter(|id| seen.insert(*id))
            .collect()
    }
}

/// Coarse reading of the selected minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanLoad {
    /// Below the recommended day.
    Light,
    /// Within 180-240 minutes.
    Balanced,
    /// More than 240 minutes.
    Overloaded,
}

/// Advisory budget for a plan. Never blocks [`apply_plan`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanBudget {
    pub total_minutes: u32,
    /// Selected ids found in the pool.
    pub selected: usize,
    /// Support ids found in the pool, excluding the priority.
    pub support: usize,
    pub load: PlanLoad,
}

impl PlanBudget {
    pub fn is_overloaded(&self) -> bool {
        self.load == PlanLoad::Overloaded
    }

    pub fn support_in_recommended_range(&self) -> bool {
        RECOMMENDED_SUPPORT_TASKS.contains(&self.support)
    }
}

/// Planning rejections. The board is never partially updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanningError {
    /// No daily priority was chosen.
    MissingDailyPriority,
    /// The chosen priority is not a `next` task on the board.
    PriorityNotCandidate(TaskId),
}

impl Display for PlanningError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDailyPriority => write!(f, "choose a daily priority before planning"),
            Self::PriorityNotCandidate(id) => {
                write!(f, "daily priority is not a next action: {id}")
            }
        }
    }
}

impl Error for PlanningError {}

/// Tasks eligible for planning: status exactly `next`, in board order.
pub fn candidate_pool(board: &TaskBoard) -> Vec<&Task> {
    board.with_status(TaskStatus::Next)
}

/// Sums the selection against the pool.
pub fn evaluate_plan(board: &TaskBoard, plan: &MorningPlan) -> PlanBudget {
    let selected: HashSet<&str> = plan.selected_ids().into_iter().collect();
    let chosen: Vec<&Task> = candidate_pool(board)
        .into_iter()
        .filter(|task| selected.contains(task.id.as_str()))
        .collect();

    let total_minutes = chosen
        .iter()
        .map(|task| task.estimated_minutes)
        .fold(0, u32::saturating_add);
    let support = chosen
        .iter()
        .filter(|task| plan.daily_priority.as_deref() != Some(task.id.as_str()))
        .count();

    PlanBudget {
        total_minutes,
        selected: chosen.len(),
        support,
        load: classify_load(total_minutes),
    }
}

/// Schedules the selection for today.
///
/// Selected pool tasks move to `planned_today` with `planned_date` set to
/// the current UTC date; previously planned tasks that were not selected
/// return to `next`; the priority pointer moves to the new priority.
pub fn apply_plan(
    board: &TaskBoard,
    plan: &MorningPlan,
    now: DateTime<Utc>,
) -> Result<TaskBoard, PlanningError> {
    let priority_id = plan
        .daily_priority
        .as_deref()
        .ok_or(PlanningError::MissingDailyPriority)?;
    let pool_ids: HashSet<&str> = candidate_pool(board)
        .into_iter()
        .map(|task| task.id.as_str())
        .collect();
    if !pool_ids.contains(priority_id) {
        return Err(PlanningError::PriorityNotCandidate(priority_id.to_string()));
    }

    let selected: HashSet<&str> = plan
        .selected_ids()
        .into_iter()
        .filter(|id| pool_ids.contains(id))
        .collect();
    let today = now.date_naive();
    let mut planned = 0usize;
    let mut released = 0usize;

    let tasks: Vec<Task> = board
        .tasks()
        .iter()
        .map(|task| {
            let mut updated = task.clone();
            if selected.contains(task.id.as_str())
                && task
                    .status
                    .permits(TransitionKind::PlanSelect, TaskStatus::PlannedToday)
            {
                updated.status = TaskStatus::PlannedToday;
                updated.planned_date = Some(today);
                planned += 1;
            } else if task.status == TaskStatus::PlannedToday
                && task
                    .status
                    .permits(TransitionKind::PlanRelease, TaskStatus::Next)
            {
                updated.status = TaskStatus::Next;
                released += 1;
            }
            updated
        })
        .collect();

    let budget = evaluate_plan(board, plan);
    info!(
        "event=plan_apply module=planning status=ok planned={} released={} total_minutes={} overloaded={}",
        planned,
        released,
        budget.total_minutes,
        budget.is_overloaded()
    );

    Ok(TaskBoard::from_parts(tasks, Some(priority_id.to_string())))
}

fn classify_load(total_minutes: u32) -> PlanLoad {
    if total_minutes > OVERLOAD_THRESHOLD_MINUTES {
        PlanLoad::Overloaded
    } else if total_minutes >= RECOMMENDED_MIN_MINUTES {
        PlanLoad::Balanced
    } else {
        PlanLoad::Light
    }
}
