//! Inbox processing session.
//!
//! # Responsibility
//! - Walk `inbox` tasks first-in-first-served in board order.
//! - Commit triage decisions through [`TaskBoard::commit_processing`].
//!
//! # Invariants
//! - Skipping never mutates a task; skipped tasks stay in `inbox` and are
//!   revisited only after [`ProcessingSession::restart`].
//! - The session stores ids only, so any board snapshot can be passed in.

use crate::model::project::DEFAULT_AREA;
use crate::model::task::{Task, TaskId, TaskStatus, TimeBucket};
use crate::service::task_board::{
    LifecycleError, ProcessingDecision, TaskBoard, DEFAULT_MANUAL_CONTEXT,
};
use chrono::{DateTime, Utc};
use log::debug;
use std::collections::HashSet;

/// Pre-filled triage choices before the operator changes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingDraft {
    pub area: String,
    pub context: String,
    pub time_bucket: TimeBucket,
}

impl Default for ProcessingDraft {
    fn default() -> Self {
        Self {
            area: DEFAULT_AREA.to_string(),
            context: DEFAULT_MANUAL_CONTEXT.to_string(),
            time_bucket: TimeBucket::Short,
        }
    }
}

impl ProcessingDraft {
    /// Combines the draft with a target status.
    pub fn decide(&self, target: TaskStatus) -> ProcessingDecision {
        ProcessingDecision {
            area: self.area.clone(),
            context: self.context.clone(),
            time_bucket: self.time_bucket,
            target,
        }
    }
}

/// Cursor over the inbox queue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingSession {
    skipped: HashSet<TaskId>,
    committed: usize,
}

impl ProcessingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// First inbox task in board order that was not skipped.
    pub fn current<'b>(&self, board: &'b TaskBoard) -> Option<&'b Task> {
        self.pending(board).into_iter().next()
    }

    /// Inbox tasks still waiting in this pass.
    pub fn pending<'b>(&self, board: &'b TaskBoard) -> Vec<&'b Task> {
        board
            .with_status(TaskStatus::Inbox)
            .into_iter()
            .filter(|task| !self.skipped.contains(&task.id))
            .collect()
    }

    /// Number of decisions committed in this session.
    pub fn committed(&self) -> usize {
        self.committed
    }

    /// Number of tasks skipped in this pass.
    pub fn skipped(&self) -> usize {
        self.skipped.len()
    }

    /// Returns whether nothing is left to process in this pass.
    pub fn is_finished(&self, board: &TaskBoard) -> bool {
        self.current(board).is_none()
    }

    /// Commits `decision` for the current task and returns the new board.
    ///
    /// With an empty queue the board is returned unchanged.
    pub fn commit(
        &mut self,
        board: &TaskBoard,
        decision: &ProcessingDecision,
        now: DateTime<Utc>,
    ) -> Result<TaskBoard, LifecycleError> {
        let Some(task_id) = self.current(board).map(|task| task.id.clone()) else {
            return Ok(board.clone());
        };
        let next_board = board.commit_processing(&task_id, decision, now)?;
        self.committed += 1;
        Ok(next_board)
    }

    /// Moves past the current task without touching it.
    pub fn skip(&mut self, board: &TaskBoard) {
        if let Some(task) = self.current(board) {
            debug!("event=inbox_skip module=processing status=ok");
            self.skipped.insert(task.id.clone());
        }
    }

    /// Starts over from the top of the inbox, revisiting skipped tasks.
    pub fn restart(&mut self) {
        self.skipped.clear();
        self.committed = 0;
    }
}
