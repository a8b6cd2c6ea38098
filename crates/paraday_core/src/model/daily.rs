//! Daily journal model.

use serde::{Deserialize, Serialize};

/// Stable habit identifier, `{date}::{line_offset}`.
pub type HabitId = String;

/// Block label for habits that appear before any level-2 heading.
pub const DEFAULT_HABIT_BLOCK: &str = "General habits";

/// One recurring checklist item inside a daily note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: HabitId,
    pub title: String,
    /// Heading under which the habit was found.
    pub block: String,
    pub done: bool,
}

/// One day's journal file.
///
/// `habits` keep source order; grouping by block is a derived view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyNote {
    /// Frontmatter `date`, else the file name without `.md`.
    pub date: String,
    pub file_name: String,
    pub habits: Vec<Habit>,
}

impl DailyNote {
    /// Counts completed habits.
    pub fn done_count(&self) -> usize {
        self.habits.iter().filter(|habit| habit.done).count()
    }
}
