//! Daily journal use-cases.

use crate::model::daily::{DailyNote, Habit};
use serde::Serialize;

/// Habits sharing one heading block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitBlock<'a> {
    pub name: &'a str,
    pub habits: Vec<&'a Habit>,
}

/// Sorts notes by `date` descending (plain string order).
pub fn sort_newest_first(notes: &mut [DailyNote]) {
    notes.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Note with the greatest `date`.
pub fn latest_note(notes: &[DailyNote]) -> Option<&DailyNote> {
    notes.iter().max_by(|a, b| a.date.cmp(&b.date))
}

/// Flips `done` on the habit with `habit_id` in whichever note holds it.
pub fn toggle_habit(notes: &[DailyNote], habit_id: &str) -> Vec<DailyNote> {
    notes
        .iter()
        .map(|note| {
            let mut note = note.clone();
            for habit in note.habits.iter_mut().filter(|habit| habit.id == habit_id) {
                habit.done = !habit.done;
            }
            note
        })
        .collect()
}

/// Groups habits by block in first-appearance order.
pub fn group_habits_by_block(note: &DailyNote) -> Vec<HabitBlock<'_>> {
    let mut blocks: Vec<HabitBlock<'_>> = Vec::new();
    for habit in &note.habits {
        match blocks.iter_mut().find(|block| block.name == habit.block) {
            Some(block) => block.habits.push(habit),
            None => blocks.push(HabitBlock {
                name: &habit.block,
                habits: vec![habit],
            }),
        }
    }
    blocks
}
