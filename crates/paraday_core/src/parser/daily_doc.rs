//! Daily journal assembly.

use crate::model::daily::{DailyNote, Habit, DEFAULT_HABIT_BLOCK};
use crate::parser::checklist::match_checklist_line;
use crate::parser::frontmatter::parse_frontmatter;
use crate::parser::strip_markdown_suffix;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static H2_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^##\s+(.+)$").expect("valid h2 regex"));

/// Builds the habit id for a body line.
pub fn habit_id(date: &str, line: usize) -> String {
    format!("{date}::{line}")
}

/// Parses one daily note.
///
/// Habits are tagged with the most recent level-2 heading above them and
/// keep their source order.
pub fn parse_daily_document(file_name: &str, text: &str) -> DailyNote {
    let doc = parse_frontmatter(text);
    let date = doc
        .value("date")
        .unwrap_or_else(|| strip_markdown_suffix(file_name))
        .to_string();

    let mut current_block = DEFAULT_HABIT_BLOCK.to_string();
    let mut habits = Vec::new();

    for (line, raw) in doc.body().lines().enumerate() {
        let trimmed = raw.trim();
        if let Some(caps) = H2_RE.captures(trimmed) {
            current_block = caps[1].trim().to_string();
            continue;
        }
        if let Some((done, title)) = match_checklist_line(trimmed) {
            habits.push(Habit {
                id: habit_id(&date, line),
                title: title.to_string(),
                block: current_block.clone(),
                done,
            });
        }
    }

    debug!(
        "event=daily_parse module=parser status=ok habits={}",
        habits.len()
    );

    DailyNote {
        date,
        file_name: file_name.to_string(),
        habits,
    }
}
