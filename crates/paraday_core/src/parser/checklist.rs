//! Checklist line extraction.
//!
//! # Invariants
//! - Matching happens on the trimmed line: `- [<c>] <text>`.
//! - Only a lowercase `x` marks an item as done.
//! - `line` is the 0-based line offset inside the scanned text.

use once_cell::sync::Lazy;
use regex::Regex;

static CHECKLIST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^- \[(.)\] (.+)$").expect("valid checklist regex"));

const DONE_MARKER: &str = "x";

/// One matched checklist line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistItem<'a> {
    /// 0-based line offset in the scanned text.
    pub line: usize,
    pub done: bool,
    pub title: &'a str,
}

/// Matches one line against the checklist pattern.
///
/// Returns `(done, title)` on a match.
pub fn match_checklist_line(line: &str) -> Option<(bool, &str)> {
    let caps = CHECKLIST_RE.captures(line.trim())?;
    let marker = caps.get(1)?.as_str();
    let title = caps.get(2)?.as_str();
    Some((marker == DONE_MARKER, title))
}

/// Extracts every checklist item from `body` in source order.
pub fn extract_checklist(body: &str) -> Vec<ChecklistItem<'_>> {
    body.lines()
        .enumerate()
        .filter_map(|(line, text)| {
            match_checklist_line(text).map(|(done, title)| ChecklistItem { line, done, title })
        })
        .collect()
}
