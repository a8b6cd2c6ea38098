//! Project document assembly.
//!
//! # Responsibility
//! - Build one [`Project`] from a markdown file's frontmatter and body.
//! - Turn every checklist line into a [`Task`] owned by that project.
//!
//! # Invariants
//! - Task ids are `{project_id}::{line_offset}`; re-parsing is idempotent.
//! - Missing or malformed header values fall back to documented defaults.

use crate::model::project::{Priority, Project, ProjectId, ProjectStatus, DEFAULT_AREA};
use crate::model::task::{
    Task, TaskFlags, TaskStatus, TimeBucket, MAX_ESTIMATED_MINUTES, UNKNOWN_BUCKET_MINUTES,
};
use crate::parser::checklist::extract_checklist;
use crate::parser::frontmatter::{parse_frontmatter, Frontmatter};
use crate::parser::{parse_date, parse_timestamp, strip_markdown_suffix};
use chrono::{DateTime, NaiveDate, Utc};
use log::debug;

/// Context assigned to checklist tasks when the header names none.
pub const DEFAULT_TASK_CONTEXT: &str = "desk";

/// Result of parsing one project file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedProject {
    pub project: Project,
    /// Checklist tasks in source order.
    pub tasks: Vec<Task>,
}

/// Builds the checklist-derived task id.
pub fn checklist_task_id(project_id: &str, line: usize) -> String {
    format!("{project_id}::{line}")
}

/// Parses one project file.
///
/// `now` stamps `created_at` (when the header has no `createdAt`) and
/// `completed_at` for checked items.
pub fn parse_project_document(file_name: &str, text: &str, now: DateTime<Utc>) -> ParsedProject {
    let doc = parse_frontmatter(text);
    let project_id: ProjectId = doc
        .value("id")
        .map(str::to_string)
        .unwrap_or_else(|| strip_markdown_suffix(file_name).to_string());

    let project = build_project(&doc, file_name, &project_id);
    let tasks = build_tasks(&doc, &project, now);

    debug!(
        "event=project_parse module=parser status=ok header_keys={} tasks={}",
        doc.header().len(),
        tasks.len()
    );

    ParsedProject { project, tasks }
}

/// First non-empty line of `body` that is not a heading.
pub fn extract_description(body: &str) -> String {
    body.lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .unwrap_or_default()
        .to_string()
}

fn build_project(doc: &Frontmatter<'_>, file_name: &str, project_id: &str) -> Project {
    let status = match doc.value("status") {
        Some(raw) => ProjectStatus::parse(raw).unwrap_or_else(|| {
            debug!("event=project_parse module=parser status=recovered field=status");
            ProjectStatus::default()
        }),
        None => ProjectStatus::default(),
    };

    Project {
        id: project_id.to_string(),
        file_name: file_name.to_string(),
        title: doc.value("title").unwrap_or(project_id).to_string(),
        status,
        priority: header_priority(doc),
        area: doc.value("area").unwrap_or(DEFAULT_AREA).to_string(),
        deadline: header_date(doc, "deadline"),
        progress: parse_progress(doc.value("progress")),
        description: doc
            .value("description")
            .map(str::to_string)
            .unwrap_or_else(|| extract_description(doc.body())),
    }
}

fn build_tasks(doc: &Frontmatter<'_>, project: &Project, now: DateTime<Utc>) -> Vec<Task> {
    let context = doc.value("context").unwrap_or(DEFAULT_TASK_CONTEXT);
    let estimated_minutes = parse_estimated_minutes(doc.value("estimatedMinutes"));
    let created_at = doc
        .value("createdAt")
        .and_then(parse_timestamp)
        .unwrap_or(now);

    extract_checklist(doc.body())
        .into_iter()
        .map(|item| Task {
            id: checklist_task_id(&project.id, item.line),
            title: item.title.to_string(),
            description: None,
            project_id: project.id.clone(),
            area: project.area.clone(),
            context: context.to_string(),
            estimated_minutes,
            time_bucket: TimeBucket::Short,
            status: if item.done {
                TaskStatus::Done
            } else {
                TaskStatus::Next
            },
            flags: TaskFlags::default(),
            created_at,
            due_date: project.deadline,
            planned_date: None,
            completed_at: item.done.then_some(now),
            priority: project.priority,
        })
        .collect()
}

fn header_priority(doc: &Frontmatter<'_>) -> Priority {
    doc.value("priority")
        .and_then(Priority::parse)
        .unwrap_or_default()
}

fn header_date(doc: &Frontmatter<'_>, key: &str) -> Option<NaiveDate> {
    let raw = doc.value(key)?;
    let parsed = parse_date(raw);
    if parsed.is_none() {
        debug!("event=project_parse module=parser status=recovered field={key}");
    }
    parsed
}

/// Parses `progress`; non-numeric input reads as 0, values clamp to 0..=100.
pub(crate) fn parse_progress(raw: Option<&str>) -> u8 {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .map(|value| value.round().clamp(0.0, 100.0) as u8)
        .unwrap_or(0)
}

/// Parses `estimatedMinutes`; anything but an integer in
/// `1..=MAX_ESTIMATED_MINUTES` reads as 25.
pub(crate) fn parse_estimated_minutes(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|minutes| (1..=MAX_ESTIMATED_MINUTES).contains(minutes))
        .unwrap_or(UNKNOWN_BUCKET_MINUTES)
}

#[cfg(test)]
mod tests {
    use super::{extract_description, parse_estimated_minutes, parse_progress};

    #[test]
    fn description_skips_blank_and_heading_lines() {
        let body = "\n# Title\n\n  ## Sub\n  First real line  \nsecond";
        assert_eq!(extract_description(body), "First real line");
        assert_eq!(extract_description("# only heading"), "");
    }

    #[test]
    fn progress_recovers_from_bad_input() {
        assert_eq!(parse_progress(Some("40")), 40);
        assert_eq!(parse_progress(Some("62.6")), 63);
        assert_eq!(parse_progress(Some("250")), 100);
        assert_eq!(parse_progress(Some("-5")), 0);
        assert_eq!(parse_progress(Some("half")), 0);
        assert_eq!(parse_progress(None), 0);
    }

    #[test]
    fn estimated_minutes_default_to_25() {
        assert_eq!(parse_estimated_minutes(Some("40")), 40);
        assert_eq!(parse_estimated_minutes(Some("0")), 25);
        assert_eq!(parse_estimated_minutes(Some("1440")), 1440);
        assert_eq!(parse_estimated_minutes(Some("1441")), 25);
        assert_eq!(parse_estimated_minutes(Some("4000000000")), 25);
        assert_eq!(parse_estimated_minutes(Some("soon")), 25);
        assert_eq!(parse_estimated_minutes(None), 25);
    }
}
