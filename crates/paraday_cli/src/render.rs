//! Plain text output.

use paraday_core::service::daily_service::group_habits_by_block;
use paraday_core::service::overview::{DashboardSummary, StatusColumn};
use paraday_core::{DailyNote, PlanBudget, Project, Task, TaskBoard};
use std::fmt::Write;
use std::path::Path;

pub fn paths(hints: &[(&'static str, &Path)]) -> String {
    if hints.is_empty() {
        return "no directories configured\n".to_string();
    }
    let mut out = String::new();
    for (label, path) in hints {
        let _ = writeln!(out, "{label:<10} {}", path.display());
    }
    out
}

pub fn summary(summary: &DashboardSummary<'_>) -> String {
    let mut out = String::new();
    if let Some(task) = summary.daily_priority {
        let _ = writeln!(out, "Daily priority: {} ({})", task.title, task.id);
    }
    let _ = writeln!(out, "Inbox: {}", summary.inbox_count);
    let _ = writeln!(out, "Areas: {}", summary.areas.join(", "));

    let _ = writeln!(out, "\nActive projects ({})", summary.active_projects.len());
    out.push_str(&projects(&summary.active_projects));
    let _ = writeln!(out, "\nToday ({})", summary.today_tasks.len());
    out.push_str(&tasks(&summary.today_tasks));
    let _ = writeln!(out, "\nNext actions ({})", summary.next_actions.len());
    out.push_str(&tasks(&summary.next_actions));
    out
}

pub fn projects(projects: &[&Project]) -> String {
    let mut out = String::new();
    for project in projects {
        let _ = write!(
            out,
            "  {:<24} {:<8} {:<6} {:>3}% [{}]",
            project.id,
            project.status.as_str(),
            project.priority.as_str(),
            project.progress,
            project.area
        );
        if let Some(deadline) = project.deadline {
            let _ = write!(out, " due {deadline}");
        }
        out.push('\n');
    }
    out
}

pub fn tasks(tasks: &[&Task]) -> String {
    let mut out = String::new();
    for task in tasks {
        let mark = if task.is_done() { "x" } else { " " };
        let _ = writeln!(
            out,
            "  [{mark}] {:<28} {:>3}m @{} ({})",
            task.title, task.estimated_minutes, task.context, task.id
        );
    }
    out
}

pub fn status_board(columns: &[StatusColumn<'_>]) -> String {
    let mut out = String::new();
    for column in columns {
        let _ = writeln!(out, "{} ({})", column.label, column.tasks.len());
        out.push_str(&tasks(&column.tasks));
    }
    out
}

pub fn daily(note: &DailyNote) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}: {}/{} habits done",
        note.date,
        note.done_count(),
        note.habits.len()
    );
    for block in group_habits_by_block(note) {
        let _ = writeln!(out, "\n{}", block.name);
        for habit in block.habits {
            let mark = if habit.done { "x" } else { " " };
            let _ = writeln!(out, "  [{mark}] {} ({})", habit.title, habit.id);
        }
    }
    out
}

pub fn budget(budget: &PlanBudget) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Planned {} min across {} tasks ({} support)",
        budget.total_minutes, budget.selected, budget.support
    );
    if budget.is_overloaded() {
        out.push_str("Warning: more than 4 hours planned\n");
    }
    if !budget.support_in_recommended_range() {
        out.push_str("Hint: pick 2 to 5 support tasks\n");
    }
    out
}

pub fn today(board: &TaskBoard) -> String {
    let mut out = String::from("\nToday\n");
    for task in board.tasks().iter().filter(|task| task.status.is_today()) {
        let marker = if board.is_daily_priority(&task.id) { "*" } else { " " };
        let _ = writeln!(
            out,
            " {marker} {:<28} {:>3}m ({})",
            task.title, task.estimated_minutes, task.id
        );
    }
    out
}
