use chrono::{TimeZone, Utc};
use paraday_core::parser::checklist::{extract_checklist, match_checklist_line};
use paraday_core::parser::daily_doc::parse_daily_document;
use paraday_core::parser::frontmatter::{parse_frontmatter, render_frontmatter};
use paraday_core::parser::project_doc::parse_project_document;
use paraday_core::{Priority, ProjectStatus, TaskStatus};
use std::collections::BTreeMap;

const LAUNCH_DOC: &str = "---\nid: launch\ntitle: Product launch\nstatus: waiting\npriority: high\narea: work\ndeadline: 2024-06-30\nprogress: 42.6\ncontext: phone\nestimatedMinutes: 90\n---\n# Product launch\n\nShip the beta to early users.\n\n- [x] Draft announcement\n- [ ] Book venue\n  - [ ] Confirm catering\n";

#[test]
fn project_document_populates_project_and_tasks() {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
    let parsed = parse_project_document("launch.md", LAUNCH_DOC, now);

    let project = &parsed.project;
    assert_eq!(project.id, "launch");
    assert_eq!(project.title, "Product launch");
    assert_eq!(project.status, ProjectStatus::Waiting);
    assert_eq!(project.priority, Priority::High);
    assert_eq!(project.progress, 43);
    assert_eq!(project.description, "Ship the beta to early users.");

    let ids: Vec<&str> = parsed.tasks.iter().map(|task| task.id.as_str()).collect();
    assert_eq!(ids, vec!["launch::4", "launch::5", "launch::6"]);

    let drafted = &parsed.tasks[0];
    assert_eq!(drafted.status, TaskStatus::Done);
    assert_eq!(drafted.completed_at, Some(now));
    assert_eq!(drafted.context, "phone");
    assert_eq!(drafted.estimated_minutes, 90);
    assert_eq!(drafted.area, "work");
    assert_eq!(drafted.due_date, project.deadline);

    let nested = &parsed.tasks[2];
    assert_eq!(nested.title, "Confirm catering");
    assert_eq!(nested.status, TaskStatus::Next);
    assert!(nested.completed_at.is_none());
}

#[test]
fn parsing_the_same_document_twice_is_identical() {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
    let first = parse_project_document("launch.md", LAUNCH_DOC, now);
    let second = parse_project_document("launch.md", LAUNCH_DOC, now);
    assert_eq!(first, second);
}

#[test]
fn headerless_project_falls_back_to_file_name_and_defaults() {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
    let parsed = parse_project_document(
        "garden.md",
        "---\nstatus: blooming\nprogress: lots\n---\n- [ ] Plant tulips\n",
        now,
    );
    assert_eq!(parsed.project.id, "garden");
    assert_eq!(parsed.project.title, "garden");
    assert_eq!(parsed.project.status, ProjectStatus::Active);
    assert_eq!(parsed.project.area, "general");
    assert_eq!(parsed.project.progress, 0);
    assert_eq!(parsed.tasks[0].estimated_minutes, 25);
    assert_eq!(parsed.tasks[0].context, "desk");
    assert_eq!(parsed.tasks[0].created_at, now);
}

#[test]
fn rendered_frontmatter_parses_back_to_the_same_header() {
    let pairs = [
        ("id", "launch"),
        ("title", "Launch: phase two"),
        ("area", "work"),
    ];
    let text = format!("{}body\n", render_frontmatter(&pairs));
    let parsed = parse_frontmatter(&text);

    let expected: BTreeMap<String, String> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    assert_eq!(parsed.header(), &expected);
    assert_eq!(parsed.body(), "body\n");
}

#[test]
fn checklist_lines_match_exactly() {
    assert_eq!(match_checklist_line("- [x] Buy milk"), Some((true, "Buy milk")));
    assert_eq!(match_checklist_line("- [ ] Call Bob"), Some((false, "Call Bob")));
    assert_eq!(match_checklist_line("-[ ] no space"), None);

    let items = extract_checklist("intro\n- [x] Buy milk\n\n- [ ] Call Bob\n-[ ] no space\n");
    let lines: Vec<usize> = items.iter().map(|item| item.line).collect();
    assert_eq!(lines, vec![1, 3]);
}

#[test]
fn daily_habits_are_grouped_under_level_two_headings() {
    let note = parse_daily_document(
        "2024-05-01.md",
        "- [x] Water\n## Morning\n- [ ] Stretch\n- [x] Journal\n## Evening\n- [ ] Read\n",
    );
    assert_eq!(note.date, "2024-05-01");
    let blocks: Vec<(&str, &str)> = note
        .habits
        .iter()
        .map(|habit| (habit.block.as_str(), habit.title.as_str()))
        .collect();
    assert_eq!(
        blocks,
        vec![
            ("General habits", "Water"),
            ("Morning", "Stretch"),
            ("Morning", "Journal"),
            ("Evening", "Read"),
        ]
    );
    assert_eq!(note.habits[1].id, "2024-05-01::2");
    assert_eq!(note.done_count(), 2);
}

#[test]
fn daily_frontmatter_date_wins_over_file_name() {
    let note = parse_daily_document("today.md", "---\ndate: 2024-02-29\n---\n- [ ] Walk\n");
    assert_eq!(note.date, "2024-02-29");
    assert_eq!(note.habits[0].id, "2024-02-29::0");
}
