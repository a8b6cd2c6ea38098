//! In-memory workspace state.
//!
//! # Responsibility
//! - Hold the project list, the task board and the daily notes.
//! - Replace a collection only after its whole source batch was read.
//!
//! # Invariants
//! - A failed reload leaves every collection untouched.
//! - `selected_project`, when set, names a loaded project.

use crate::model::daily::DailyNote;
use crate::model::project::{Project, ProjectId, INBOX_PROJECT_ID};
use crate::parser::daily_doc::parse_daily_document;
use crate::parser::project_doc::parse_project_document;
use crate::service::daily_service::sort_newest_first;
use crate::service::task_board::TaskBoard;
use crate::source::{FileSource, SourceError, SourceFile};
use chrono::{DateTime, Utc};
use log::info;
use std::time::Instant;

/// Projects with their checklist tasks, in file order.
pub fn load_project_files(files: &[SourceFile], now: DateTime<Utc>) -> (Vec<Project>, TaskBoard) {
    let mut projects = Vec::with_capacity(files.len());
    let mut tasks = Vec::new();
    for file in files {
        let parsed = parse_project_document(&file.name, &file.content, now);
        projects.push(parsed.project);
        tasks.extend(parsed.tasks);
    }
    (projects, TaskBoard::new(tasks))
}

/// Daily notes sorted newest first.
pub fn load_daily_files(files: &[SourceFile]) -> Vec<DailyNote> {
    let mut notes: Vec<DailyNote> = files
        .iter()
        .map(|file| parse_daily_document(&file.name, &file.content))
        .collect();
    sort_newest_first(&mut notes);
    notes
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workspace {
    projects: Vec<Project>,
    board: TaskBoard,
    daily_notes: Vec<DailyNote>,
    selected_project: Option<ProjectId>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn board(&self) -> &TaskBoard {
        &self.board
    }

    pub fn daily_notes(&self) -> &[DailyNote] {
        &self.daily_notes
    }

    pub fn selected_project(&self) -> Option<&Project> {
        let id = self.selected_project.as_deref()?;
        self.projects.iter().find(|project| project.id == id)
    }

    /// Re-reads projects and their tasks.
    ///
    /// A selection that is still loaded is kept, otherwise the first project
    /// becomes the selection. The daily priority survives when its task id
    /// is still present and eligible.
    pub fn reload_projects(
        &mut self,
        source: &dyn FileSource,
        now: DateTime<Utc>,
    ) -> Result<(), SourceError> {
        let started_at = Instant::now();
        let files = source.read_markdown_files()?;
        let (projects, board) = load_project_files(&files, now);

        let priority = self.board.daily_priority_id().map(str::to_string);
        self.board = TaskBoard::from_parts(board.tasks().to_vec(), priority);
        self.set_projects(projects);

        info!(
            "event=workspace_reload module=workspace status=ok collection=projects source={} projects={} tasks={} duration_ms={}",
            source.describe(),
            self.projects.len(),
            self.board.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    /// Re-reads daily notes.
    pub fn reload_daily(&mut self, source: &dyn FileSource) -> Result<(), SourceError> {
        let started_at = Instant::now();
        let files = source.read_markdown_files()?;
        self.daily_notes = load_daily_files(&files);

        info!(
            "event=workspace_reload module=workspace status=ok collection=daily source={} notes={} duration_ms={}",
            source.describe(),
            self.daily_notes.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    pub fn set_projects(&mut self, projects: Vec<Project>) {
        let selected_still_present = self
            .selected_project
            .as_deref()
            .is_some_and(|id| projects.iter().any(|project| project.id == id));
        if !selected_still_present {
            self.selected_project = projects.first().map(|project| project.id.clone());
        }
        self.projects = projects;
    }

    pub fn set_board(&mut self, board: TaskBoard) {
        self.board = board;
    }

    pub fn set_daily_notes(&mut self, notes: Vec<DailyNote>) {
        self.daily_notes = notes;
    }

    /// Selects a loaded project. Unknown ids leave the selection unchanged.
    pub fn select_project(&mut self, project_id: &str) -> bool {
        if self.projects.iter().any(|project| project.id == project_id) {
            self.selected_project = Some(project_id.to_string());
            return true;
        }
        false
    }

    /// Owner for tasks created without an explicit project: the selection,
    /// else the first project, else the `inbox` sentinel.
    pub fn default_project_for_new_task(&self) -> &str {
        self.selected_project
            .as_deref()
            .or_else(|| self.projects.first().map(|project| project.id.as_str()))
            .unwrap_or(INBOX_PROJECT_ID)
    }
}

#[cfg(test)]
mod tests {
    use super::{load_daily_files, load_project_files, Workspace};
    use crate::model::project::INBOX_PROJECT_ID;
    use crate::source::{FileSource, SourceError, SourceFile};
    use chrono::{TimeZone, Utc};

    struct FixedSource(Vec<SourceFile>);

    impl FileSource for FixedSource {
        fn describe(&self) -> String {
            "fixed".to_string()
        }

        fn read_markdown_files(&self) -> Result<Vec<SourceFile>, SourceError> {
            Ok(self.0.clone())
        }
    }

    struct BrokenSource;

    impl FileSource for BrokenSource {
        fn describe(&self) -> String {
            "broken".to_string()
        }

        fn read_markdown_files(&self) -> Result<Vec<SourceFile>, SourceError> {
            Err(SourceError::InvalidEntry("../escape.md".to_string()))
        }
    }

    fn project_file(id: &str) -> SourceFile {
        SourceFile::new(
            format!("{id}.md"),
            format!("---\nid: {id}\ntitle: {id}\n---\n- [ ] first\n- [x] second\n"),
        )
    }

    #[test]
    fn project_files_flatten_tasks_in_file_order() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let (projects, board) = load_project_files(&[project_file("a"), project_file("b")], now);
        assert_eq!(projects.len(), 2);
        let ids: Vec<&str> = board.tasks().iter().map(|task| task.id.as_str()).collect();
        assert_eq!(ids, vec!["a::0", "a::1", "b::0", "b::1"]);
    }

    #[test]
    fn daily_files_sort_newest_first() {
        let notes = load_daily_files(&[
            SourceFile::new("2024-01-01.md", "- [ ] walk\n"),
            SourceFile::new("2024-03-01.md", "- [ ] walk\n"),
        ]);
        assert_eq!(notes[0].date, "2024-03-01");
    }

    #[test]
    fn failed_reload_keeps_previous_collections() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let mut workspace = Workspace::new();
        workspace
            .reload_projects(&FixedSource(vec![project_file("a")]), now)
            .expect("fixed source reads");
        assert_eq!(workspace.selected_project().map(|p| p.id.as_str()), Some("a"));

        let err = workspace.reload_projects(&BrokenSource, now);
        assert!(err.is_err());
        assert_eq!(workspace.projects().len(), 1);
        assert_eq!(workspace.board().len(), 2);

        assert!(workspace.reload_daily(&BrokenSource).is_err());
        assert!(workspace.daily_notes().is_empty());
    }

    #[test]
    fn new_tasks_default_to_selection_or_inbox() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let mut workspace = Workspace::new();
        assert_eq!(workspace.default_project_for_new_task(), INBOX_PROJECT_ID);

        workspace
            .reload_projects(&FixedSource(vec![project_file("a"), project_file("b")]), now)
            .expect("fixed source reads");
        assert!(workspace.select_project("b"));
        assert!(!workspace.select_project("missing"));
        assert_eq!(workspace.default_project_for_new_task(), "b");
    }

    #[test]
    fn reload_keeps_a_selection_that_is_still_loaded() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let mut workspace = Workspace::new();
        let both = FixedSource(vec![project_file("a"), project_file("b")]);
        workspace.reload_projects(&both, now).expect("fixed source reads");
        assert!(workspace.select_project("b"));

        workspace.reload_projects(&both, now).expect("fixed source reads");
        assert_eq!(workspace.selected_project().map(|p| p.id.as_str()), Some("b"));

        let only_a = FixedSource(vec![project_file("a")]);
        workspace.reload_projects(&only_a, now).expect("fixed source reads");
        assert_eq!(workspace.selected_project().map(|p| p.id.as_str()), Some("a"));
    }
}
