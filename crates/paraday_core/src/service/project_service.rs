//! Project use-cases.
//!
//! # Responsibility
//! - Create and edit projects from form input.
//! - Render the markdown document offered for saving a new project.
//! - Filter and reorder the project list.
//!
//! # Invariants
//! - A project's `id` and `file_name` never change after creation.
//! - New projects get `file_name = "{id}.md"`.
//! - Project ids are unique within the list.

use crate::model::project::{Priority, Project, ProjectId, ProjectStatus, DEFAULT_AREA};
use crate::parser::frontmatter::render_frontmatter;
use crate::service::reorder::reorder_by_id;
use crate::slug::slugify;
use chrono::NaiveDate;
use log::info;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Checklist line written into every generated project document.
pub const PROJECT_DOCUMENT_PLACEHOLDER: &str = "Describe the next step";

/// Service error for project use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectServiceError {
    /// Title is blank after trim.
    EmptyTitle,
    /// Another project already uses this id.
    DuplicateId(ProjectId),
}

impl Display for ProjectServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "project title must not be blank"),
            Self::DuplicateId(id) => write!(f, "project id already exists: {id}"),
        }
    }
}

impl Error for ProjectServiceError {}

/// Form input for a new project.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectDraft {
    /// Explicit id; otherwise the slug of the title.
    pub id: Option<ProjectId>,
    pub title: String,
    pub status: ProjectStatus,
    pub priority: Priority,
    pub area: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub progress: u8,
    pub description: String,
}

/// Partial project update. `None` keeps the current value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub status: Option<ProjectStatus>,
    pub priority: Option<Priority>,
    pub area: Option<String>,
    pub deadline: Option<Option<NaiveDate>>,
    pub progress: Option<u8>,
    pub description: Option<String>,
}

/// Outcome of [`create_project`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedProject {
    /// Previous list with the new project appended.
    pub projects: Vec<Project>,
    pub project: Project,
    /// Markdown the operator can save as `project.file_name`.
    pub document: String,
}

/// Optional filters over the project list; `None` means "all".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectFilter {
    pub status: Option<ProjectStatus>,
    pub priority: Option<Priority>,
    pub area: Option<String>,
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        self.status.map_or(true, |status| project.status == status)
            && self.priority.map_or(true, |priority| project.priority == priority)
            && self.area.as_deref().map_or(true, |area| project.area == area)
    }

    pub fn apply<'a>(&self, projects: &'a [Project]) -> Vec<&'a Project> {
        projects.iter().filter(|project| self.matches(project)).collect()
    }
}

/// Creates a project and renders its document.
pub fn create_project(
    projects: &[Project],
    draft: ProjectDraft,
) -> Result<CreatedProject, ProjectServiceError> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(ProjectServiceError::EmptyTitle);
    }

    let id = match draft.id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
        Some(explicit) => explicit.to_string(),
        None => {
            let slug = slugify(title);
            if slug.is_empty() {
                Uuid::new_v4().to_string()
            } else {
                slug
            }
        }
    };
    if projects.iter().any(|project| project.id == id) {
        return Err(ProjectServiceError::DuplicateId(id));
    }

    let project = Project {
        file_name: Project::file_name_for(&id),
        id,
        title: title.to_string(),
        status: draft.status,
        priority: draft.priority,
        area: draft
            .area
            .map(|area| area.trim().to_string())
            .filter(|area| !area.is_empty())
            .unwrap_or_else(|| DEFAULT_AREA.to_string()),
        deadline: draft.deadline,
        progress: draft.progress.min(100),
        description: draft.description.trim().to_string(),
    };
    let document = render_project_document(&project);

    let mut next = projects.to_vec();
    next.push(project.clone());
    info!(
        "event=project_create module=project status=ok status_value={}",
        project.status.as_str()
    );

    Ok(CreatedProject {
        projects: next,
        project,
        document,
    })
}

/// Applies `patch` to the project with `project_id`.
///
/// Unknown ids return an unchanged copy of the list.
pub fn edit_project(projects: &[Project], project_id: &str, patch: ProjectPatch) -> Vec<Project> {
    projects
        .iter()
        .map(|project| {
            if project.id != project_id {
                return project.clone();
            }
            let mut updated = project.clone();
            if let Some(title) = patch.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
                updated.title = title.to_string();
            }
            if let Some(status) = patch.status {
                updated.status = status;
            }
            if let Some(priority) = patch.priority {
                updated.priority = priority;
            }
            if let Some(area) = patch.area.as_deref().map(str::trim).filter(|a| !a.is_empty()) {
                updated.area = area.to_string();
            }
            if let Some(deadline) = patch.deadline {
                updated.deadline = deadline;
            }
            if let Some(progress) = patch.progress {
                updated.progress = progress.min(100);
            }
            if let Some(description) = patch.description.as_ref() {
                updated.description = description.trim().to_string();
            }
            updated
        })
        .collect()
}

/// Moves `source_id` to `target_id`'s position in the project list.
pub fn reorder_projects(projects: Vec<Project>, source_id: &str, target_id: &str) -> Vec<Project> {
    reorder_by_id(projects, source_id, target_id)
}

/// Distinct areas in first-appearance order.
pub fn distinct_areas(projects: &[Project]) -> Vec<&str> {
    let mut seen = BTreeSet::new();
    projects
        .iter()
        .map(|project| project.area.as_str())
        .filter(|area| seen.insert(*area))
        .collect()
}

/// Renders the markdown document for a project.
///
/// Layout: frontmatter (`deadline` and `description` only when set), a blank
/// line, the title heading, a blank line, one open checklist placeholder.
pub fn render_project_document(project: &Project) -> String {
    let mut pairs: Vec<(&str, String)> = vec![
        ("id", project.id.clone()),
        ("title", project.title.clone()),
        ("status", project.status.as_str().to_string()),
        ("priority", project.priority.as_str().to_string()),
        ("area", project.area.clone()),
    ];
    if let Some(deadline) = project.deadline {
        pairs.push(("deadline", deadline.format("%Y-%m-%d").to_string()));
    }
    pairs.push(("progress", project.progress.to_string()));
    if !project.description.is_empty() {
        pairs.push(("description", project.description.clone()));
    }

    format!(
        "{}\n# {}\n\n- [ ] {}\n",
        render_frontmatter(&pairs),
        project.title,
        PROJECT_DOCUMENT_PLACEHOLDER
    )
}
