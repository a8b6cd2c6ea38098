//! Project domain model.
//!
//! # Responsibility
//! - Define the canonical project record parsed from one markdown file.
//! - Provide stable string forms for status and priority values.
//!
//! # Invariants
//! - `id` is stable for the project lifetime.
//! - `progress` is always within `0..=100`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stable project identifier (a slug or a frontmatter `id`).
pub type ProjectId = String;

/// Sentinel project id for tasks captured without a project.
pub const INBOX_PROJECT_ID: &str = "inbox";

/// Area assigned when a document does not name one.
pub const DEFAULT_AREA: &str = "general";

/// PARA project status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Inbox,
    #[default]
    Active,
    Waiting,
    Paused,
    Someday,
    Done,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 6] = [
        Self::Inbox,
        Self::Active,
        Self::Waiting,
        Self::Paused,
        Self::Someday,
        Self::Done,
    ];

    /// Stable string used in frontmatter and serialized output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::Active => "active",
            Self::Waiting => "waiting",
            Self::Paused => "paused",
            Self::Someday => "someday",
            Self::Done => "done",
        }
    }

    /// Parses a frontmatter value. Unknown words return `None`.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
    }
}

/// Priority shared by projects and tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str() == normalized)
    }
}

/// One PARA project backed by a markdown file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Stable slug; derived once at parse or creation time.
    pub id: ProjectId,
    /// Source file name, `{id}.md` for newly created projects.
    pub file_name: String,
    pub title: String,
    pub status: ProjectStatus,
    pub priority: Priority,
    /// Free-text grouping (PARA area).
    pub area: String,
    pub deadline: Option<NaiveDate>,
    /// Completion percentage in `0..=100`.
    pub progress: u8,
    pub description: String,
}

impl Project {
    /// Returns the file name a new project with `id` is saved under.
    pub fn file_name_for(id: &str) -> String {
        format!("{id}.md")
    }
}
