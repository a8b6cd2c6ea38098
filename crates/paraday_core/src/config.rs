//! Workspace configuration.
//!
//! Values come from an optional JSON file, then `PARADAY_*` environment
//! variables on top. Blank strings count as unset in both layers.

use crate::logging::default_log_level;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_PROJECTS_DIR: &str = "PARADAY_PROJECTS_DIR";
pub const ENV_AREAS_DIR: &str = "PARADAY_AREAS_DIR";
pub const ENV_DAILY_DIR: &str = "PARADAY_DAILY_DIR";
pub const ENV_SOURCE_MODE: &str = "PARADAY_SOURCE_MODE";
pub const ENV_LOG_LEVEL: &str = "PARADAY_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "PARADAY_LOG_DIR";

/// How markdown documents are discovered in a collection directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceMode {
    /// List the directory.
    #[default]
    Directory,
    /// Read the names from `index.json`.
    Indexed,
}

impl SourceMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::Indexed => "indexed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "directory" => Some(Self::Directory),
            "indexed" => Some(Self::Indexed),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidSourceMode(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse config `{}`: {source}", path.display())
            }
            Self::InvalidSourceMode(value) => write!(
                f,
                "unsupported source mode `{value}`; expected directory|indexed"
            ),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::InvalidSourceMode(_) => None,
        }
    }
}

/// Where the planner finds its documents and writes its logs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    pub projects_dir: Option<PathBuf>,
    pub areas_dir: Option<PathBuf>,
    pub daily_dir: Option<PathBuf>,
    pub source_mode: SourceMode,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl WorkspaceConfig {
    /// Reads a JSON config file. Missing keys take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config.normalized())
    }

    /// Applies `PARADAY_*` variables from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`, keyed by the `PARADAY_*` names.
    pub fn with_overrides_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).and_then(non_blank);

        if let Some(dir) = get(ENV_PROJECTS_DIR) {
            self.projects_dir = Some(PathBuf::from(dir));
        }
        if let Some(dir) = get(ENV_AREAS_DIR) {
            self.areas_dir = Some(PathBuf::from(dir));
        }
        if let Some(dir) = get(ENV_DAILY_DIR) {
            self.daily_dir = Some(PathBuf::from(dir));
        }
        if let Some(mode) = get(ENV_SOURCE_MODE) {
            self.source_mode =
                SourceMode::parse(&mode).ok_or(ConfigError::InvalidSourceMode(mode))?;
        }
        if let Some(level) = get(ENV_LOG_LEVEL) {
            self.log_level = Some(level);
        }
        if let Some(dir) = get(ENV_LOG_DIR) {
            self.log_dir = Some(PathBuf::from(dir));
        }
        Ok(self)
    }

    /// Configured level, or the build default.
    pub fn effective_log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(default_log_level())
    }

    /// Configured directories as `(label, path)`, sorted by label.
    pub fn path_hints(&self) -> Vec<(&'static str, &Path)> {
        let mut hints: Vec<(&'static str, &Path)> = [
            ("areas", self.areas_dir.as_deref()),
            ("daily", self.daily_dir.as_deref()),
            ("logs", self.log_dir.as_deref()),
            ("projects", self.projects_dir.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, path)| path.map(|path| (label, path)))
        .collect();
        hints.sort_by_key(|(label, _)| *label);
        hints
    }

    fn normalized(mut self) -> Self {
        self.log_level = self.log_level.and_then(non_blank);
        for dir in [
            &mut self.projects_dir,
            &mut self.areas_dir,
            &mut self.daily_dir,
            &mut self.log_dir,
        ] {
            if dir.as_ref().is_some_and(|path| path.as_os_str().is_empty()) {
                *dir = None;
            }
        }
        self
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
