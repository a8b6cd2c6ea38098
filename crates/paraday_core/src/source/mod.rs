//! Markdown file sources.
//!
//! # Responsibility
//! - Supply `(file_name, text)` pairs for one collection directory.
//! - Fail the whole batch on any read error so callers keep prior state.
//!
//! # Invariants
//! - Only names ending in `.md` (any case) are returned.
//! - A returned batch is complete; there are no partial results.

mod directory;
mod indexed;

pub use directory::DirectorySource;
pub use indexed::{IndexedSource, INDEX_FILE_NAME};

use crate::config::SourceMode;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// One markdown document read from a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub content: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Provider of markdown documents for one collection.
pub trait FileSource {
    /// Short description used in logs and error messages.
    fn describe(&self) -> String;
    /// Reads every markdown document, or fails as a whole.
    fn read_markdown_files(&self) -> Result<Vec<SourceFile>, SourceError>;
}

/// Builds the source matching `mode` for `dir`.
pub fn source_for(mode: SourceMode, dir: impl Into<PathBuf>) -> Box<dyn FileSource> {
    match mode {
        SourceMode::Directory => Box::new(DirectorySource::new(dir)),
        SourceMode::Indexed => Box::new(IndexedSource::new(dir)),
    }
}

/// Source read failure. Always covers the whole batch.
#[derive(Debug)]
pub enum SourceError {
    /// Directory listing failed.
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// One document could not be read.
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    /// `index.json` could not be read.
    ReadIndex {
        path: PathBuf,
        source: std::io::Error,
    },
    /// `index.json` is not valid JSON of the expected shape.
    InvalidIndex {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// `index.json` lists no files.
    EmptyIndex(PathBuf),
    /// Index entry escapes the source directory.
    InvalidEntry(String),
}

impl SourceError {
    pub(crate) fn read_file(path: &Path, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadDir { path, source } => {
                write!(f, "failed to list `{}`: {source}", path.display())
            }
            Self::ReadFile { path, source } => {
                write!(f, "failed to read `{}`: {source}", path.display())
            }
            Self::ReadIndex { path, source } => {
                write!(f, "failed to read index `{}`: {source}", path.display())
            }
            Self::InvalidIndex { path, source } => {
                write!(f, "invalid index `{}`: {source}", path.display())
            }
            Self::EmptyIndex(path) => {
                write!(f, "index `{}` does not list any files", path.display())
            }
            Self::InvalidEntry(entry) => write!(f, "index entry is not a plain file name: {entry}"),
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ReadDir { source, .. }
            | Self::ReadFile { source, .. }
            | Self::ReadIndex { source, .. } => Some(source),
            Self::InvalidIndex { source, .. } => Some(source),
            Self::EmptyIndex(_) | Self::InvalidEntry(_) => None,
        }
    }
}
