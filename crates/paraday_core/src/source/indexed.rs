use super::{FileSource, SourceError, SourceFile};
use crate::parser::is_markdown_file_name;
use log::{error, info};
use serde::Deserialize;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::Instant;

/// Name of the index listing a directory's documents.
pub const INDEX_FILE_NAME: &str = "index.json";

#[derive(Debug, Deserialize)]
struct IndexFile {
    #[serde(default)]
    files: Vec<String>,
}

/// Reads the documents listed by `<dir>/index.json`.
///
/// The index has the shape `{"files": ["a.md", ...]}`. Entries without a
/// `.md` suffix are skipped; any listed document that cannot be read fails
/// the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedSource {
    dir: PathBuf,
}

impl IndexedSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn read_index(&self) -> Result<Vec<String>, SourceError> {
        let index_path = self.dir.join(INDEX_FILE_NAME);
        let raw = fs::read_to_string(&index_path).map_err(|source| SourceError::ReadIndex {
            path: index_path.clone(),
            source,
        })?;
        let index: IndexFile =
            serde_json::from_str(&raw).map_err(|source| SourceError::InvalidIndex {
                path: index_path.clone(),
                source,
            })?;
        if index.files.is_empty() {
            return Err(SourceError::EmptyIndex(index_path));
        }
        Ok(index.files)
    }

    fn read_all(&self) -> Result<Vec<SourceFile>, SourceError> {
        let mut files = Vec::new();
        for name in self.read_index()? {
            if !is_markdown_file_name(&name) {
                continue;
            }
            if !is_plain_relative(&name) {
                return Err(SourceError::InvalidEntry(name));
            }
            let path = self.dir.join(&name);
            let content =
                fs::read_to_string(&path).map_err(|err| SourceError::read_file(&path, err))?;
            files.push(SourceFile { name, content });
        }
        Ok(files)
    }
}

fn is_plain_relative(name: &str) -> bool {
    Path::new(name)
        .components()
        .all(|component| matches!(component, Component::Normal(_)))
}

impl FileSource for IndexedSource {
    fn describe(&self) -> String {
        format!("index {}", self.dir.join(INDEX_FILE_NAME).display())
    }

    fn read_markdown_files(&self) -> Result<Vec<SourceFile>, SourceError> {
        let started_at = Instant::now();
        match self.read_all() {
            Ok(files) => {
                info!(
                    "event=source_read module=source status=ok kind=indexed files={} duration_ms={}",
                    files.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(files)
            }
            Err(err) => {
                error!(
                    "event=source_read module=source status=error kind=indexed duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}
