use super::{FileSource, SourceError, SourceFile};
use crate::parser::is_markdown_file_name;
use log::{error, info};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

/// Reads every `.md` file directly inside one directory.
///
/// Subdirectories are not descended into. Files come back sorted by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn read_all(&self) -> Result<Vec<SourceFile>, SourceError> {
        let entries = fs::read_dir(&self.dir).map_err(|source| SourceError::ReadDir {
            path: self.dir.clone(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| SourceError::ReadDir {
                path: self.dir.clone(),
                source,
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if !is_markdown_file_name(&name) {
                continue;
            }
            let content =
                fs::read_to_string(&path).map_err(|err| SourceError::read_file(&path, err))?;
            files.push(SourceFile { name, content });
        }

        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }
}

impl FileSource for DirectorySource {
    fn describe(&self) -> String {
        format!("directory {}", self.dir.display())
    }

    fn read_markdown_files(&self) -> Result<Vec<SourceFile>, SourceError> {
        let started_at = Instant::now();
        match self.read_all() {
            Ok(files) => {
                info!(
                    "event=source_read module=source status=ok kind=directory files={} duration_ms={}",
                    files.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(files)
            }
            Err(err) => {
                error!(
                    "event=source_read module=source status=error kind=directory duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}
