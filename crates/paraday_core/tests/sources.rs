use chrono::{TimeZone, Utc};
use paraday_core::source::source_for;
use paraday_core::{DirectorySource, FileSource, IndexedSource, SourceError, SourceMode, Workspace};
use std::fs;
use std::path::Path;

fn write(dir: &Path, name: &str, text: &str) {
    fs::write(dir.join(name), text).unwrap();
}

fn names(files: &[paraday_core::SourceFile]) -> Vec<&str> {
    files.iter().map(|file| file.name.as_str()).collect()
}

#[test]
fn directory_source_lists_markdown_files_by_name() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "b.md", "- [ ] b");
    write(dir.path(), "A.MD", "- [ ] a");
    write(dir.path(), "notes.txt", "ignored");
    fs::create_dir(dir.path().join("nested.md")).unwrap();

    let files = DirectorySource::new(dir.path()).read_markdown_files().unwrap();
    assert_eq!(names(&files), vec!["A.MD", "b.md"]);
    assert_eq!(files[1].content, "- [ ] b");
}

#[test]
fn directory_source_fails_for_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let err = DirectorySource::new(dir.path().join("absent"))
        .read_markdown_files()
        .unwrap_err();
    assert!(matches!(err, SourceError::ReadDir { .. }));
}

#[test]
fn indexed_source_reads_listed_markdown_in_index_order() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "z.md", "z");
    write(dir.path(), "a.md", "a");
    write(dir.path(), "index.json", r#"{"files": ["z.md", "cover.png", "a.md"]}"#);

    let files = IndexedSource::new(dir.path()).read_markdown_files().unwrap();
    assert_eq!(names(&files), vec!["z.md", "a.md"]);
}

#[test]
fn indexed_source_fails_the_whole_batch() {
    let dir = tempfile::tempdir().unwrap();
    let source = IndexedSource::new(dir.path());
    assert!(matches!(
        source.read_markdown_files(),
        Err(SourceError::ReadIndex { .. })
    ));

    write(dir.path(), "index.json", r#"{"files": []}"#);
    assert!(matches!(
        source.read_markdown_files(),
        Err(SourceError::EmptyIndex(_))
    ));

    write(dir.path(), "index.json", "[1, 2]");
    assert!(matches!(
        source.read_markdown_files(),
        Err(SourceError::InvalidIndex { .. })
    ));

    write(dir.path(), "present.md", "ok");
    write(dir.path(), "index.json", r#"{"files": ["present.md", "missing.md"]}"#);
    assert!(matches!(
        source.read_markdown_files(),
        Err(SourceError::ReadFile { .. })
    ));

    write(dir.path(), "index.json", r#"{"files": ["../outside.md"]}"#);
    assert!(matches!(
        source.read_markdown_files(),
        Err(SourceError::InvalidEntry(_))
    ));
}

#[test]
fn workspace_reload_keeps_state_when_the_source_breaks() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "home.md", "---\nid: home\n---\n- [ ] Fix tap\n");
    write(dir.path(), "index.json", r#"{"files": ["home.md"]}"#);
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();

    let mut workspace = Workspace::new();
    let source = source_for(SourceMode::Indexed, dir.path());
    workspace.reload_projects(source.as_ref(), now).unwrap();
    assert_eq!(workspace.projects().len(), 1);

    fs::remove_file(dir.path().join("home.md")).unwrap();
    assert!(workspace.reload_projects(source.as_ref(), now).is_err());
    assert_eq!(workspace.projects()[0].id, "home");
    assert_eq!(workspace.board().len(), 1);
}
