//! Markdown document parsing.
//!
//! # Responsibility
//! - Split documents into frontmatter header and body.
//! - Extract checklist lines and assemble projects, tasks and daily notes.
//!
//! # Invariants
//! - Parsing never fails: malformed input recovers to documented defaults.
//! - Derived ids are a pure function of the owner id and the body line offset.

pub mod checklist;
pub mod daily_doc;
pub mod frontmatter;
pub mod project_doc;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

const MARKDOWN_SUFFIX: &str = ".md";

/// Returns whether a file name carries the markdown suffix (any case).
pub fn is_markdown_file_name(file_name: &str) -> bool {
    file_name.len() >= MARKDOWN_SUFFIX.len()
        && file_name
            .get(file_name.len() - MARKDOWN_SUFFIX.len()..)
            .is_some_and(|suffix| suffix.eq_ignore_ascii_case(MARKDOWN_SUFFIX))
}

/// Strips one trailing `.md` suffix (any case) from a file name.
pub fn strip_markdown_suffix(file_name: &str) -> &str {
    if is_markdown_file_name(file_name) {
        &file_name[..file_name.len() - MARKDOWN_SUFFIX.len()]
    } else {
        file_name
    }
}

/// Parses a `YYYY-MM-DD` date value.
pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Parses an RFC 3339 timestamp, or a bare date at UTC midnight.
pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    parse_date(trimmed).map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

#[cfg(test)]
mod tests {
    use super::{is_markdown_file_name, parse_timestamp, strip_markdown_suffix};

    #[test]
    fn markdown_suffix_is_case_insensitive() {
        assert!(is_markdown_file_name("Plan.MD"));
        assert!(!is_markdown_file_name("notes.txt"));
        assert!(!is_markdown_file_name("md"));
        assert_eq!(strip_markdown_suffix("launch.Md"), "launch");
        assert_eq!(strip_markdown_suffix("launch"), "launch");
    }

    #[test]
    fn timestamp_accepts_rfc3339_and_bare_dates() {
        let full = parse_timestamp("2025-03-01T08:30:00Z").expect("rfc3339 should parse");
        assert_eq!(full.to_rfc3339(), "2025-03-01T08:30:00+00:00");

        let bare = parse_timestamp("2025-03-01").expect("bare date should parse");
        assert_eq!(bare.to_rfc3339(), "2025-03-01T00:00:00+00:00");

        assert!(parse_timestamp("yesterday").is_none());
    }
}
