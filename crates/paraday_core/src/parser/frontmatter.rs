//! Frontmatter header splitting.
//!
//! A document starting with a line that is exactly `---` carries a header
//! block up to the next line that is exactly `---`. Without both markers the
//! whole text is body and the header is empty.

use std::collections::BTreeMap;

const MARKER: &str = "---";

/// Parsed header map plus the borrowed body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frontmatter<'a> {
    header: BTreeMap<String, String>,
    body: &'a str,
}

impl<'a> Frontmatter<'a> {
    /// Raw header map. Duplicate keys kept their last occurrence.
    pub fn header(&self) -> &BTreeMap<String, String> {
        &self.header
    }

    /// Text after the closing marker line (or the whole document).
    pub fn body(&self) -> &'a str {
        self.body
    }

    /// Returns a header value, treating blank values as absent.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.header
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn into_header(self) -> BTreeMap<String, String> {
        self.header
    }
}

/// Splits `text` into header and body.
pub fn parse_frontmatter(text: &str) -> Frontmatter<'_> {
    match split_header_block(text) {
        Some((block, body)) => Frontmatter {
            header: parse_header_block(block),
            body,
        },
        None => Frontmatter {
            header: BTreeMap::new(),
            body: text,
        },
    }
}

/// Renders ordered pairs as a `---` delimited header block.
///
/// Output ends with the closing marker followed by a newline.
pub fn render_frontmatter<K, V>(pairs: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut out = String::from(MARKER);
    out.push('\n');
    for (key, value) in pairs {
        out.push_str(key.as_ref());
        out.push_str(": ");
        out.push_str(value.as_ref());
        out.push('\n');
    }
    out.push_str(MARKER);
    out.push('\n');
    out
}

fn is_marker_line(segment: &str) -> bool {
    segment.trim_end_matches('\n').trim_end_matches('\r') == MARKER
}

fn split_header_block(text: &str) -> Option<(&str, &str)> {
    let mut segments = text.split_inclusive('\n');
    let opening = segments.next()?;
    if !is_marker_line(opening) {
        return None;
    }

    let header_start = opening.len();
    let mut offset = header_start;
    for segment in segments {
        if is_marker_line(segment) {
            let block = &text[header_start..offset];
            let body = &text[offset + segment.len()..];
            return Some((block, body));
        }
        offset += segment.len();
    }
    None
}

fn parse_header_block(block: &str) -> BTreeMap<String, String> {
    let mut header = BTreeMap::new();
    for line in block.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        header.insert(key.trim().to_string(), value.trim().to_string());
    }
    header
}
