//! JSON error diagnostics with source locations

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::schema::path::{FieldPath, PathSegment, TEMPLATES_KEY};

/// JSON syntax error with source location
#[derive(Debug, Error, Diagnostic)]
#[error("JSON syntax error: {message}")]
#[diagnostic(code(rtk::json::syntax))]
pub struct JsonSyntaxError {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    #[help]
    help: Option<String>,

    message: String,
    line: usize,
    column: usize,
}

impl JsonSyntaxError {
    /// Create a syntax error from a serde_json error
    pub fn from_serde_error(err: &serde_json::Error, source: &str, filename: &str) -> Self {
        let line = err.line();
        let column = err.column();
        let offset = line_col_to_offset(source, line, column);
        let message = err.to_string();
        let help = generate_help(&message);

        Self {
            src: NamedSource::new(filename, source.to_string()),
            span: char_span(source, offset),
            help,
            message,
            line,
            column,
        }
    }

    /// 1-based line reported by the parser (0 when unknown)
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column reported by the parser (0 when unknown)
    pub fn column(&self) -> usize {
        self.column
    }

    /// Byte offset of the error in the source
    pub fn offset(&self) -> usize {
        self.span.offset()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Convert a 1-based line/column pair to a byte offset
fn line_col_to_offset(source: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }

    let line_start: usize = source
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();

    let mut offset = (line_start + column.saturating_sub(1)).min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Span covering the character at `offset` (empty at end of input)
fn char_span(source: &str, offset: usize) -> SourceSpan {
    let len = source
        .get(offset..)
        .and_then(|rest| rest.chars().next())
        .map_or(0, char::len_utf8);
    (offset, len).into()
}

/// Generate helpful suggestions based on error message
fn generate_help(message: &str) -> Option<String> {
    let msg_lower = message.to_lowercase();

    if msg_lower.contains("eof while parsing") {
        return Some("The document ends early - check for a missing closing '}' or ']'".to_string());
    }

    if msg_lower.contains("trailing comma") {
        return Some("JSON does not allow a comma after the last item of an object or array".to_string());
    }

    if msg_lower.contains("expected `,` or `}`") || msg_lower.contains("expected `,` or `]`") {
        return Some("Add a comma between items".to_string());
    }

    if msg_lower.contains("key must be a string") {
        return Some("Object keys must be wrapped in double quotes: \"key\": value".to_string());
    }

    if msg_lower.contains("control character") {
        return Some("Escape newlines and tabs inside strings as \\n and \\t".to_string());
    }

    if msg_lower.contains("invalid unicode") || msg_lower.contains("utf-8") {
        return Some("Save the file as UTF-8".to_string());
    }

    None
}

/// Offset of the `"key":` token for `key` within `source[from..to]`
///
/// A quoted string only counts as a key when a colon follows it.
fn find_key(source: &str, from: usize, to: usize, key: &str) -> Option<usize> {
    let needle = format!("\"{}\"", key);
    let region = source.get(from..to)?;
    let mut offset = 0;
    while let Some(pos) = region.get(offset..)?.find(&needle) {
        let at = offset + pos;
        let after = at + needle.len();
        if region[after..].trim_start().starts_with(':') {
            return Some(from + at);
        }
        offset = after;
    }
    None
}

/// Offset of the value following a key token that ends at `from`
fn value_start(source: &str, from: usize) -> Option<usize> {
    source
        .get(from..)?
        .char_indices()
        .find(|(_, c)| !c.is_whitespace() && *c != ':')
        .map(|(i, _)| from + i)
}

/// Element start offsets of the array opening at `open`, plus the offset of
/// its closing bracket
///
/// This is a lexical scan: it tracks string state and nesting depth only, so
/// it works on documents that parse but fail schema checks.
fn array_elements(source: &str, open: usize) -> (Vec<usize>, usize) {
    let bytes = source.as_bytes();
    let mut elements = Vec::new();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut expecting = true;

    for (i, &b) in bytes.iter().enumerate().skip(open + 1) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        if b.is_ascii_whitespace() {
            continue;
        }
        if depth == 0 {
            match b {
                b']' => return (elements, i),
                b',' => {
                    expecting = true;
                    continue;
                }
                _ if expecting => {
                    elements.push(i);
                    expecting = false;
                }
                _ => {}
            }
        }
        match b {
            b'"' => in_string = true,
            b'{' | b'[' => depth += 1,
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    (elements, source.len())
}

/// Byte offsets where each element of the top-level `resume_templates`
/// array starts
pub fn template_offsets(source: &str) -> Vec<usize> {
    find_key(source, 0, source.len(), TEMPLATES_KEY)
        .and_then(|at| value_start(source, at + TEMPLATES_KEY.len() + 2))
        .filter(|&open| source.as_bytes().get(open) == Some(&b'['))
        .map(|open| array_elements(source, open).0)
        .unwrap_or_default()
}

/// Find a span for a field path in the source text
///
/// Each key is searched only inside the array element selected by the
/// preceding index. With `missing` set, the last segment does not exist in
/// the source and the span points at its parent instead. When a segment
/// cannot be found the span falls back to the deepest one that was.
pub fn locate_path(source: &str, path: &FieldPath, missing: bool) -> SourceSpan {
    let target = if missing { path.parent() } else { path.clone() };
    let mut cursor = 0usize;
    let mut end = source.len();
    let mut found: Option<SourceSpan> = None;

    for segment in target.segments() {
        match segment {
            PathSegment::Key(key) => {
                let Some(at) = find_key(source, cursor, end, key) else {
                    break;
                };
                let len = key.len() + 2;
                found = Some((at, len).into());
                cursor = at + len;
            }
            PathSegment::Index(n) => {
                let Some(open) = value_start(source, cursor)
                    .filter(|&i| source.as_bytes().get(i) == Some(&b'['))
                else {
                    break;
                };
                let (elements, close) = array_elements(source, open);
                let Some(&start) = elements.get(*n) else {
                    break;
                };
                end = elements.get(n + 1).copied().unwrap_or(close);
                cursor = start;
                found = Some(char_span(source, start));
            }
        }
    }

    found.unwrap_or_else(|| char_span(source, 0))
}
