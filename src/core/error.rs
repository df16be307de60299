//! Load errors

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::PathBuf;
use thiserror::Error;

use crate::json::diagnostics::{locate_path, JsonSyntaxError};
use crate::schema::path::FieldPath;
use crate::schema::validator::ValidationError;

/// Why a template document could not be loaded
#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", path.display())]
    #[diagnostic(code(rtk::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] JsonSyntaxError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    DuplicateTitle(#[from] DuplicateTitleError),
}

/// One title shared by two templates
#[derive(Debug, Error, Diagnostic)]
#[error("Duplicate template_title \"{title}\" (templates {first_index} and {duplicate_index})")]
pub struct DuplicateTitle {
    pub title: String,
    pub first_index: usize,
    pub duplicate_index: usize,

    #[label("repeated here")]
    span: SourceSpan,

    #[help]
    help: Option<String>,
}

/// Two or more templates share a `template_title`
#[derive(Debug, Error, Diagnostic)]
#[error("Duplicate template titles: {summary}")]
#[diagnostic(
    code(rtk::schema::duplicate_title),
    help("Titles are matched exactly, including case")
)]
pub struct DuplicateTitleError {
    summary: String,

    #[source_code]
    src: NamedSource<String>,

    #[related]
    duplicates: Vec<DuplicateTitle>,
}

impl DuplicateTitleError {
    /// Build from `(title, first_index, duplicate_index)` triples
    pub fn new(filename: &str, source: &str, found: Vec<(String, usize, usize)>) -> Self {
        let mut titles: Vec<&str> = Vec::new();
        for (title, _, _) in &found {
            if !titles.contains(&title.as_str()) {
                titles.push(title);
            }
        }
        let summary = titles
            .iter()
            .map(|title| format!("\"{}\"", title))
            .collect::<Vec<_>>()
            .join(", ");
        let duplicates = found
            .into_iter()
            .map(|(title, first_index, duplicate_index)| {
                let path = FieldPath::template(duplicate_index).key("template_title");
                DuplicateTitle {
                    span: locate_path(source, &path, false),
                    help: Some(format!("First used by template {}", first_index)),
                    title,
                    first_index,
                    duplicate_index,
                }
            })
            .collect();
        Self {
            summary,
            src: NamedSource::new(filename, source.to_string()),
            duplicates,
        }
    }

    pub fn duplicates(&self) -> &[DuplicateTitle] {
        &self.duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_names_each_title_once() {
        let source = r#"{"resume_templates": [{"template_title": "A"}, {"template_title": "A"}, {"template_title": "A"}, {"template_title": "B"}, {"template_title": "B"}]}"#;
        let err = DuplicateTitleError::new(
            "dup.json",
            source,
            vec![
                ("A".to_string(), 0, 1),
                ("A".to_string(), 0, 2),
                ("B".to_string(), 3, 4),
            ],
        );
        assert_eq!(err.to_string(), "Duplicate template titles: \"A\", \"B\"");
        assert_eq!(err.duplicates().len(), 3);
    }

    #[test]
    fn test_duplicate_label_points_at_repeat() {
        let source = r#"{"resume_templates": [{"template_title": "A"}, {"template_title": "A"}]}"#;
        let err = DuplicateTitleError::new("dup.json", source, vec![("A".to_string(), 0, 1)]);
        assert_eq!(
            err.duplicates()[0].span.offset(),
            source.rfind("\"template_title\"").unwrap()
        );
    }
}
