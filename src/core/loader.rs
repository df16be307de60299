//! Template document loading
//!
//! Loading runs in fixed stages and stops at the first stage that fails:
//! read, parse, schema predicates, typed decode, title uniqueness. Within the
//! predicate stage every issue in the document is collected.

use rust_embed::Embed;
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::core::collection::ResumeTemplateCollection;
use crate::core::error::{DuplicateTitleError, LoadError};
use crate::entities::{ResumeTemplate, TemplateDocument};
use crate::json::diagnostics::JsonSyntaxError;
use crate::schema::path::FieldPath;
use crate::schema::validator::{validate_document, IssueKind, ValidationError, ValidationIssue};

#[derive(Embed)]
#[folder = "data/"]
struct SampleData;

/// File name of the shipped sample data
pub const SAMPLE_FILE: &str = "resume_templates.json";

/// Where a template document comes from
#[derive(Debug, Clone)]
pub enum LoadSource {
    /// A file on disk
    Path(PathBuf),
    /// Bytes already in memory, with a name used in diagnostics
    Bytes { name: String, bytes: Vec<u8> },
}

impl LoadSource {
    pub fn name(&self) -> String {
        match self {
            LoadSource::Path(p) => p.display().to_string(),
            LoadSource::Bytes { name, .. } => name.clone(),
        }
    }
}

impl From<PathBuf> for LoadSource {
    fn from(path: PathBuf) -> Self {
        LoadSource::Path(path)
    }
}

impl From<&Path> for LoadSource {
    fn from(path: &Path) -> Self {
        LoadSource::Path(path.to_path_buf())
    }
}

/// Load and validate a template document
pub fn load(source: impl Into<LoadSource>) -> Result<ResumeTemplateCollection, LoadError> {
    match source.into() {
        LoadSource::Path(path) => {
            debug!(path = %path.display(), "reading template document");
            let bytes = std::fs::read(&path).map_err(|e| LoadError::Io {
                path: path.clone(),
                source: e,
            })?;
            load_bytes(&path.display().to_string(), &bytes)
        }
        LoadSource::Bytes { name, bytes } => load_bytes(&name, &bytes),
    }
}

/// Load a template document from a file
pub fn load_path(path: &Path) -> Result<ResumeTemplateCollection, LoadError> {
    load(path)
}

/// Load a template document from any reader
pub fn load_reader<R: Read>(name: &str, mut reader: R) -> Result<ResumeTemplateCollection, LoadError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(|e| LoadError::Io {
        path: PathBuf::from(name),
        source: e,
    })?;
    load_bytes(name, &bytes)
}

/// Load a template document from text
pub fn load_str(name: &str, content: &str) -> Result<ResumeTemplateCollection, LoadError> {
    load_bytes(name, content.as_bytes())
}

/// Load the sample templates compiled into the binary
pub fn load_samples() -> Result<ResumeTemplateCollection, LoadError> {
    let file = SampleData::get(SAMPLE_FILE).ok_or_else(|| LoadError::Io {
        path: PathBuf::from(SAMPLE_FILE),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "sample data not embedded"),
    })?;
    load_bytes(SAMPLE_FILE, &file.data)
}

/// Raw text of the embedded sample data
pub fn sample_text() -> Option<String> {
    SampleData::get(SAMPLE_FILE).map(|f| String::from_utf8_lossy(&f.data).into_owned())
}

fn load_bytes(name: &str, bytes: &[u8]) -> Result<ResumeTemplateCollection, LoadError> {
    let content = String::from_utf8_lossy(bytes);

    let value: serde_json::Value = serde_json::from_slice(bytes)
        .map_err(|e| JsonSyntaxError::from_serde_error(&e, &content, name))?;

    load_value(name, &content, value)
}

/// Load from an already parsed document
///
/// `content` is the source text the value was parsed from; it is only used
/// to place labels in diagnostics.
pub fn load_value(
    name: &str,
    content: &str,
    value: serde_json::Value,
) -> Result<ResumeTemplateCollection, LoadError> {
    let issues = validate_document(&value);
    if !issues.is_empty() {
        debug!(name, issues = issues.len(), "document failed schema checks");
        return Err(ValidationError::new(name, content, issues).into());
    }

    // Predicates passed, so a decode failure means they disagree with the
    // record types.
    let document: TemplateDocument = serde_json::from_value(value).map_err(|e| {
        let issue = ValidationIssue::new(FieldPath::root(), IssueKind::Undecodable(e.to_string()));
        ValidationError::new(name, content, vec![issue])
    })?;

    let duplicates = find_duplicate_titles(&document.resume_templates);
    if !duplicates.is_empty() {
        return Err(DuplicateTitleError::new(name, content, duplicates).into());
    }

    let collection = ResumeTemplateCollection::new(name, document.resume_templates);
    info!(name, count = collection.count(), "loaded resume templates");
    Ok(collection)
}

/// `(title, first_index, duplicate_index)` for every repeated title
fn find_duplicate_titles(templates: &[ResumeTemplate]) -> Vec<(String, usize, usize)> {
    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    let mut duplicates = Vec::new();

    for (i, t) in templates.iter().enumerate() {
        match first_seen.get(t.template_title.as_str()) {
            Some(&first) => duplicates.push((t.template_title.clone(), first, i)),
            None => {
                first_seen.insert(&t.template_title, i);
            }
        }
    }

    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn template_json(title: &str) -> serde_json::Value {
        serde_json::json!({
            "template_title": title,
            "personal_info_example": "",
            "career_objective_example": "",
            "skills_example": {"technical_skills": [], "soft_skills": [], "tools": []},
            "work_experience_example": [],
            "education_example": "",
            "certifications_example": [],
            "projects_example": [],
            "languages_example": [],
            "awards_example": [],
            "interests_example": []
        })
    }

    fn document(templates: Vec<serde_json::Value>) -> String {
        serde_json::to_string_pretty(&serde_json::json!({ "resume_templates": templates })).unwrap()
    }

    #[test]
    fn test_load_samples() {
        let c = load_samples().unwrap();
        assert_eq!(c.count(), 3);
        assert!(c.by_title("Modern Software Engineer Resume").is_some());
    }

    #[test]
    fn test_preserves_file_order() {
        let doc = document(vec![template_json("Zeta"), template_json("Alpha"), template_json("Mid")]);
        let c = load_str("mem.json", &doc).unwrap();
        assert_eq!(c.titles().collect::<Vec<_>>(), vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_duplicate_titles() {
        let doc = document(vec![
            template_json("Modern Software Engineer Resume"),
            template_json("Other"),
            template_json("Modern Software Engineer Resume"),
        ]);
        match load_str("dup.json", &doc) {
            Err(LoadError::DuplicateTitle(e)) => {
                assert_eq!(e.duplicates().len(), 1);
                let d = &e.duplicates()[0];
                assert_eq!(d.title, "Modern Software Engineer Resume");
                assert_eq!((d.first_index, d.duplicate_index), (0, 2));
            }
            other => panic!("expected duplicate title error, got {:?}", other),
        }
    }

    #[test]
    fn test_titles_differing_in_case_are_distinct() {
        let doc = document(vec![template_json("Chef"), template_json("chef")]);
        assert_eq!(load_str("case.json", &doc).unwrap().count(), 2);
    }

    #[test]
    fn test_validation_before_duplicates() {
        let mut bad = template_json("Same");
        bad.as_object_mut().unwrap().remove("interests_example");
        let doc = document(vec![template_json("Same"), bad]);
        assert!(matches!(load_str("v.json", &doc), Err(LoadError::Validation(_))));
    }

    #[test]
    fn test_parse_error() {
        match load_str("broken.json", "{\"resume_templates\": [ {\"template_title\": \"x\"") {
            Err(LoadError::Parse(e)) => {
                assert_eq!(e.line(), 1);
                assert!(e.column() > 0);
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let bytes = b"{\"resume_templates\": [\"\xff\xfe\"]}".to_vec();
        let result = load(LoadSource::Bytes {
            name: "bin.json".into(),
            bytes,
        });
        assert!(matches!(result, Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_load_path_and_reader() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.json");
        let doc = document(vec![template_json("A")]);
        fs::write(&path, &doc).unwrap();

        let c = load_path(&path).unwrap();
        assert_eq!(c.count(), 1);
        assert!(c.source_name().ends_with("t.json"));

        let c = load_reader("reader", doc.as_bytes()).unwrap();
        assert_eq!(c.titles().collect::<Vec<_>>(), vec!["A"]);
    }

    #[test]
    fn test_load_value_runs_remaining_stages() {
        let doc = document(vec![template_json("Same"), template_json("Same")]);
        let value: serde_json::Value = serde_json::from_str(&doc).unwrap();
        assert!(matches!(
            load_value("v.json", &doc, value),
            Err(LoadError::DuplicateTitle(_))
        ));

        let doc = document(vec![template_json("One")]);
        let value: serde_json::Value = serde_json::from_str(&doc).unwrap();
        assert_eq!(load_value("v.json", &doc, value).unwrap().count(), 1);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_path(Path::new("/nonexistent/path/templates.json"));
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }

    #[test]
    fn test_empty_collection_loads() {
        let c = load_str("empty.json", r#"{"resume_templates": []}"#).unwrap();
        assert!(c.is_empty());
    }

    #[test]
    fn test_find_duplicate_titles_reports_all() {
        let docs: Vec<ResumeTemplate> = ["A", "B", "A", "B", "A"]
            .iter()
            .map(|t| serde_json::from_value(template_json(t)).unwrap())
            .collect();
        let found = find_duplicate_titles(&docs);
        assert_eq!(
            found,
            vec![
                ("A".to_string(), 0, 2),
                ("B".to_string(), 1, 3),
                ("A".to_string(), 0, 4),
            ]
        );
    }
}
