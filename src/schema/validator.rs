//! Schema validation with detailed error reporting
//!
//! Validation runs over a parsed [`serde_json::Value`] rather than the typed
//! records so that every missing or mistyped field in a document is found in
//! one pass. Each record type has its own predicate; predicates append to a
//! shared issue list and never stop early.

use jsonschema::{validator_for, Validator as JsonValidator};
use miette::{Diagnostic, NamedSource, SourceSpan};
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use thiserror::Error;
use tracing::debug;

use crate::json::diagnostics::locate_path;
use crate::schema::contact::{contact_problems, ContactProblem};
use crate::schema::path::{FieldPath, TEMPLATES_KEY};
use crate::schema::registry::SchemaRegistry;

/// JSON value kinds, for type mismatch reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

impl JsonType {
    pub fn of(value: &JsonValue) -> Self {
        match value {
            JsonValue::Object(_) => JsonType::Object,
            JsonValue::Array(_) => JsonType::Array,
            JsonValue::String(_) => JsonType::String,
            JsonValue::Number(_) => JsonType::Number,
            JsonValue::Bool(_) => JsonType::Boolean,
            JsonValue::Null => JsonType::Null,
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JsonType::Object => "object",
            JsonType::Array => "array",
            JsonType::String => "string",
            JsonType::Number => "number",
            JsonType::Boolean => "boolean",
            JsonType::Null => "null",
        };
        write!(f, "{}", s)
    }
}

/// What is wrong at a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// Required field absent
    Missing,
    /// Field present with the wrong JSON type
    WrongType { expected: JsonType, found: JsonType },
    /// Required text is empty or whitespace only
    Empty,
    /// Field not part of the format (strict lint)
    UnknownField,
    /// Leading or trailing whitespace in a text value (strict lint)
    Whitespace,
    /// Malformed email address in personal info (strict lint)
    InvalidEmail(String),
    /// Phone number with an implausible digit count (strict lint)
    InvalidPhone(String),
    /// Passed the field checks but could not be decoded
    Undecodable(String),
}

/// A single problem found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: FieldPath,
    pub kind: IssueKind,
}

impl ValidationIssue {
    pub fn new(path: FieldPath, kind: IssueKind) -> Self {
        Self { path, kind }
    }

    /// Index of the template containing the problem, if any
    pub fn template_index(&self) -> Option<usize> {
        self.path.template_index()
    }

    pub fn message(&self) -> String {
        match &self.kind {
            IssueKind::Missing => format!("Missing required field: {}", self.path),
            IssueKind::WrongType { expected, found } => {
                format!("Wrong type at {}: expected {}, found {}", self.path, expected, found)
            }
            IssueKind::Empty => format!("Value at {} must not be empty", self.path),
            IssueKind::UnknownField => format!("Unknown field: {}", self.path),
            IssueKind::Whitespace => {
                format!("Value at {} has leading or trailing whitespace", self.path)
            }
            IssueKind::InvalidEmail(email) => {
                format!("Malformed email address '{}' at {}", email, self.path)
            }
            IssueKind::InvalidPhone(phone) => {
                format!("Malformed phone number '{}' at {}", phone, self.path)
            }
            IssueKind::Undecodable(detail) => {
                format!("Value at {} could not be decoded: {}", self.path, detail)
            }
        }
    }

    /// Short label for the source span
    fn hint(&self) -> &'static str {
        match self.kind {
            IssueKind::Missing => "required field missing",
            IssueKind::WrongType { .. } => "wrong type",
            IssueKind::Empty => "empty value",
            IssueKind::UnknownField => "unknown field",
            IssueKind::Whitespace => "untrimmed text",
            IssueKind::InvalidEmail(_) => "malformed email",
            IssueKind::InvalidPhone(_) => "malformed phone number",
            IssueKind::Undecodable(_) => "undecodable",
        }
    }

    fn help(&self) -> Option<String> {
        let field = self.path.keys().last().unwrap_or(TEMPLATES_KEY);
        match &self.kind {
            IssueKind::Missing => Some(format!(
                "Add the '{}' field; use an empty list [] if there is nothing to list",
                field
            )),
            IssueKind::WrongType { expected, .. } => {
                Some(format!("Expected value of type: {}", expected))
            }
            IssueKind::Empty => Some(format!("Give '{}' a non-empty value", field)),
            IssueKind::UnknownField => {
                Some(format!("Remove the '{}' field or check spelling", field))
            }
            IssueKind::Whitespace => Some("Trim the surrounding spaces".to_string()),
            IssueKind::InvalidEmail(_) => Some("Use the form name@domain.tld".to_string()),
            IssueKind::InvalidPhone(_) => {
                Some("Phone numbers need 7 to 15 digits, e.g. +1 555 010 2030".to_string())
            }
            IssueKind::Undecodable(_) => None,
        }
    }

    fn to_violation(&self, source: &str) -> SchemaViolation {
        let span = locate_path(source, &self.path, self.kind == IssueKind::Missing);
        SchemaViolation::new(self.message(), self.hint().to_string(), span, self.help())
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Validation error with source location information
#[derive(Debug, Error, Diagnostic)]
#[error("Schema validation failed: {summary}")]
#[diagnostic(code(rtk::schema::validation))]
pub struct ValidationError {
    summary: String,

    #[source_code]
    src: NamedSource<String>,

    #[related]
    violations: Vec<SchemaViolation>,

    issues: Vec<ValidationIssue>,
}

/// A single schema violation
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct SchemaViolation {
    #[label("{}", self.hint)]
    span: SourceSpan,

    message: String,
    hint: String,

    #[help]
    help: Option<String>,
}

impl SchemaViolation {
    pub fn new(message: String, hint: String, span: SourceSpan, help: Option<String>) -> Self {
        Self {
            span,
            message,
            hint,
            help,
        }
    }
}

impl ValidationError {
    pub fn new(filename: &str, source: &str, issues: Vec<ValidationIssue>) -> Self {
        let count = issues.len();
        let summary = if count == 1 {
            "1 error".to_string()
        } else {
            format!("{} errors", count)
        };
        let violations = issues.iter().map(|i| i.to_violation(source)).collect();
        Self {
            summary,
            src: NamedSource::new(filename, source.to_string()),
            violations,
            issues,
        }
    }

    /// Every issue found, in document order
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Get the number of violations
    pub fn violation_count(&self) -> usize {
        self.issues.len()
    }

    /// Indices of the templates with at least one issue
    pub fn template_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self.issues.iter().filter_map(|i| i.template_index()).collect();
        indices.dedup();
        indices
    }
}

// ============================================================================
// Field checks
// ============================================================================

fn expect_object<'v>(
    value: &'v JsonValue,
    path: &FieldPath,
    issues: &mut Vec<ValidationIssue>,
) -> Option<&'v Map<String, JsonValue>> {
    match value {
        JsonValue::Object(map) => Some(map),
        other => {
            issues.push(ValidationIssue::new(
                path.clone(),
                IssueKind::WrongType {
                    expected: JsonType::Object,
                    found: JsonType::of(other),
                },
            ));
            None
        }
    }
}

/// Look up a required field and check its type
fn require<'v>(
    obj: &'v Map<String, JsonValue>,
    parent: &FieldPath,
    key: &str,
    expected: JsonType,
    issues: &mut Vec<ValidationIssue>,
) -> Option<&'v JsonValue> {
    let path = parent.key(key);
    match obj.get(key) {
        None => {
            issues.push(ValidationIssue::new(path, IssueKind::Missing));
            None
        }
        Some(value) if JsonType::of(value) != expected => {
            issues.push(ValidationIssue::new(
                path,
                IssueKind::WrongType {
                    expected,
                    found: JsonType::of(value),
                },
            ));
            None
        }
        Some(value) => Some(value),
    }
}

fn require_string<'v>(
    obj: &'v Map<String, JsonValue>,
    parent: &FieldPath,
    key: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<&'v str> {
    require(obj, parent, key, JsonType::String, issues).and_then(JsonValue::as_str)
}

fn require_string_list(
    obj: &Map<String, JsonValue>,
    parent: &FieldPath,
    key: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    let Some(items) = require(obj, parent, key, JsonType::Array, issues).and_then(JsonValue::as_array)
    else {
        return;
    };
    let path = parent.key(key);
    for (i, item) in items.iter().enumerate() {
        if !item.is_string() {
            issues.push(ValidationIssue::new(
                path.index(i),
                IssueKind::WrongType {
                    expected: JsonType::String,
                    found: JsonType::of(item),
                },
            ));
        }
    }
}

fn require_record_list(
    obj: &Map<String, JsonValue>,
    parent: &FieldPath,
    key: &str,
    issues: &mut Vec<ValidationIssue>,
    check: fn(&JsonValue, &FieldPath, &mut Vec<ValidationIssue>),
) {
    let Some(items) = require(obj, parent, key, JsonType::Array, issues).and_then(JsonValue::as_array)
    else {
        return;
    };
    let path = parent.key(key);
    for (i, item) in items.iter().enumerate() {
        check(item, &path.index(i), issues);
    }
}

// ============================================================================
// Record predicates
// ============================================================================

fn check_skills(value: &JsonValue, path: &FieldPath, issues: &mut Vec<ValidationIssue>) {
    let Some(obj) = expect_object(value, path, issues) else {
        return;
    };
    for key in ["technical_skills", "soft_skills", "tools"] {
        require_string_list(obj, path, key, issues);
    }
}

fn check_work_experience(value: &JsonValue, path: &FieldPath, issues: &mut Vec<ValidationIssue>) {
    let Some(obj) = expect_object(value, path, issues) else {
        return;
    };
    for key in ["job_title", "company_name", "location", "start_date", "end_date"] {
        require_string(obj, path, key, issues);
    }
    require_string_list(obj, path, "responsibilities", issues);
}

fn check_certification(value: &JsonValue, path: &FieldPath, issues: &mut Vec<ValidationIssue>) {
    let Some(obj) = expect_object(value, path, issues) else {
        return;
    };
    for key in ["certification_title", "issuing_organization", "issue_date"] {
        require_string(obj, path, key, issues);
    }
}

fn check_project(value: &JsonValue, path: &FieldPath, issues: &mut Vec<ValidationIssue>) {
    let Some(obj) = expect_object(value, path, issues) else {
        return;
    };
    require_string(obj, path, "project_name", issues);
    require_string(obj, path, "description", issues);
    require_string_list(obj, path, "technologies_used", issues);
}

fn check_award(value: &JsonValue, path: &FieldPath, issues: &mut Vec<ValidationIssue>) {
    let Some(obj) = expect_object(value, path, issues) else {
        return;
    };
    for key in ["award_title", "awarding_body", "date_received"] {
        require_string(obj, path, key, issues);
    }
}

fn check_template(value: &JsonValue, path: &FieldPath, issues: &mut Vec<ValidationIssue>) {
    let Some(obj) = expect_object(value, path, issues) else {
        return;
    };

    if let Some(title) = require_string(obj, path, "template_title", issues) {
        if title.trim().is_empty() {
            issues.push(ValidationIssue::new(path.key("template_title"), IssueKind::Empty));
        }
    }
    require_string(obj, path, "personal_info_example", issues);
    require_string(obj, path, "career_objective_example", issues);

    if let Some(skills) = require(obj, path, "skills_example", JsonType::Object, issues) {
        check_skills(skills, &path.key("skills_example"), issues);
    }

    require_record_list(obj, path, "work_experience_example", issues, check_work_experience);
    require_string(obj, path, "education_example", issues);
    require_record_list(obj, path, "certifications_example", issues, check_certification);
    require_record_list(obj, path, "projects_example", issues, check_project);
    require_string_list(obj, path, "languages_example", issues);
    require_record_list(obj, path, "awards_example", issues, check_award);
    require_string_list(obj, path, "interests_example", issues);
}

fn run(check: fn(&JsonValue, &FieldPath, &mut Vec<ValidationIssue>), value: &JsonValue) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    check(value, &FieldPath::root(), &mut issues);
    issues
}

/// Check a skills object; paths are relative to it
pub fn validate_skills(value: &JsonValue) -> Vec<ValidationIssue> {
    run(check_skills, value)
}

/// Check a work experience entry; paths are relative to it
pub fn validate_work_experience(value: &JsonValue) -> Vec<ValidationIssue> {
    run(check_work_experience, value)
}

/// Check a certification entry; paths are relative to it
pub fn validate_certification(value: &JsonValue) -> Vec<ValidationIssue> {
    run(check_certification, value)
}

/// Check a project entry; paths are relative to it
pub fn validate_project(value: &JsonValue) -> Vec<ValidationIssue> {
    run(check_project, value)
}

/// Check an award entry; paths are relative to it
pub fn validate_award(value: &JsonValue) -> Vec<ValidationIssue> {
    run(check_award, value)
}

/// Check a single template; paths are relative to it
pub fn validate_template(value: &JsonValue) -> Vec<ValidationIssue> {
    run(check_template, value)
}

/// Check a whole document
///
/// Paths are absolute, e.g. `resume_templates[1].skills_example.tools`.
pub fn validate_document(value: &JsonValue) -> Vec<ValidationIssue> {
    let root = FieldPath::root();
    let mut issues = Vec::new();

    let Some(obj) = expect_object(value, &root, &mut issues) else {
        return issues;
    };
    require_record_list(obj, &root, TEMPLATES_KEY, &mut issues, check_template);

    debug!(issues = issues.len(), "schema predicates finished");
    issues
}

// ============================================================================
// Strict lint
// ============================================================================

/// Result of validation
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// No errors (warnings allowed)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_issues(&self) -> bool {
        !self.errors.is_empty() || !self.warnings.is_empty()
    }
}

/// Validator combining the record predicates with the published JSON Schema
pub struct Validator {
    /// Compiled document schema, used for unknown-field lint
    compiled: Option<JsonValidator>,
}

impl Validator {
    /// Create a new validator with the document schema from the registry
    pub fn new(registry: &SchemaRegistry) -> Self {
        let compiled = registry
            .document_schema_json()
            .and_then(|schema| validator_for(&schema).ok());
        if compiled.is_none() {
            debug!("document schema unavailable, unknown-field lint disabled");
        }
        Self { compiled }
    }

    /// Validate a parsed document; `strict` adds lint warnings
    pub fn check(&self, value: &JsonValue, strict: bool) -> ValidationReport {
        let errors = validate_document(value);
        let warnings = if strict { self.lint(value) } else { Vec::new() };
        ValidationReport { errors, warnings }
    }

    /// Unknown fields, untrimmed text and malformed contact details
    pub fn lint(&self, value: &JsonValue) -> Vec<ValidationIssue> {
        let mut warnings = Vec::new();

        if let Some(schema) = &self.compiled {
            for error in schema.iter_errors(value) {
                if let jsonschema::error::ValidationErrorKind::AdditionalProperties { unexpected } =
                    &error.kind
                {
                    let parent = FieldPath::from_pointer(&error.instance_path.to_string());
                    for name in unexpected {
                        warnings.push(ValidationIssue::new(parent.key(name.clone()), IssueKind::UnknownField));
                    }
                }
            }
        }

        collect_untrimmed(value, &FieldPath::root(), &mut warnings);
        collect_contact_problems(value, &mut warnings);
        warnings
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(&SchemaRegistry)
    }
}

fn collect_contact_problems(value: &JsonValue, out: &mut Vec<ValidationIssue>) {
    let Some(templates) = value.get(TEMPLATES_KEY).and_then(JsonValue::as_array) else {
        return;
    };
    for (i, template) in templates.iter().enumerate() {
        let Some(info) = template.get("personal_info_example").and_then(JsonValue::as_str) else {
            continue;
        };
        let path = FieldPath::template(i).key("personal_info_example");
        for problem in contact_problems(info) {
            let kind = match problem {
                ContactProblem::InvalidEmail(e) => IssueKind::InvalidEmail(e),
                ContactProblem::InvalidPhone(p) => IssueKind::InvalidPhone(p),
            };
            out.push(ValidationIssue::new(path.clone(), kind));
        }
    }
}

fn collect_untrimmed(value: &JsonValue, path: &FieldPath, out: &mut Vec<ValidationIssue>) {
    match value {
        JsonValue::String(s) if s.trim() != s => {
            out.push(ValidationIssue::new(path.clone(), IssueKind::Whitespace));
        }
        JsonValue::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                collect_untrimmed(item, &path.index(i), out);
            }
        }
        JsonValue::Object(map) => {
            for (k, v) in map {
                collect_untrimmed(v, &path.key(k.clone()), out);
            }
        }
        _ => {}
    }
}
