//! Schema system - field paths, validation, contact lint and skeleton generation

pub mod contact;
pub mod path;
pub mod registry;
pub mod scaffold;
pub mod validator;

pub use contact::{contact_problems, has_email, has_phone, ContactProblem};
pub use path::{FieldPath, PathSegment, TEMPLATES_KEY};
pub use registry::SchemaRegistry;
pub use scaffold::{ScaffoldContext, ScaffoldGenerator};
pub use validator::{
    validate_award, validate_certification, validate_document, validate_project,
    validate_skills, validate_template, validate_work_experience, IssueKind, JsonType,
    ValidationError, ValidationIssue, ValidationReport, Validator,
};
