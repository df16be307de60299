//! Resume template record types

pub mod template;

pub use template::{
    AwardEntry, CertificationEntry, ProjectEntry, ResumeTemplate, SectionCounts, Skills,
    TemplateDocument, WorkExperienceEntry,
};
