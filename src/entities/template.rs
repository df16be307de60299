//! Resume template record types
//!
//! These mirror the on-disk JSON layout field for field. Presence and type
//! checks happen in [`crate::schema::validator`] before a document is decoded
//! into these types, so decoding a validated document cannot fail.

use serde::{Deserialize, Serialize};

/// Root of a resume template data file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDocument {
    pub resume_templates: Vec<ResumeTemplate>,
}

/// One complete example resume
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeTemplate {
    /// Human-readable label, unique within a collection
    pub template_title: String,

    pub personal_info_example: String,

    pub career_objective_example: String,

    pub skills_example: Skills,

    /// Positions in file order
    pub work_experience_example: Vec<WorkExperienceEntry>,

    pub education_example: String,

    pub certifications_example: Vec<CertificationEntry>,

    pub projects_example: Vec<ProjectEntry>,

    pub languages_example: Vec<String>,

    pub awards_example: Vec<AwardEntry>,

    pub interests_example: Vec<String>,
}

/// Skills grouped by kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skills {
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub tools: Vec<String>,
}

/// A single position held
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkExperienceEntry {
    pub job_title: String,
    pub company_name: String,
    pub location: String,
    pub start_date: String,
    /// Free text; the literal "Present" marks an ongoing position
    pub end_date: String,
    pub responsibilities: Vec<String>,
}

impl WorkExperienceEntry {
    /// Marker used in `end_date` for a position that has not ended
    pub const PRESENT: &'static str = "Present";

    /// Whether this position is still held
    pub fn is_current(&self) -> bool {
        self.end_date == Self::PRESENT
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificationEntry {
    pub certification_title: String,
    pub issuing_organization: String,
    pub issue_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub project_name: String,
    pub description: String,
    pub technologies_used: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardEntry {
    pub award_title: String,
    pub awarding_body: String,
    pub date_received: String,
}

/// Number of entries in each list section of a template
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SectionCounts {
    pub technical_skills: usize,
    pub soft_skills: usize,
    pub tools: usize,
    pub work_experience: usize,
    pub certifications: usize,
    pub projects: usize,
    pub languages: usize,
    pub awards: usize,
    pub interests: usize,
}

impl SectionCounts {
    /// Section labels paired with their counts, in display order
    pub fn entries(&self) -> [(&'static str, usize); 9] {
        [
            ("technical_skills", self.technical_skills),
            ("soft_skills", self.soft_skills),
            ("tools", self.tools),
            ("work_experience", self.work_experience),
            ("certifications", self.certifications),
            ("projects", self.projects),
            ("languages", self.languages),
            ("awards", self.awards),
            ("interests", self.interests),
        ]
    }

    /// Labels of sections with no entries
    pub fn empty_sections(&self) -> Vec<&'static str> {
        self.entries()
            .into_iter()
            .filter(|(_, n)| *n == 0)
            .map(|(name, _)| name)
            .collect()
    }
}

impl ResumeTemplate {
    pub fn section_counts(&self) -> SectionCounts {
        SectionCounts {
            technical_skills: self.skills_example.technical_skills.len(),
            soft_skills: self.skills_example.soft_skills.len(),
            tools: self.skills_example.tools.len(),
            work_experience: self.work_experience_example.len(),
            certifications: self.certifications_example.len(),
            projects: self.projects_example.len(),
            languages: self.languages_example.len(),
            awards: self.awards_example.len(),
            interests: self.interests_example.len(),
        }
    }

    /// True when every list section has at least one entry
    pub fn is_complete(&self) -> bool {
        self.section_counts().empty_sections().is_empty()
    }

    /// Positions whose `end_date` is "Present"
    pub fn current_positions(&self) -> impl Iterator<Item = &WorkExperienceEntry> {
        self.work_experience_example.iter().filter(|w| w.is_current())
    }

    /// Every text value of the template, one per line, in field order
    ///
    /// This is the resume body that keyword and similarity scoring run over.
    pub fn full_text(&self) -> String {
        let mut lines: Vec<&str> = vec![
            self.template_title.as_str(),
            self.personal_info_example.as_str(),
            self.career_objective_example.as_str(),
        ];
        let skills = &self.skills_example;
        lines.extend(skills.technical_skills.iter().map(String::as_str));
        lines.extend(skills.soft_skills.iter().map(String::as_str));
        lines.extend(skills.tools.iter().map(String::as_str));
        for w in &self.work_experience_example {
            lines.extend([
                w.job_title.as_str(),
                w.company_name.as_str(),
                w.location.as_str(),
                w.start_date.as_str(),
                w.end_date.as_str(),
            ]);
            lines.extend(w.responsibilities.iter().map(String::as_str));
        }
        lines.push(self.education_example.as_str());
        for c in &self.certifications_example {
            lines.extend([
                c.certification_title.as_str(),
                c.issuing_organization.as_str(),
                c.issue_date.as_str(),
            ]);
        }
        for p in &self.projects_example {
            lines.extend([p.project_name.as_str(), p.description.as_str()]);
            lines.extend(p.technologies_used.iter().map(String::as_str));
        }
        lines.extend(self.languages_example.iter().map(String::as_str));
        for a in &self.awards_example {
            lines.extend([
                a.award_title.as_str(),
                a.awarding_body.as_str(),
                a.date_received.as_str(),
            ]);
        }
        lines.extend(self.interests_example.iter().map(String::as_str));

        lines.retain(|l| !l.is_empty());
        lines.join("\n")
    }
}
