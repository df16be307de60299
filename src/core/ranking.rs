//! Template ranking
//!
//! Scores a template's text on four axes:
//!
//! - **keyword relevance**: share of job description keywords found in the
//!   template (needs a job description)
//! - **formatting**: share of the core sections (experience, education,
//!   skills, projects) that have content
//! - **content quality**: TF-IDF cosine similarity between the template and
//!   the job description (needs a job description)
//! - **rule score**: fixed 0-100 checklist of sections, length, bonus
//!   keywords and contact details
//!
//! The overall score is a weighted average (0.4 / 0.3 / 0.3) of the first
//! three, renormalized over the ones that could be computed.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::ops::RangeInclusive;
use tracing::debug;

use crate::entities::ResumeTemplate;
use crate::schema::contact::{has_email, has_phone};

pub const KEYWORD_RELEVANCE_THRESHOLD: f64 = 70.0;
pub const FORMATTING_THRESHOLD: f64 = 80.0;
pub const CONTENT_QUALITY_THRESHOLD: f64 = 75.0;

const KEYWORD_WEIGHT: f64 = 0.4;
const FORMATTING_WEIGHT: f64 = 0.3;
const CONTENT_WEIGHT: f64 = 0.3;

/// Terms worth a bonus in the rule score, matched case-sensitively
pub const BONUS_KEYWORDS: [&str; 3] = ["Python", "Machine Learning", "Team Leadership"];

/// Word counts that earn the length bonus in the rule score
pub const WORD_RANGE: RangeInclusive<usize> = 400..=800;

/// Scores for one template, each 0-100
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scores {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword_relevance: Option<f64>,
    pub formatting: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_quality: Option<f64>,
    pub rule_score: u8,
}

/// Ranking result for one template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    pub template_title: String,
    pub overall_score: f64,
    pub scores: Scores,
    /// Advice keyed by the score it concerns (`overall` when nothing is low)
    pub feedback: BTreeMap<&'static str, String>,
}

/// Lowercase words of `text` with surrounding punctuation removed
fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| c.is_ascii_punctuation()).to_lowercase())
        .filter(|w| !w.is_empty())
}

/// Distinct keywords of a job description, in first-seen order
///
/// Words of two characters or fewer are dropped.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    words(text)
        .filter(|w| w.chars().count() > 2)
        .filter(|w| seen.insert(w.clone()))
        .collect()
}

/// Percentage of `keywords` that occur as words in `text`
pub fn keyword_relevance(keywords: &[String], text: &str) -> f64 {
    if keywords.is_empty() {
        return 0.0;
    }
    let present: HashSet<String> = words(text).collect();
    let matched = keywords.iter().filter(|k| present.contains(*k)).count();
    matched as f64 / keywords.len() as f64 * 100.0
}

/// Core sections without content
pub fn missing_core_sections(t: &ResumeTemplate) -> Vec<&'static str> {
    let skills = &t.skills_example;
    let has_skills = !(skills.technical_skills.is_empty()
        && skills.soft_skills.is_empty()
        && skills.tools.is_empty());
    [
        ("experience", !t.work_experience_example.is_empty()),
        ("education", !t.education_example.trim().is_empty()),
        ("skills", has_skills),
        ("projects", !t.projects_example.is_empty()),
    ]
    .into_iter()
    .filter(|(_, present)| !present)
    .map(|(name, _)| name)
    .collect()
}

/// Percentage of the four core sections that have content
pub fn section_coverage(t: &ResumeTemplate) -> f64 {
    let missing = missing_core_sections(t).len() as f64;
    (4.0 - missing) / 4.0 * 100.0
}

/// Tokens as a TF-IDF vectorizer sees them: lowercase alphanumeric runs of
/// two or more characters
fn tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() >= 2)
        .map(str::to_lowercase)
        .collect()
}

fn term_counts(text: &str) -> HashMap<String, f64> {
    let mut counts = HashMap::new();
    for token in tokens(text) {
        *counts.entry(token).or_insert(0.0) += 1.0;
    }
    counts
}

/// TF-IDF weights of one document's terms, with IDF smoothed over the
/// two-document corpus: `ln(3 / (1 + df)) + 1`
fn tfidf<'a>(counts: &'a HashMap<String, f64>, other: &HashMap<String, f64>) -> HashMap<&'a str, f64> {
    counts
        .iter()
        .map(|(term, tf)| {
            let df: f64 = if other.contains_key(term) { 2.0 } else { 1.0 };
            (term.as_str(), tf * ((3.0 / (1.0 + df)).ln() + 1.0))
        })
        .collect()
}

/// TF-IDF cosine similarity of two texts, as a percentage
pub fn content_similarity(a: &str, b: &str) -> f64 {
    let ta = term_counts(a);
    let tb = term_counts(b);
    let va = tfidf(&ta, &tb);
    let vb = tfidf(&tb, &ta);

    let norm = |v: &HashMap<&str, f64>| v.values().map(|x| x * x).sum::<f64>().sqrt();
    let (na, nb) = (norm(&va), norm(&vb));
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    let dot: f64 = va
        .iter()
        .filter_map(|(term, x)| vb.get(term).map(|y| x * y))
        .sum();
    (dot / (na * nb) * 100.0).clamp(0.0, 100.0)
}

/// Checklist score from 0 to 100
///
/// +20 each for experience, education and skills; +20 for a length within
/// [`WORD_RANGE`] words, otherwise -10; +5 per [`BONUS_KEYWORDS`] hit; -20
/// when the personal info lacks an email address or phone number.
pub fn rule_score(t: &ResumeTemplate) -> u8 {
    let text = t.full_text();
    let missing = missing_core_sections(t);
    let mut score: i32 = ["experience", "education", "skills"]
        .iter()
        .filter(|s| !missing.contains(*s))
        .count() as i32
        * 20;

    if WORD_RANGE.contains(&text.split_whitespace().count()) {
        score += 20;
    } else {
        score -= 10;
    }

    score += BONUS_KEYWORDS.iter().filter(|k| text.contains(*k)).count() as i32 * 5;

    if !(has_email(&t.personal_info_example) && has_phone(&t.personal_info_example)) {
        score -= 20;
    }

    score.clamp(0, 100) as u8
}

/// Scores templates, optionally against a job description
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    job_description: Option<String>,
    keywords: Vec<String>,
}

impl Ranker {
    pub fn new(job_description: Option<&str>) -> Self {
        let job_description = job_description
            .map(str::trim)
            .filter(|jd| !jd.is_empty())
            .map(str::to_string);
        let keywords = job_description
            .as_deref()
            .map(extract_keywords)
            .unwrap_or_default();
        debug!(keywords = keywords.len(), "ranker ready");
        Self {
            job_description,
            keywords,
        }
    }

    /// Keywords extracted from the job description
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn rank(&self, t: &ResumeTemplate) -> Ranking {
        let text = t.full_text();
        let missing = missing_core_sections(t);

        let scores = Scores {
            keyword_relevance: self
                .job_description
                .as_ref()
                .map(|_| keyword_relevance(&self.keywords, &text)),
            formatting: section_coverage(t),
            content_quality: self
                .job_description
                .as_deref()
                .map(|jd| content_similarity(&text, jd)),
            rule_score: rule_score(t),
        };

        let weighted = [
            (scores.keyword_relevance, KEYWORD_WEIGHT),
            (Some(scores.formatting), FORMATTING_WEIGHT),
            (scores.content_quality, CONTENT_WEIGHT),
        ];
        let (sum, weight) = weighted
            .iter()
            .filter_map(|(score, w)| score.map(|s| (s * w, *w)))
            .fold((0.0, 0.0), |(sum, total), (s, w)| (sum + s, total + w));
        let overall_score = sum / weight;

        let feedback = self.feedback(t, &scores, &missing);
        debug!(title = %t.template_title, overall_score, "ranked template");

        Ranking {
            template_title: t.template_title.clone(),
            overall_score,
            scores,
            feedback,
        }
    }

    /// Rank every template, best first; ties keep collection order
    pub fn rank_all<'a>(&self, templates: impl IntoIterator<Item = &'a ResumeTemplate>) -> Vec<Ranking> {
        let mut rankings: Vec<Ranking> = templates.into_iter().map(|t| self.rank(t)).collect();
        rankings.sort_by(|a, b| b.overall_score.total_cmp(&a.overall_score));
        rankings
    }

    fn feedback(
        &self,
        t: &ResumeTemplate,
        scores: &Scores,
        missing: &[&str],
    ) -> BTreeMap<&'static str, String> {
        let mut feedback = BTreeMap::new();

        if scores.keyword_relevance.is_some_and(|s| s < KEYWORD_RELEVANCE_THRESHOLD) {
            feedback.insert(
                "keyword_relevance",
                "Consider including more keywords from the job description to improve relevance."
                    .to_string(),
            );
        }
        if scores.formatting < FORMATTING_THRESHOLD {
            feedback.insert(
                "formatting",
                format!("Add content to the empty core sections: {}.", missing.join(", ")),
            );
        }
        if scores.content_quality.is_some_and(|s| s < CONTENT_QUALITY_THRESHOLD) {
            feedback.insert(
                "content_quality",
                "Work on the clarity and relevance of the content for this job description."
                    .to_string(),
            );
        }
        if !(has_email(&t.personal_info_example) && has_phone(&t.personal_info_example)) {
            feedback.insert(
                "contact",
                "Include an email address and a phone number in personal_info_example."
                    .to_string(),
            );
        }

        if feedback.is_empty() {
            let message = if self.job_description.is_some() {
                "The template is well-structured and relevant to the job description."
            } else {
                "The template is well-structured."
            };
            feedback.insert("overall", message.to_string());
        }
        feedback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::load_samples;
    use crate::entities::{ProjectEntry, Skills, WorkExperienceEntry};

    fn template(title: &str) -> ResumeTemplate {
        ResumeTemplate {
            template_title: title.to_string(),
            personal_info_example: "Sam Lee | sam@example.com | +1 555 010 2030".to_string(),
            career_objective_example: "Backend engineer focused on Rust services".to_string(),
            skills_example: Skills {
                technical_skills: vec!["Rust".into(), "PostgreSQL".into()],
                soft_skills: vec![],
                tools: vec!["Docker".into()],
            },
            work_experience_example: vec![WorkExperienceEntry {
                job_title: "Engineer".into(),
                company_name: "ABC".into(),
                location: "Remote".into(),
                start_date: "2021".into(),
                end_date: "Present".into(),
                responsibilities: vec!["Built payment APIs in Rust".into()],
            }],
            education_example: "B.S. Computer Science".to_string(),
            certifications_example: vec![],
            projects_example: vec![ProjectEntry {
                project_name: "Ledger".into(),
                description: "Accounting service".into(),
                technologies_used: vec!["Rust".into()],
            }],
            languages_example: vec![],
            awards_example: vec![],
            interests_example: vec![],
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_extract_keywords() {
        let keywords = extract_keywords("We need Rust, rust and SQL. An API expert!");
        assert_eq!(keywords, vec!["need", "rust", "and", "sql", "api", "expert"]);
        assert!(extract_keywords("").is_empty());
    }

    #[test]
    fn test_keyword_relevance() {
        let keywords = extract_keywords("Rust PostgreSQL Kubernetes Terraform");
        let text = template("T").full_text();
        assert!(close(keyword_relevance(&keywords, &text), 50.0));
        assert_eq!(keyword_relevance(&[], &text), 0.0);
    }

    #[test]
    fn test_section_coverage() {
        let mut t = template("T");
        assert_eq!(section_coverage(&t), 100.0);
        t.projects_example.clear();
        t.education_example = "  ".into();
        assert_eq!(missing_core_sections(&t), vec!["education", "projects"]);
        assert_eq!(section_coverage(&t), 50.0);
    }

    #[test]
    fn test_content_similarity_bounds() {
        let text = "rust services and payment apis";
        assert!(close(content_similarity(text, text), 100.0));
        assert_eq!(content_similarity("rust services", "watercolor painting"), 0.0);
        assert_eq!(content_similarity("", "anything"), 0.0);

        let partial = content_similarity("rust payment services", "rust services for retail");
        assert!(partial > 0.0 && partial < 100.0, "{}", partial);
    }

    #[test]
    fn test_rule_score_clamps_and_penalizes_missing_contact() {
        let t = template("T");
        // 60 for sections, -10 for length
        assert_eq!(rule_score(&t), 50);

        let mut no_contact = t.clone();
        no_contact.personal_info_example = "Sam Lee".into();
        assert_eq!(rule_score(&no_contact), 30);

        let mut bare = template("Bare");
        bare.personal_info_example.clear();
        bare.work_experience_example.clear();
        bare.education_example.clear();
        bare.skills_example = Skills::default();
        assert_eq!(rule_score(&bare), 0);
    }

    #[test]
    fn test_rank_without_job_description() {
        let ranking = Ranker::new(None).rank(&template("T"));
        assert_eq!(ranking.scores.keyword_relevance, None);
        assert_eq!(ranking.scores.content_quality, None);
        assert!(close(ranking.overall_score, ranking.scores.formatting));
        assert_eq!(
            ranking.feedback.get("overall").map(String::as_str),
            Some("The template is well-structured.")
        );
    }

    #[test]
    fn test_blank_job_description_is_ignored() {
        let ranker = Ranker::new(Some("   \n"));
        assert!(ranker.keywords().is_empty());
        assert_eq!(ranker.rank(&template("T")).scores.keyword_relevance, None);
    }

    #[test]
    fn test_rank_with_job_description_weights_scores() {
        let ranker = Ranker::new(Some(
            "Rust engineer for payment services with Kafka and Kubernetes experience",
        ));
        let ranking = ranker.rank(&template("T"));
        let s = &ranking.scores;
        let expected = 0.4 * s.keyword_relevance.unwrap()
            + 0.3 * s.formatting
            + 0.3 * s.content_quality.unwrap();
        assert!(close(ranking.overall_score, expected));
        assert!(ranking.feedback.contains_key("keyword_relevance"));
        assert!(!ranking.feedback.contains_key("overall"));
    }

    #[test]
    fn test_rank_all_orders_samples_by_fit() {
        let samples = load_samples().unwrap();
        let ranker = Ranker::new(Some(
            "Senior Software Engineer: Rust, Go, PostgreSQL, Kubernetes, distributed systems",
        ));
        let rankings = ranker.rank_all(samples.all());
        assert_eq!(rankings.len(), 3);
        assert_eq!(rankings[0].template_title, "Modern Software Engineer Resume");
        assert!(rankings
            .windows(2)
            .all(|w| w[0].overall_score >= w[1].overall_score));
    }
}
