//! Read-only view over a loaded set of templates

use std::collections::HashMap;
use std::sync::Arc;

use crate::entities::ResumeTemplate;

/// An immutable, ordered collection of resume templates
///
/// Titles are unique; construction through [`crate::core::loader`] enforces
/// this. Cloning is cheap and clones share the same data, so a collection
/// can be handed to any number of readers or threads.
#[derive(Debug, Clone)]
pub struct ResumeTemplateCollection {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    source_name: String,
    templates: Vec<ResumeTemplate>,
    by_title: HashMap<String, usize>,
}

impl ResumeTemplateCollection {
    /// Build from templates already checked for unique titles
    pub(crate) fn new(source_name: impl Into<String>, templates: Vec<ResumeTemplate>) -> Self {
        let by_title = templates
            .iter()
            .enumerate()
            .map(|(i, t)| (t.template_title.clone(), i))
            .collect();
        Self {
            inner: Arc::new(Inner {
                source_name: source_name.into(),
                templates,
                by_title,
            }),
        }
    }

    /// All templates in file order
    pub fn all(&self) -> &[ResumeTemplate] {
        &self.inner.templates
    }

    /// Exact, case-sensitive lookup by `template_title`
    pub fn by_title(&self, title: &str) -> Option<&ResumeTemplate> {
        self.inner
            .by_title
            .get(title)
            .and_then(|&i| self.inner.templates.get(i))
    }

    pub fn count(&self) -> usize {
        self.inner.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.templates.is_empty()
    }

    /// Template at a position in file order
    pub fn get(&self, index: usize) -> Option<&ResumeTemplate> {
        self.inner.templates.get(index)
    }

    /// Titles in file order
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.inner.templates.iter().map(|t| t.template_title.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResumeTemplate> {
        self.inner.templates.iter()
    }

    /// Name of the file or buffer the templates were loaded from
    pub fn source_name(&self) -> &str {
        &self.inner.source_name
    }
}

impl<'a> IntoIterator for &'a ResumeTemplateCollection {
    type Item = &'a ResumeTemplate;
    type IntoIter = std::slice::Iter<'a, ResumeTemplate>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Skills;

    fn template(title: &str) -> ResumeTemplate {
        ResumeTemplate {
            template_title: title.to_string(),
            personal_info_example: String::new(),
            career_objective_example: String::new(),
            skills_example: Skills::default(),
            work_experience_example: Vec::new(),
            education_example: String::new(),
            certifications_example: Vec::new(),
            projects_example: Vec::new(),
            languages_example: Vec::new(),
            awards_example: Vec::new(),
            interests_example: Vec::new(),
        }
    }

    #[test]
    fn test_order_and_lookup() {
        let c = ResumeTemplateCollection::new("mem", vec![template("B"), template("A"), template("C")]);
        assert_eq!(c.count(), 3);
        assert_eq!(c.titles().collect::<Vec<_>>(), vec!["B", "A", "C"]);
        for t in c.all() {
            assert_eq!(c.by_title(&t.template_title), Some(t));
        }
        assert_eq!(c.get(1).map(|t| t.template_title.as_str()), Some("A"));
        assert_eq!(c.source_name(), "mem");
    }

    #[test]
    fn test_lookup_is_exact() {
        let c = ResumeTemplateCollection::new("mem", vec![template("Data Analyst Resume")]);
        assert!(c.by_title("data analyst resume").is_none());
        assert!(c.by_title("Data Analyst Resume ").is_none());
        assert!(c.by_title("nonexistent-title-xyz").is_none());
    }

    #[test]
    fn test_empty_collection() {
        let c = ResumeTemplateCollection::new("mem", Vec::new());
        assert!(c.is_empty());
        assert_eq!(c.count(), 0);
        assert!(c.all().is_empty());
    }

    #[test]
    fn test_shared_across_threads() {
        let c = ResumeTemplateCollection::new("mem", vec![template("A"), template("B")]);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let c = c.clone();
                std::thread::spawn(move || c.by_title("B").is_some() && c.count() == 2)
            })
            .collect();
        for h in handles {
            assert!(h.join().unwrap());
        }
    }
}
