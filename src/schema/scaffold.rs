//! Skeleton generation for new template entries

use rust_embed::Embed;
use tera::Tera;
use thiserror::Error;

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

const SKELETON: &str = "resume_template.json.tera";

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Template error: {0}")]
    Render(#[from] tera::Error),
}

/// Context for skeleton generation
#[derive(Debug, Clone)]
pub struct ScaffoldContext {
    pub title: String,
    /// Number of blank work experience entries
    pub positions: usize,
}

impl ScaffoldContext {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            positions: 1,
        }
    }

    pub fn with_positions(mut self, positions: usize) -> Self {
        self.positions = positions;
        self
    }
}

/// Renders blank template entries from the embedded skeleton
pub struct ScaffoldGenerator {
    tera: Tera,
}

impl ScaffoldGenerator {
    pub fn new() -> Result<Self, ScaffoldError> {
        let mut tera = Tera::default();
        let file = EmbeddedTemplates::get(SKELETON)
            .ok_or_else(|| ScaffoldError::TemplateNotFound(SKELETON.to_string()))?;
        let content = String::from_utf8_lossy(&file.data);
        tera.add_raw_template(SKELETON, &content)?;
        Ok(Self { tera })
    }

    /// Render a blank template entry as JSON text
    pub fn generate(&self, ctx: &ScaffoldContext) -> Result<String, ScaffoldError> {
        let mut context = tera::Context::new();
        context.insert("title", &ctx.title);
        context.insert("positions", &ctx.positions);
        Ok(self.tera.render(SKELETON, &context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::validator::validate_template;

    #[test]
    fn test_skeleton_is_valid_template() {
        let generator = ScaffoldGenerator::new().unwrap();
        let json = generator
            .generate(&ScaffoldContext::new("Nurse Practitioner Resume"))
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["template_title"], "Nurse Practitioner Resume");
        assert!(validate_template(&value).is_empty(), "{}", json);
        assert_eq!(value["work_experience_example"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_title_is_escaped() {
        let generator = ScaffoldGenerator::new().unwrap();
        let title = "Chef \"Head\" Resume";
        let json = generator.generate(&ScaffoldContext::new(title)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["template_title"], title);
    }

    #[test]
    fn test_position_count() {
        let generator = ScaffoldGenerator::new().unwrap();
        for n in [0, 3] {
            let json = generator
                .generate(&ScaffoldContext::new("X").with_positions(n))
                .unwrap();
            let value: serde_json::Value = serde_json::from_str(&json).unwrap();
            assert_eq!(value["work_experience_example"].as_array().unwrap().len(), n);
        }
    }
}
