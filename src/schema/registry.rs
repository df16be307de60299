//! Embedded JSON Schema for the resume template file format

use rust_embed::Embed;
use serde_json::Value as JsonValue;

#[derive(Embed)]
#[folder = "schemas/"]
struct EmbeddedSchemas;

/// File name of the resume template document schema
pub const DOCUMENT_SCHEMA: &str = "resume_templates.schema.json";

/// Registry of the schemas compiled into the binary
#[derive(Debug, Default, Clone, Copy)]
pub struct SchemaRegistry;

impl SchemaRegistry {
    /// Names of all embedded schema files
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = EmbeddedSchemas::iter().map(|n| n.into_owned()).collect();
        names.sort();
        names
    }

    /// Raw text of an embedded schema
    pub fn get(&self, name: &str) -> Option<String> {
        EmbeddedSchemas::get(name)
            .and_then(|file| String::from_utf8(file.data.into_owned()).ok())
    }

    /// The document schema, raw
    pub fn document_schema(&self) -> Option<String> {
        self.get(DOCUMENT_SCHEMA)
    }

    /// The document schema, parsed
    pub fn document_schema_json(&self) -> Option<JsonValue> {
        self.document_schema()
            .and_then(|s| serde_json::from_str(&s).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_schema_embedded() {
        let registry = SchemaRegistry;
        assert!(registry.names().contains(&DOCUMENT_SCHEMA.to_string()));
        let schema = registry.document_schema_json().unwrap();
        assert_eq!(schema["required"][0], "resume_templates");
    }

    #[test]
    fn test_unknown_schema() {
        assert!(SchemaRegistry.get("nope.schema.json").is_none());
    }
}
