//! Field paths into a resume template document

use std::fmt;

/// Name of the top-level array holding the templates
pub const TEMPLATES_KEY: &str = "resume_templates";

/// One step in a [`FieldPath`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Location of a value inside a document
///
/// Rendered as `resume_templates[1].skills_example.tools`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of the template at `index` in the top-level array
    pub fn template(index: usize) -> Self {
        Self::root().key(TEMPLATES_KEY).index(index)
    }

    /// Child path under an object key
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.into()));
        Self { segments }
    }

    /// Child path under an array index
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Parse a JSON pointer such as `/resume_templates/0/skills_example`
    ///
    /// All-digit tokens are read as array indices.
    pub fn from_pointer(pointer: &str) -> Self {
        let segments = pointer
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|token| {
                let token = token.replace("~1", "/").replace("~0", "~");
                match token.parse::<usize>() {
                    Ok(i) => PathSegment::Index(i),
                    Err(_) => PathSegment::Key(token),
                }
            })
            .collect();
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Index of the template this path points into, if any
    pub fn template_index(&self) -> Option<usize> {
        match self.segments.as_slice() {
            [PathSegment::Key(k), PathSegment::Index(i), ..] if k == TEMPLATES_KEY => Some(*i),
            _ => None,
        }
    }

    /// The part of the path below the template root
    ///
    /// Paths that do not point into a template are returned unchanged.
    pub fn relative_to_template(&self) -> FieldPath {
        match self.template_index() {
            Some(_) => Self {
                segments: self.segments.iter().skip(2).cloned().collect(),
            },
            None => self.clone(),
        }
    }

    /// Path with the last segment removed
    pub fn parent(&self) -> FieldPath {
        let mut segments = self.segments.clone();
        segments.pop();
        Self { segments }
    }

    /// Object keys along the path, in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            PathSegment::Key(k) => Some(k.as_str()),
            PathSegment::Index(_) => None,
        })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "<root>");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(k) if i == 0 => write!(f, "{}", k)?,
                PathSegment::Key(k) => write!(f, ".{}", k)?,
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let path = FieldPath::template(1).key("skills_example").key("tools");
        assert_eq!(path.to_string(), "resume_templates[1].skills_example.tools");
        assert_eq!(FieldPath::root().to_string(), "<root>");
        assert_eq!(
            FieldPath::template(0)
                .key("work_experience_example")
                .index(2)
                .key("responsibilities")
                .index(0)
                .to_string(),
            "resume_templates[0].work_experience_example[2].responsibilities[0]"
        );
    }

    #[test]
    fn test_template_index_and_relative() {
        let path = FieldPath::template(4).key("skills_example").key("tools");
        assert_eq!(path.template_index(), Some(4));
        assert_eq!(path.relative_to_template().to_string(), "skills_example.tools");

        let top = FieldPath::root().key(TEMPLATES_KEY);
        assert_eq!(top.template_index(), None);
        assert_eq!(top.relative_to_template(), top);
    }

    #[test]
    fn test_from_pointer() {
        let path = FieldPath::from_pointer("/resume_templates/2/awards_example/0");
        assert_eq!(path, FieldPath::template(2).key("awards_example").index(0));
        assert!(FieldPath::from_pointer("").is_root());
        assert_eq!(
            FieldPath::from_pointer("/a~1b"),
            FieldPath::root().key("a/b")
        );
    }

    #[test]
    fn test_parent_and_keys() {
        let path = FieldPath::template(0).key("skills_example").key("tools");
        assert_eq!(path.parent(), FieldPath::template(0).key("skills_example"));
        let keys: Vec<_> = path.keys().collect();
        assert_eq!(keys, vec!["resume_templates", "skills_example", "tools"]);
    }
}
