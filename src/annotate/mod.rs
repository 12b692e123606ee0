//! Annotation adapters.
//!
//! An [`Annotator`] turns plain text into the entity records the classifier
//! works on. Detection itself happens elsewhere (an NLP service); adapters
//! only carry the request and check what comes back.
//!
//! Build an annotator once and pass it to every call:
//!
//! ```rust
//! use entlist::annotate::MockAnnotator;
//! use entlist::{analyze, Classifier, Entity, EntityType, Mention, MentionType};
//!
//! let text = "Alice visited 123 Main St";
//! let annotator = MockAnnotator::new("fixture").with_entities(vec![
//!     Entity::new("Alice", EntityType::Person)
//!         .with_mention(Mention::new("Alice", 0, MentionType::Proper)),
//! ]);
//!
//! let list = analyze(&annotator, &Classifier::default(), text).unwrap();
//! assert_eq!(list.bare_proper_nouns(), ["Alice"]);
//! ```

pub mod google;

pub use google::{
    parse_analyze_entities_response, Credentials, GoogleNlpAnnotator, RecordedAnnotator,
    DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, LANGUAGE_CODE,
};

use crate::{Entity, Error, Result};

/// Source of entity annotations for a piece of text.
pub trait Annotator: Send + Sync {
    /// Detect entities in `text`.
    ///
    /// Offsets in the returned mentions are UTF-8 byte offsets into `text`.
    fn detect_entities(&self, text: &str) -> Result<Vec<Entity>>;

    /// Short identifier for logs.
    fn name(&self) -> &str;
}

/// An annotator that returns a fixed answer, for tests.
#[derive(Debug, Clone)]
pub struct MockAnnotator {
    name: &'static str,
    entities: Vec<Entity>,
    failure: Option<String>,
}

impl MockAnnotator {
    /// Create a mock that finds nothing.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entities: Vec::new(),
            failure: None,
        }
    }

    /// Set entities to return on every call.
    #[must_use]
    pub fn with_entities(mut self, entities: Vec<Entity>) -> Self {
        self.entities = entities;
        self
    }

    /// Fail every call with [`Error::AnnotationFailed`].
    #[must_use]
    pub fn with_failure(mut self, msg: impl Into<String>) -> Self {
        self.failure = Some(msg.into());
        self
    }
}

impl Annotator for MockAnnotator {
    fn detect_entities(&self, _text: &str) -> Result<Vec<Entity>> {
        match &self.failure {
            Some(msg) => Err(Error::annotation_failed(msg.clone())),
            None => Ok(self.entities.clone()),
        }
    }

    fn name(&self) -> &str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EntityType;

    #[test]
    fn test_mock_returns_entities() {
        let mock = MockAnnotator::new("mock")
            .with_entities(vec![Entity::new("Louvre", EntityType::Location)]);
        let found = mock.detect_entities("anything").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Louvre");
        assert_eq!(mock.name(), "mock");
    }

    #[test]
    fn test_mock_failure() {
        let mock = MockAnnotator::new("mock").with_failure("quota exceeded");
        let err = mock.detect_entities("anything").unwrap_err();
        assert!(matches!(err, Error::AnnotationFailed(ref m) if m == "quota exceeded"));
    }

    #[test]
    fn test_trait_object() {
        let annotators: Vec<Box<dyn Annotator>> = vec![
            Box::new(MockAnnotator::new("a")),
            Box::new(MockAnnotator::new("b").with_failure("down")),
        ];
        assert!(annotators[0].detect_entities("x").unwrap().is_empty());
        assert!(annotators[1].detect_entities("x").is_err());
    }
}
