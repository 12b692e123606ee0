//! Error types for entlist.

use std::time::Duration;
use thiserror::Error;

/// Result type for entlist operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for entlist operations.
///
/// Classification never partially succeeds: a call returns a complete
/// [`EntityList`](crate::EntityList) or one of these.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The annotation service could not be reached, rejected the request,
    /// or returned something we could not read.
    #[error("Annotation failed: {0}")]
    AnnotationFailed(String),

    /// The annotation request exceeded its timeout.
    #[error("Annotation timed out after {0:?}")]
    AnnotationTimedOut(Duration),

    /// An entity record is missing required fields or points outside the text.
    #[error("Invalid entity record: {0}")]
    InvalidEntityRecord(String),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration could not be loaded or is incomplete.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an annotation failure.
    pub fn annotation_failed(msg: impl Into<String>) -> Self {
        Error::AnnotationFailed(msg.into())
    }

    /// Create an invalid entity record error.
    pub fn invalid_entity(msg: impl Into<String>) -> Self {
        Error::InvalidEntityRecord(msg.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::annotation_failed("HTTP 403").to_string(),
            "Annotation failed: HTTP 403"
        );
        assert_eq!(
            Error::invalid_entity("missing name").to_string(),
            "Invalid entity record: missing name"
        );
        assert_eq!(
            Error::AnnotationTimedOut(Duration::from_secs(5)).to_string(),
            "Annotation timed out after 5s"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
