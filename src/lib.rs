//! # entlist
//!
//! Sort the named entities of an English sentence into grammatical buckets
//! and join multi-word "the X" mentions into single tokens.
//!
//! - **Bare proper nouns**: people named without a determiner ("I met Alice")
//! - **Addresses**: usually inside prepositional phrases ("at 123 Main St")
//! - **Determined proper nouns**: places and organizations used with "the";
//!   "the Mona Lisa" is rewritten to "the Mona_Lisa" so downstream phrase
//!   matching sees one token
//!
//! Entity detection is not done here. An [`Annotator`] (by default the Cloud
//! Natural Language API) supplies entities with types and proper/common
//! mention tags; the [`Classifier`] does the rest.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use entlist::annotate::{Credentials, GoogleNlpAnnotator};
//! use entlist::{analyze, Classifier};
//!
//! let annotator = GoogleNlpAnnotator::new(Credentials::ApiKey("...".into()));
//! let classifier = Classifier::default();
//!
//! let list = analyze(&annotator, &classifier, "I saw the Mona Lisa at the Louvre")?;
//! println!("{}", list.text()); // I saw the Mona_Lisa at the Louvre
//! # Ok::<(), entlist::Error>(())
//! ```
//!
//! ## Without a service
//!
//! ```rust
//! use entlist::{Classifier, Entity, EntityType, Mention, MentionType};
//!
//! let text = "Alice visited 123 Main St";
//! let entities = vec![
//!     Entity::new("Alice", EntityType::Person)
//!         .with_mention(Mention::new("Alice", 0, MentionType::Proper)),
//!     Entity::new("123 Main St", EntityType::Address)
//!         .with_mention(Mention::new("123 Main St", 14, MentionType::Unknown)),
//! ];
//!
//! let list = Classifier::default().classify(text, &entities).unwrap();
//! assert_eq!(list.bare_proper_nouns(), ["Alice"]);
//! assert_eq!(list.address_entities(), ["123 Main St"]);
//! assert_eq!(list.text(), text);
//! ```

#![warn(missing_docs)]

pub mod annotate;
pub mod classify;
pub mod config;
mod entity;
mod entity_list;
mod error;
pub mod rewrite;

#[cfg(feature = "cli")]
pub mod cli;

pub use annotate::{Annotator, MockAnnotator};
pub use classify::{Classifier, ClassifierConfig, MentionPolicy};
pub use config::Config;
pub use entity::{normalize_name, Entity, EntityType, Mention, MentionType};
pub use entity_list::{Bucket, EntityList};
pub use error::{Error, Result};
pub use rewrite::ConflictStrategy;

/// Annotate `text` and classify what the annotator found.
///
/// The annotator is borrowed, not built here: construct it once and reuse it
/// across calls. Annotation errors are returned as they are.
pub fn analyze(
    annotator: &dyn Annotator,
    classifier: &Classifier,
    text: &str,
) -> Result<EntityList> {
    let entities = annotator.detect_entities(text)?;
    log::debug!(
        "{} returned {} entities for {} bytes",
        annotator.name(),
        entities.len(),
        text.len()
    );
    classifier.classify(text, &entities)
}

pub mod prelude {
    //! Commonly used items, re-exported for convenience.
    pub use crate::annotate::{Annotator, GoogleNlpAnnotator, MockAnnotator};
    pub use crate::{
        analyze, Bucket, Classifier, ClassifierConfig, ConflictStrategy, Entity, EntityList,
        EntityType, Error, Mention, MentionPolicy, MentionType, Result,
    };
}
