//! The classification result.

use serde::{Deserialize, Serialize};

/// Where an entity ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    /// Person named without a determiner ("I met Alice")
    BareProperNoun,
    /// Address, usually inside a prepositional phrase ("at 123 Main St")
    Address,
    /// Location/organization used with "the" ("the Louvre")
    DeterminedProperNoun,
    /// Location/organization used as a possessive ("Acme Corp's")
    PossessiveProperNoun,
    /// Location/organization with no usable "the" occurrence
    UnplacedProperNoun,
}

impl Bucket {
    /// Stable display name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::BareProperNoun => "bare",
            Bucket::Address => "address",
            Bucket::DeterminedProperNoun => "determined",
            Bucket::PossessiveProperNoun => "possessive",
            Bucket::UnplacedProperNoun => "unplaced",
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entities of one sentence sorted into buckets, plus the rewritten text.
///
/// Built once per classification call and not changed afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityList {
    original_text: String,
    text: String,
    bare_proper_nouns: Vec<String>,
    address_entities: Vec<String>,
    determined_proper_nouns: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    possessive_proper_nouns: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    unplaced_proper_nouns: Vec<String>,
}

impl EntityList {
    pub(crate) fn new(original_text: impl Into<String>) -> Self {
        let original_text = original_text.into();
        Self {
            text: original_text.clone(),
            original_text,
            ..Self::default()
        }
    }

    pub(crate) fn push(&mut self, bucket: Bucket, name: impl Into<String>) {
        let name = name.into();
        let names = match bucket {
            Bucket::BareProperNoun => &mut self.bare_proper_nouns,
            Bucket::Address => &mut self.address_entities,
            Bucket::DeterminedProperNoun => &mut self.determined_proper_nouns,
            Bucket::PossessiveProperNoun => &mut self.possessive_proper_nouns,
            Bucket::UnplacedProperNoun => &mut self.unplaced_proper_nouns,
        };
        names.push(name);
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }

    /// The input text as given.
    #[must_use]
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    /// The input text with every matched "the <name>" joined into one token.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether any rewrite was applied.
    #[must_use]
    pub fn is_rewritten(&self) -> bool {
        self.text != self.original_text
    }

    /// Person names used without a determiner.
    #[must_use]
    pub fn bare_proper_nouns(&self) -> &[String] {
        &self.bare_proper_nouns
    }

    /// Address names.
    #[must_use]
    pub fn address_entities(&self) -> &[String] {
        &self.address_entities
    }

    /// Underscore-joined names of locations/organizations found after "the".
    #[must_use]
    pub fn determined_proper_nouns(&self) -> &[String] {
        &self.determined_proper_nouns
    }

    /// Underscore-joined names of locations/organizations found only as
    /// possessives. Empty unless possessive handling is enabled.
    #[must_use]
    pub fn possessive_proper_nouns(&self) -> &[String] {
        &self.possessive_proper_nouns
    }

    /// Eligible locations/organizations with no surviving "the <name>"
    /// occurrence, by original name.
    #[must_use]
    pub fn unplaced_proper_nouns(&self) -> &[String] {
        &self.unplaced_proper_nouns
    }

    /// Names in a bucket.
    #[must_use]
    pub fn bucket(&self, bucket: Bucket) -> &[String] {
        match bucket {
            Bucket::BareProperNoun => &self.bare_proper_nouns,
            Bucket::Address => &self.address_entities,
            Bucket::DeterminedProperNoun => &self.determined_proper_nouns,
            Bucket::PossessiveProperNoun => &self.possessive_proper_nouns,
            Bucket::UnplacedProperNoun => &self.unplaced_proper_nouns,
        }
    }

    /// Total number of bucketed names, unplaced ones excluded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bare_proper_nouns.len()
            + self.address_entities.len()
            + self.determined_proper_nouns.len()
            + self.possessive_proper_nouns.len()
    }

    /// True when no entity was placed in a bucket.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
