//! Entity and mention records as delivered by an annotator.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Entity type classification.
///
/// Labels follow the Cloud Natural Language entity taxonomy. Anything the
/// classifier does not act on is still kept so it can be reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityType {
    /// Person name
    Person,
    /// Location/Place
    Location,
    /// Organization name
    Organization,
    /// Street address
    Address,
    /// Event
    Event,
    /// Work of art (painting, book, song, ...)
    WorkOfArt,
    /// Consumer product
    ConsumerGood,
    /// Phone number
    PhoneNumber,
    /// Date expression
    Date,
    /// Number
    Number,
    /// Price
    Price,
    /// The annotator could not type the entity
    Unknown,
    /// Any other label, kept verbatim
    Other(String),
}

impl EntityType {
    /// Convert to the annotator's label string.
    #[must_use]
    pub fn as_label(&self) -> &str {
        match self {
            EntityType::Person => "PERSON",
            EntityType::Location => "LOCATION",
            EntityType::Organization => "ORGANIZATION",
            EntityType::Address => "ADDRESS",
            EntityType::Event => "EVENT",
            EntityType::WorkOfArt => "WORK_OF_ART",
            EntityType::ConsumerGood => "CONSUMER_GOOD",
            EntityType::PhoneNumber => "PHONE_NUMBER",
            EntityType::Date => "DATE",
            EntityType::Number => "NUMBER",
            EntityType::Price => "PRICE",
            EntityType::Unknown => "UNKNOWN",
            EntityType::Other(s) => s.as_str(),
        }
    }

    /// Parse from a label string. Case-insensitive; common short forms
    /// (`PER`, `ORG`, `LOC`) are accepted.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_uppercase().as_str() {
            "PERSON" | "PER" => EntityType::Person,
            "LOCATION" | "LOC" => EntityType::Location,
            "ORGANIZATION" | "ORG" => EntityType::Organization,
            "ADDRESS" => EntityType::Address,
            "EVENT" => EntityType::Event,
            "WORK_OF_ART" => EntityType::WorkOfArt,
            "CONSUMER_GOOD" => EntityType::ConsumerGood,
            "PHONE_NUMBER" => EntityType::PhoneNumber,
            "DATE" => EntityType::Date,
            "NUMBER" => EntityType::Number,
            "PRICE" => EntityType::Price,
            "UNKNOWN" | "" => EntityType::Unknown,
            other => EntityType::Other(other.to_string()),
        }
    }

    /// Location or organization: the types that take a definite article.
    #[must_use]
    pub fn takes_article(&self) -> bool {
        matches!(self, EntityType::Location | EntityType::Organization)
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

impl From<String> for EntityType {
    fn from(label: String) -> Self {
        EntityType::from_label(&label)
    }
}

impl From<EntityType> for String {
    fn from(t: EntityType) -> Self {
        t.as_label().to_string()
    }
}

/// How an entity is referred to at one occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MentionType {
    /// Proper noun usage ("the Louvre")
    Proper,
    /// Common noun usage ("the museum")
    Common,
    /// The annotator could not tell
    Unknown,
    /// Any other label, kept verbatim
    Other(String),
}

impl MentionType {
    /// Convert to the annotator's label string.
    #[must_use]
    pub fn as_label(&self) -> &str {
        match self {
            MentionType::Proper => "PROPER",
            MentionType::Common => "COMMON",
            MentionType::Unknown => "TYPE_UNKNOWN",
            MentionType::Other(s) => s.as_str(),
        }
    }

    /// Parse from a label string (case-insensitive).
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_uppercase().as_str() {
            "PROPER" => MentionType::Proper,
            "COMMON" => MentionType::Common,
            "TYPE_UNKNOWN" | "UNKNOWN" | "" => MentionType::Unknown,
            other => MentionType::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for MentionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

impl From<String> for MentionType {
    fn from(label: String) -> Self {
        MentionType::from_label(&label)
    }
}

impl From<MentionType> for String {
    fn from(t: MentionType) -> Self {
        t.as_label().to_string()
    }
}

/// One occurrence of an entity in the analyzed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    /// Surface form at this occurrence
    pub text: String,
    /// Start position (UTF-8 byte offset in the analyzed text)
    pub begin_offset: usize,
    /// Proper/common usage
    pub mention_type: MentionType,
}

impl Mention {
    /// Create a new mention.
    #[must_use]
    pub fn new(text: impl Into<String>, begin_offset: usize, mention_type: MentionType) -> Self {
        Self {
            text: text.into(),
            begin_offset,
            mention_type,
        }
    }

    /// Build a mention for the first occurrence of `surface` in `text`.
    #[must_use]
    pub fn find(text: &str, surface: &str, mention_type: MentionType) -> Option<Self> {
        text.find(surface)
            .map(|offset| Self::new(surface, offset, mention_type))
    }

    /// Byte offset one past the end of this mention.
    #[must_use]
    pub fn end_offset(&self) -> usize {
        self.begin_offset + self.text.len()
    }

    /// Whether this mention is proper-noun usage.
    #[must_use]
    pub fn is_proper(&self) -> bool {
        self.mention_type == MentionType::Proper
    }
}

/// A detected real-world referent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Canonical name; may contain spaces
    pub name: String,
    /// Entity type classification
    pub entity_type: EntityType,
    /// Occurrences in the text, in the order the annotator reported them
    pub mentions: Vec<Mention>,
}

impl Entity {
    /// Create an entity with no mentions yet.
    #[must_use]
    pub fn new(name: impl Into<String>, entity_type: EntityType) -> Self {
        Self {
            name: name.into(),
            entity_type,
            mentions: Vec::new(),
        }
    }

    /// Add a mention.
    #[must_use]
    pub fn with_mention(mut self, mention: Mention) -> Self {
        self.mentions.push(mention);
        self
    }

    /// The first reported mention.
    #[must_use]
    pub fn primary_mention(&self) -> Option<&Mention> {
        self.mentions.first()
    }

    /// Check that this record is usable against `text`.
    ///
    /// Fails on an empty name, an entity without mentions, or a mention whose
    /// offset does not land on its own surface form inside `text`.
    pub fn validate(&self, text: &str) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid_entity(format!(
                "{} entity has an empty name",
                self.entity_type
            )));
        }
        if self.mentions.is_empty() {
            return Err(Error::invalid_entity(format!(
                "entity '{}' has no mentions",
                self.name
            )));
        }
        for mention in &self.mentions {
            let start = mention.begin_offset;
            let end = mention.end_offset();
            let located = text
                .get(start..end)
                .is_some_and(|slice| slice == mention.text);
            if !located {
                return Err(Error::invalid_entity(format!(
                    "entity '{}' has mention '{}' at {}..{} that does not match the text",
                    self.name, mention.text, start, end
                )));
            }
        }
        Ok(())
    }
}

/// Replace spaces with underscores so a multi-word name reads as one token.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.replace(' ', "_")
}
