//! Entity classification and "the X" normalization.
//!
//! # Rules
//!
//! Entities are taken in the order the annotator returned them:
//!
//! | Type | Mention | Bucket | Rewrite |
//! |------|---------|--------|---------|
//! | `PERSON` | proper | bare proper noun | none |
//! | `ADDRESS` | any | address | none |
//! | `LOCATION` / `ORGANIZATION` | proper | determined proper noun, if "the <name>" occurs | "the <name>" → "the <name_joined>" |
//! | anything else | - | none | none |
//!
//! Locations and organizations that never occur after "the" land in the
//! unplaced bucket, or in the possessive bucket when possessive handling is
//! on and they occur as "<name>'s".
//!
//! # Example
//!
//! ```rust
//! use entlist::{Classifier, Entity, EntityType, Mention, MentionType};
//!
//! let text = "I saw the Mona Lisa at the Louvre";
//! let entities = vec![
//!     Entity::new("Mona Lisa", EntityType::Location)
//!         .with_mention(Mention::find(text, "Mona Lisa", MentionType::Proper).unwrap()),
//!     Entity::new("Louvre", EntityType::Location)
//!         .with_mention(Mention::find(text, "Louvre", MentionType::Proper).unwrap()),
//! ];
//!
//! let list = Classifier::default().classify(text, &entities).unwrap();
//! assert_eq!(list.text(), "I saw the Mona_Lisa at the Louvre");
//! assert_eq!(list.determined_proper_nouns(), ["Mona_Lisa", "Louvre"]);
//! ```

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityType};
use crate::entity_list::{Bucket, EntityList};
use crate::rewrite::{self, ConflictStrategy, Span};
use crate::Result;

/// Which mentions decide whether an entity is used as a proper noun.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MentionPolicy {
    /// Every mention is examined; one proper mention is enough.
    #[default]
    PerMention,
    /// Only the first reported mention is examined.
    PrimaryMention,
}

impl MentionPolicy {
    /// Whether `entity` counts as proper-noun usage under this policy.
    #[must_use]
    pub fn is_proper(&self, entity: &Entity) -> bool {
        match self {
            MentionPolicy::PerMention => entity.mentions.iter().any(|m| m.is_proper()),
            MentionPolicy::PrimaryMention => {
                entity.primary_mention().is_some_and(|m| m.is_proper())
            }
        }
    }
}

/// Classifier settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Mention selection rule
    pub mention_policy: MentionPolicy,
    /// How overlapping "the <name>" matches are settled
    pub conflict_strategy: ConflictStrategy,
    /// Place locations/organizations seen only as "<name>'s"
    pub possessives: bool,
    /// Also match a sentence-initial "The <name>"
    pub match_capitalized_article: bool,
}

/// Sorts annotated entities into buckets and joins "the X" mentions.
///
/// Immutable after construction; one instance can serve any number of calls.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    /// Create a classifier with the given settings.
    #[must_use]
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Set the mention policy.
    #[must_use]
    pub fn with_mention_policy(mut self, policy: MentionPolicy) -> Self {
        self.config.mention_policy = policy;
        self
    }

    /// Set the conflict strategy.
    #[must_use]
    pub fn with_conflict_strategy(mut self, strategy: ConflictStrategy) -> Self {
        self.config.conflict_strategy = strategy;
        self
    }

    /// Enable or disable possessive handling.
    #[must_use]
    pub fn with_possessives(mut self, enabled: bool) -> Self {
        self.config.possessives = enabled;
        self
    }

    /// Enable or disable matching "The <name>".
    #[must_use]
    pub fn with_capitalized_article(mut self, enabled: bool) -> Self {
        self.config.match_capitalized_article = enabled;
        self
    }

    /// Current settings.
    #[must_use]
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify `entities` found in `text`.
    ///
    /// Every record is validated before anything is bucketed, so a single
    /// malformed entity fails the whole call.
    pub fn classify(&self, text: &str, entities: &[Entity]) -> Result<EntityList> {
        for entity in entities {
            entity.validate(text)?;
        }

        let mut list = EntityList::new(text);
        let mut article_names: Vec<&str> = Vec::new();

        for entity in entities {
            let proper = self.config.mention_policy.is_proper(entity);
            match &entity.entity_type {
                EntityType::Person if proper => {
                    list.push(Bucket::BareProperNoun, entity.name.as_str());
                }
                EntityType::Address => {
                    list.push(Bucket::Address, entity.name.as_str());
                }
                t if t.takes_article() && proper => {
                    if article_names.contains(&entity.name.as_str()) {
                        log::debug!("'{}' already queued for rewriting", entity.name);
                    } else {
                        article_names.push(entity.name.as_str());
                    }
                }
                t => {
                    log::debug!("ignoring {} entity '{}' (proper: {})", t, entity.name, proper);
                }
            }
        }

        if !article_names.is_empty() {
            self.place_article_names(text, &article_names, &mut list);
        }

        log::debug!(
            "classified {} entities: {} bare, {} address, {} determined, {} unplaced",
            entities.len(),
            list.bare_proper_nouns().len(),
            list.address_entities().len(),
            list.determined_proper_nouns().len(),
            list.unplaced_proper_nouns().len()
        );
        Ok(list)
    }

    fn place_article_names(&self, text: &str, names: &[&str], list: &mut EntityList) {
        let strategy = self.config.conflict_strategy;

        let candidates: Vec<Span> = names
            .iter()
            .enumerate()
            .flat_map(|(owner, name)| {
                rewrite::determined_spans(text, name, owner, self.config.match_capitalized_article)
            })
            .collect();
        let mut kept = rewrite::resolve(candidates, strategy);

        let mut determined = vec![false; names.len()];
        for span in &kept {
            determined[span.owner] = true;
        }

        let mut possessive = vec![false; names.len()];
        if self.config.possessives {
            let candidates: Vec<Span> = names
                .iter()
                .enumerate()
                .filter(|(owner, _)| !determined[*owner])
                .flat_map(|(owner, name)| rewrite::possessive_spans(text, name, owner))
                .filter(|span| !kept.iter().any(|k| k.overlaps(span)))
                .collect();
            for span in rewrite::resolve(candidates, strategy) {
                possessive[span.owner] = true;
                kept.push(span);
            }
            kept.sort_by_key(|s| s.start);
        }

        for (owner, name) in names.iter().enumerate() {
            if determined[owner] {
                list.push(Bucket::DeterminedProperNoun, crate::normalize_name(name));
            } else if possessive[owner] {
                list.push(Bucket::PossessiveProperNoun, crate::normalize_name(name));
            } else {
                log::debug!("no usable determiner for '{}'", name);
                list.push(Bucket::UnplacedProperNoun, *name);
            }
        }

        list.set_text(rewrite::apply(text, &kept));
    }
}
