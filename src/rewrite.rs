//! Span search and single-pass text rewriting.
//!
//! Every candidate span is found against the *original* text, conflicts
//! between overlapping candidates are settled by a [`ConflictStrategy`], and
//! the surviving spans are applied in one left-to-right pass. Rewrites never
//! see each other's output, so the order entities arrive in can only matter
//! through the strategy.

use serde::{Deserialize, Serialize};

use crate::entity::normalize_name;

/// The definite article, lowercase.
pub const ARTICLE: &str = "the ";

/// Sentence-initial form of [`ARTICLE`].
pub const CAPITALIZED_ARTICLE: &str = "The ";

const POSSESSIVE_SUFFIXES: [&str; 2] = ["'s", "\u{2019}s"];

/// Strategy for resolving overlapping rewrite spans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictStrategy {
    /// Leftmost span wins; at the same start the longest wins. Prefers
    /// "the New York Times" over "the New York".
    #[default]
    LongestSpan,

    /// Entities claim spans in the order the annotator returned them.
    Priority,
}

/// A byte range of the original text and what replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Start (byte offset, inclusive)
    pub start: usize,
    /// End (byte offset, exclusive)
    pub end: usize,
    /// Index of the name that produced this span
    pub owner: usize,
    /// Replacement text
    pub replacement: String,
}

impl Span {
    /// Span length in bytes.
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if this span overlaps with another.
    #[must_use]
    pub fn overlaps(&self, other: &Span) -> bool {
        !(self.end <= other.start || other.end <= self.start)
    }
}

/// Every "the <name>" occurrence in `text`, rewritten to
/// "the <name_with_underscores>". The article keeps its original casing.
#[must_use]
pub fn determined_spans(text: &str, name: &str, owner: usize, capitalized: bool) -> Vec<Span> {
    let normalized = normalize_name(name);
    let mut articles = vec![ARTICLE];
    if capitalized {
        articles.push(CAPITALIZED_ARTICLE);
    }

    let mut spans = Vec::new();
    for article in articles {
        let pattern = format!("{article}{name}");
        for (start, matched) in text.match_indices(&pattern) {
            spans.push(Span {
                start,
                end: start + matched.len(),
                owner,
                replacement: format!("{article}{normalized}"),
            });
        }
    }
    spans.sort_by_key(|s| s.start);
    spans
}

/// Every "<name>'s" occurrence in `text`, rewritten to
/// "<name_with_underscores>'s". Straight and typographic apostrophes both
/// count.
#[must_use]
pub fn possessive_spans(text: &str, name: &str, owner: usize) -> Vec<Span> {
    let normalized = normalize_name(name);
    let mut spans = Vec::new();
    for suffix in POSSESSIVE_SUFFIXES {
        let pattern = format!("{name}{suffix}");
        for (start, matched) in text.match_indices(&pattern) {
            spans.push(Span {
                start,
                end: start + matched.len(),
                owner,
                replacement: format!("{normalized}{suffix}"),
            });
        }
    }
    spans.sort_by_key(|s| s.start);
    spans
}

/// Keep a non-overlapping subset of `candidates`, sorted by start.
#[must_use]
pub fn resolve(mut candidates: Vec<Span>, strategy: ConflictStrategy) -> Vec<Span> {
    let mut kept: Vec<Span> = Vec::with_capacity(candidates.len());
    match strategy {
        ConflictStrategy::LongestSpan => {
            candidates.sort_by(|a, b| {
                a.start
                    .cmp(&b.start)
                    .then(b.len().cmp(&a.len()))
                    .then(a.owner.cmp(&b.owner))
            });
            let mut frontier = 0;
            for span in candidates {
                if span.start >= frontier {
                    frontier = span.end;
                    kept.push(span);
                }
            }
        }
        ConflictStrategy::Priority => {
            candidates.sort_by(|a, b| a.owner.cmp(&b.owner).then(a.start.cmp(&b.start)));
            for span in candidates {
                if !kept.iter().any(|k| k.overlaps(&span)) {
                    kept.push(span);
                }
            }
            kept.sort_by_key(|s| s.start);
        }
    }
    kept
}

/// Apply non-overlapping spans, sorted by start, to `text` in one pass.
#[must_use]
pub fn apply(text: &str, spans: &[Span]) -> String {
    let mut out = String::with_capacity(text.len() + spans.len());
    let mut cursor = 0;
    for span in spans {
        debug_assert!(span.start >= cursor, "spans must be sorted and disjoint");
        out.push_str(&text[cursor..span.start]);
        out.push_str(&span.replacement);
        cursor = span.end;
    }
    out.push_str(&text[cursor..]);
    out
}
