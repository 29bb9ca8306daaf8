//! Entity types: linkable targets and their per-query scores.

use serde::{Deserialize, Serialize};

use crate::suggestion::SuggestionId;

/// Which name map an entity was indexed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Document,
    Header,
}

/// A linkable target in the corpus: a document or a section header.
///
/// Entities are created by the index builder and never mutated; a rebuild
/// replaces them wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Normalized path or `path#anchor`, unique across the corpus.
    pub identifier: String,

    /// Name shown to the user (document base name or heading text).
    pub display_name: String,

    pub kind: EntityKind,
}

impl Entity {
    pub fn document(identifier: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            display_name: display_name.into(),
            kind: EntityKind::Document,
        }
    }

    pub fn header(identifier: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            display_name: display_name.into(),
            kind: EntityKind::Header,
        }
    }
}

/// An [`Entity`] matched against one piece of typed text.
///
/// The similarity belongs to this wrapper, never to the entity itself, and
/// `owner` names the suggestion the score was computed for. Owners are
/// resolved by id so suggestions and entities never point at each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEntity {
    pub entity: Entity,
    pub similarity: f64,
    #[serde(skip)]
    pub owner: Option<SuggestionId>,
}

impl ScoredEntity {
    /// Wrap a copy of `entity` with a score. The owner is attached when the
    /// entity is handed to a [`crate::Suggestion`].
    #[must_use]
    pub fn new(entity: Entity, similarity: f64) -> Self {
        Self {
            entity,
            similarity,
            owner: None,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.entity.identifier
    }

    pub fn display_name(&self) -> &str {
        &self.entity.display_name
    }
}
