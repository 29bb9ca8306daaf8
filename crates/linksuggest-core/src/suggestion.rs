//! Suggestions: spans of recently typed text and the entities they may refer to.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::entity::ScoredEntity;

/// A line/column position. Columns count Unicode scalar values.
///
/// Ordering is document order: by line, then by column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub ch: usize,
}

impl Position {
    #[must_use]
    pub fn new(line: usize, ch: usize) -> Self {
        Self { line, ch }
    }
}

/// Half-open range `[from, to)` between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub from: Position,
    pub to: Position,
}

/// Identity of a suggestion, used by scored entities to name their owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SuggestionId(u64);

impl SuggestionId {
    /// Allocate a process-unique id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A piece of typed text on one line plus the ranked entities it might link to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(skip, default = "SuggestionId::next")]
    pub id: SuggestionId,
    pub matched_text: String,
    pub line: usize,
    pub ch: usize,
    /// Length of `matched_text` in characters.
    pub length: usize,
    pub entities: Vec<ScoredEntity>,
}

impl Suggestion {
    /// Create a suggestion anchored at `(line, ch)` and claim ownership of
    /// every entity in `entities`.
    #[must_use]
    pub fn new(
        matched_text: impl Into<String>,
        line: usize,
        ch: usize,
        entities: Vec<ScoredEntity>,
    ) -> Self {
        let matched_text = matched_text.into();
        let length = matched_text.chars().count();
        let id = SuggestionId::next();
        let entities = entities
            .into_iter()
            .map(|mut e| {
                e.owner = Some(id);
                e
            })
            .collect();
        Self {
            id,
            matched_text,
            line,
            ch,
            length,
            entities,
        }
    }

    #[must_use]
    pub fn span(&self) -> Span {
        Span {
            from: Position::new(self.line, self.ch),
            to: Position::new(self.line, self.ch + self.length),
        }
    }

    /// Mean similarity of the attached entities, `None` when there are none.
    #[must_use]
    pub fn mean_similarity(&self) -> Option<f64> {
        if self.entities.is_empty() {
            return None;
        }
        let total: f64 = self.entities.iter().map(|e| e.similarity).sum();
        Some(total / self.entities.len() as f64)
    }

    /// Return a copy moved by the given deltas. Negative deltas saturate at zero.
    #[must_use]
    pub fn shifted(&self, line_delta: isize, char_delta: isize) -> Self {
        Self {
            line: self.line.saturating_add_signed(line_delta),
            ch: self.ch.saturating_add_signed(char_delta),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;

    fn scored(id: &str, sim: f64) -> ScoredEntity {
        ScoredEntity::new(Entity::document(id, id), sim)
    }

    #[test]
    fn new_claims_entities_and_measures_chars() {
        let s = Suggestion::new("café plan", 3, 4, vec![scored("a", 0.5), scored("b", 1.0)]);
        assert_eq!(s.length, 9);
        assert!(s.entities.iter().all(|e| e.owner == Some(s.id)));
        assert_eq!(
            s.span(),
            Span {
                from: Position::new(3, 4),
                to: Position::new(3, 13),
            }
        );
    }

    #[test]
    fn mean_similarity_of_empty_is_none() {
        let s = Suggestion::new("plan", 0, 0, Vec::new());
        assert_eq!(s.mean_similarity(), None);

        let s = Suggestion::new("plan", 0, 0, vec![scored("a", 0.5), scored("b", 1.0)]);
        assert!((s.mean_similarity().unwrap() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn shifted_returns_moved_copy() {
        let s = Suggestion::new("plan", 2, 10, vec![scored("a", 1.0)]);
        let moved = s.shifted(3, -4);
        assert_eq!(moved.span().from, Position::new(5, 6));
        assert_eq!(moved.id, s.id);
        assert_eq!(s.line, 2);

        let clamped = s.shifted(-10, -20);
        assert_eq!(clamped.span().from, Position::new(0, 0));
    }

    #[test]
    fn positions_order_by_line_then_column() {
        assert!(Position::new(0, 50) < Position::new(1, 0));
        assert!(Position::new(2, 3) < Position::new(2, 4));
    }
}
