//! Candidate extraction: walk backward from the cursor, phrase by phrase,
//! and look each phrase up in the name index.

use linksuggest_core::{Suggestion, SuggestConfig};
use linksuggest_index::NameIndex;

/// Produces raw, unreconciled suggestions for one line of text.
pub struct Extractor<'a> {
    index: &'a NameIndex,
    config: &'a SuggestConfig,
}

impl<'a> Extractor<'a> {
    #[must_use]
    pub fn new(index: &'a NameIndex, config: &'a SuggestConfig) -> Self {
        Self { index, config }
    }

    /// Candidate suggestions for `text` (line number `line`) with the
    /// cursor at character column `cursor`.
    ///
    /// The word under the cursor is completed up to the next delimiter.
    /// Then, for each delimiter found walking backward (and for column 0),
    /// the text from just after it to the end is trimmed and queried
    /// against both name maps, so candidates grow one word at a time:
    /// `plan`, `project plan`, `the project plan`. At most
    /// `max_words` non-empty candidates are examined; only those with at
    /// least one match become suggestions.
    #[must_use]
    pub fn extract(&self, line: usize, text: &str, cursor: usize) -> Vec<Suggestion> {
        let chars: Vec<char> = text.chars().collect();
        let cursor = cursor.min(chars.len());
        let end = chars[cursor..]
            .iter()
            .position(|&c| self.config.is_delimiter(c))
            .map_or(chars.len(), |offset| cursor + offset);

        let mut suggestions = Vec::new();
        let mut examined = 0;

        for i in (0..end).rev() {
            if examined >= self.config.max_words {
                break;
            }
            let at_delimiter = self.config.is_delimiter(chars[i]);
            if !at_delimiter && i != 0 {
                continue;
            }
            let start = if at_delimiter { i + 1 } else { i };
            let Some((word_start, word)) = trimmed(&chars[start..end]) else {
                continue;
            };
            examined += 1;

            let hits = self.index.query_all(&word);
            tracing::debug!(word = %word, hits = hits.len(), "checked word");
            if !hits.is_empty() {
                suggestions.push(Suggestion::new(word, line, start + word_start, hits));
            }
        }

        suggestions
    }
}

/// Whitespace-trimmed text of `chars` with its offset, `None` if blank.
fn trimmed(chars: &[char]) -> Option<(usize, String)> {
    let first = chars.iter().position(|c| !c.is_whitespace())?;
    let last = chars.iter().rposition(|c| !c.is_whitespace())?;
    Some((first, chars[first..=last].iter().collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use linksuggest_core::Entity;

    fn index() -> NameIndex {
        let mut index = NameIndex::new();
        index.rebuild(
            [
                ("project plan", Entity::document("work/project plan", "Project Plan")),
                ("budget", Entity::document("budget", "Budget")),
            ],
            [("key risks", Entity::header("risks.md#key risks", "Key Risks"))],
        );
        index
    }

    fn extract(text: &str, cursor: usize) -> Vec<Suggestion> {
        let index = index();
        let config = SuggestConfig::default();
        Extractor::new(&index, &config).extract(0, text, cursor)
    }

    #[test]
    fn finds_multi_word_document_name() {
        let found = extract("the project plan", 16);
        let exact = found
            .iter()
            .find(|s| s.matched_text == "project plan")
            .expect("project plan suggestion");
        assert_eq!(exact.ch, 4);
        assert_eq!(exact.length, 12);
        assert_eq!(exact.entities[0].display_name(), "Project Plan");
        assert!((exact.entities[0].similarity - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn finds_header_by_heading_text() {
        let found = extract("see key risks", 13);
        let hit = found.iter().find(|s| s.matched_text == "key risks").unwrap();
        assert_eq!(hit.entities[0].identifier(), "risks.md#key risks");
        assert_eq!(hit.ch, 4);
    }

    #[test]
    fn completes_word_under_cursor() {
        // cursor between "bud" and "get"
        let found = extract("our budget, then more", 7);
        assert!(found.iter().any(|s| s.matched_text == "budget" && s.ch == 4));
        assert!(found.iter().all(|s| !s.matched_text.contains("then")));
    }

    #[test]
    fn word_at_line_start_is_included() {
        let found = extract("budget", 6);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].ch, 0);
    }

    #[test]
    fn repeated_spaces_do_not_shift_span() {
        let found = extract("a  budget", 9);
        let starts: Vec<_> = found
            .iter()
            .filter(|s| s.matched_text == "budget")
            .map(|s| s.ch)
            .collect();
        assert!(!starts.is_empty());
        assert!(starts.iter().all(|&ch| ch == 3));
    }

    #[test]
    fn trailing_whitespace_yields_nothing_new() {
        assert!(extract("   ", 3).is_empty());
        assert!(extract("", 0).is_empty());
    }

    #[test]
    fn stops_after_max_words() {
        let index = index();
        let config = SuggestConfig {
            max_words: 1,
            ..SuggestConfig::default()
        };
        // only "plan" is examined, which matches nothing
        let found = Extractor::new(&index, &config).extract(0, "project plan", 12);
        assert!(found.is_empty());
    }

    #[test]
    fn cursor_past_end_is_clamped() {
        let found = extract("budget", 100);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn suggestions_carry_line_and_owner() {
        let index = index();
        let config = SuggestConfig::default();
        let found = Extractor::new(&index, &config).extract(7, "budget", 6);
        assert_eq!(found[0].line, 7);
        assert!(found[0].entities.iter().all(|e| e.owner == Some(found[0].id)));
    }
}
