//! Per-editor session: the suggestions currently on screen.

use std::collections::HashSet;

use linksuggest_core::{Position, Span, Suggestion, SuggestConfig};
use linksuggest_index::NameIndex;

use crate::extractor::Extractor;
use crate::host::{EditorHost, HighlightSink, TextBuffer};
use crate::reconciler::reconcile;

/// Named keys that end a word in addition to the delimiter characters.
const DELIMITER_KEYS: &[&str] = &["Tab", "Enter"];

/// Running suggestion set for one editing session.
///
/// Owned by the keystroke path; nothing else mutates it.
#[derive(Debug, Default)]
pub struct Session {
    config: SuggestConfig,
    current: Vec<Suggestion>,
}

impl Session {
    #[must_use]
    pub fn new(config: SuggestConfig) -> Self {
        Self {
            config,
            current: Vec::new(),
        }
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.current
    }

    pub fn config(&self) -> &SuggestConfig {
        &self.config
    }

    /// Whether `key` ends a word: a delimiter character, `Tab` or `Enter`.
    pub fn is_delimiter_key(&self, key: &str) -> bool {
        if DELIMITER_KEYS.contains(&key) {
            return true;
        }
        let mut chars = key.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if self.config.is_delimiter(c))
    }

    /// Handle a key-down event. The editor state is the one before `key`
    /// is applied.
    ///
    /// Suggestions ending after the cursor are dropped as stale. On a
    /// delimiter key the text before the cursor is extracted and any span
    /// not already on screen is added. The set is then capped to the most
    /// recently created suggestions, reconciled, and published in full.
    pub fn on_key_down(
        &mut self,
        key: &str,
        editor: &dyn EditorHost,
        index: &NameIndex,
        sink: &mut dyn HighlightSink,
    ) {
        let Some(cursor) = editor.cursor() else {
            tracing::warn!("no active editor, ignoring key");
            return;
        };

        self.drop_stale(cursor);

        if self.is_delimiter_key(key) {
            let found = self.extract(editor, cursor, index);
            let mut seen: HashSet<Span> = self.current.iter().map(Suggestion::span).collect();
            self.current.extend(found.into_iter().filter(|s| seen.insert(s.span())));
        }

        self.cap();
        self.current = reconcile(std::mem::take(&mut self.current), &self.config);
        self.publish(sink);
    }

    /// Extract at the cursor without a keystroke and replace the set with
    /// the reconciled result.
    pub fn find_on_cursor(
        &mut self,
        editor: &dyn EditorHost,
        index: &NameIndex,
        sink: &mut dyn HighlightSink,
    ) {
        let Some(cursor) = editor.cursor() else {
            tracing::warn!("no active editor, nothing to search");
            return;
        };
        let found = self.extract(editor, cursor, index);
        self.current = reconcile(found, &self.config);
        self.publish(sink);
    }

    /// Forward `key` to the session, then apply it to `buffer`.
    pub fn press(
        &mut self,
        key: &str,
        buffer: &mut TextBuffer,
        index: &NameIndex,
        sink: &mut dyn HighlightSink,
    ) {
        self.on_key_down(key, buffer, index, sink);
        buffer.apply_key(key);
    }

    /// Move suggestions on or below `from_line` by `delta` lines, after the
    /// host inserted or removed lines above them.
    pub fn shift_lines(&mut self, from_line: usize, delta: isize) {
        self.current = self
            .current
            .iter()
            .map(|s| {
                if s.line >= from_line {
                    s.shifted(delta, 0)
                } else {
                    s.clone()
                }
            })
            .collect();
    }

    /// Forget every suggestion and clear the highlights.
    pub fn clear(&mut self, sink: &mut dyn HighlightSink) {
        self.current.clear();
        sink.clear_highlights();
    }

    fn drop_stale(&mut self, cursor: Position) {
        self.current.retain(|s| s.span().to <= cursor);
    }

    /// Keep the `session_capacity` newest suggestions. Ids are allocated in
    /// creation order, so age survives the reordering done by `reconcile`.
    fn cap(&mut self) {
        let capacity = self.config.session_capacity;
        if self.current.len() <= capacity {
            return;
        }
        if capacity == 0 {
            self.current.clear();
            return;
        }
        let mut ids: Vec<_> = self.current.iter().map(|s| s.id).collect();
        ids.sort_unstable();
        let oldest_kept = ids[ids.len() - capacity];
        self.current.retain(|s| s.id >= oldest_kept);
    }

    fn extract(&self, editor: &dyn EditorHost, cursor: Position, index: &NameIndex) -> Vec<Suggestion> {
        let Some(text) = editor.line_text(cursor.line) else {
            tracing::warn!(line = cursor.line, "cursor line unavailable");
            return Vec::new();
        };
        Extractor::new(index, &self.config).extract(cursor.line, &text, cursor.ch)
    }

    fn publish(&self, sink: &mut dyn HighlightSink) {
        if self.current.is_empty() {
            sink.clear_highlights();
            return;
        }
        let mut spans: Vec<Span> = self.current.iter().map(Suggestion::span).collect();
        spans.sort_by_key(|span| span.from);
        sink.apply_highlights(&spans);
    }
}
