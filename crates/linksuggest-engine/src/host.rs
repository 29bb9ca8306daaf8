//! Seams to the host editor and renderer, plus an in-memory editor used
//! by the CLI and tests.

use linksuggest_core::{Position, Span};

/// Cursor and line access in the active editor.
///
/// `None` means there is no active editable view; callers treat that as
/// a no-op.
pub trait EditorHost {
    fn cursor(&self) -> Option<Position>;
    fn line_text(&self, line: usize) -> Option<String>;
}

/// Receives the complete set of spans to highlight each cycle.
pub trait HighlightSink {
    fn apply_highlights(&mut self, spans: &[Span]);
    fn clear_highlights(&mut self);
}

/// Sink that keeps the last published spans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightSet {
    spans: Vec<Span>,
    applied: usize,
}

impl HighlightSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Number of `apply_highlights` calls received.
    pub fn applied(&self) -> usize {
        self.applied
    }
}

impl HighlightSink for HighlightSet {
    fn apply_highlights(&mut self, spans: &[Span]) {
        self.spans = spans.to_vec();
        self.applied += 1;
    }

    fn clear_highlights(&mut self) {
        self.spans.clear();
    }
}

/// Editable lines with a cursor. Columns count characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<String>,
    cursor: Position,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
            cursor: Position::new(0, 0),
        }
    }
}

impl TextBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer holding `text` with the cursor at its end.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        let line = lines.len() - 1;
        let ch = lines[line].chars().count();
        Self {
            lines,
            cursor: Position::new(line, ch),
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn position(&self) -> Position {
        self.cursor
    }

    /// Move the cursor, clamped to the buffer.
    pub fn set_cursor(&mut self, pos: Position) {
        let line = pos.line.min(self.lines.len() - 1);
        let ch = pos.ch.min(self.line_len(line));
        self.cursor = Position::new(line, ch);
    }

    fn line_len(&self, line: usize) -> usize {
        self.lines[line].chars().count()
    }

    fn byte_at(&self, line: usize, ch: usize) -> usize {
        self.lines[line]
            .char_indices()
            .nth(ch)
            .map_or(self.lines[line].len(), |(b, _)| b)
    }

    /// Apply a key the way an editor would after its key-down event.
    ///
    /// Understands `Backspace`, `Delete`, `Enter`, `Tab`, `ArrowLeft`,
    /// `ArrowRight` and single printable characters; anything else is
    /// ignored.
    pub fn apply_key(&mut self, key: &str) {
        let Position { line, ch } = self.cursor;
        match key {
            "Backspace" => {
                if ch > 0 {
                    let at = self.byte_at(line, ch - 1);
                    self.lines[line].remove(at);
                    self.cursor.ch -= 1;
                } else if line > 0 {
                    let tail = self.lines.remove(line);
                    let prev_len = self.line_len(line - 1);
                    self.lines[line - 1].push_str(&tail);
                    self.cursor = Position::new(line - 1, prev_len);
                }
            }
            "Delete" => {
                if ch < self.line_len(line) {
                    let at = self.byte_at(line, ch);
                    self.lines[line].remove(at);
                } else if line + 1 < self.lines.len() {
                    let next = self.lines.remove(line + 1);
                    self.lines[line].push_str(&next);
                }
            }
            "Enter" => {
                let at = self.byte_at(line, ch);
                let rest = self.lines[line].split_off(at);
                self.lines.insert(line + 1, rest);
                self.cursor = Position::new(line + 1, 0);
            }
            "Tab" => self.insert_char('\t'),
            "ArrowLeft" => self.cursor.ch = ch.saturating_sub(1),
            "ArrowRight" => self.cursor.ch = (ch + 1).min(self.line_len(line)),
            _ => {
                let mut chars = key.chars();
                if let (Some(c), None) = (chars.next(), chars.next()) {
                    if c != '\n' {
                        self.insert_char(c);
                    } else {
                        self.apply_key("Enter");
                    }
                }
            }
        }
    }

    fn insert_char(&mut self, c: char) {
        let Position { line, ch } = self.cursor;
        let at = self.byte_at(line, ch);
        self.lines[line].insert(at, c);
        self.cursor.ch += 1;
    }
}

impl EditorHost for TextBuffer {
    fn cursor(&self) -> Option<Position> {
        Some(self.cursor)
    }

    fn line_text(&self, line: usize) -> Option<String> {
        self.lines.get(line).cloned()
    }
}
