//! Query text editing (pure state transitions).
//!
//! The cursor is a character index, so multi-byte input edits cleanly.

/// An edit to the query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryEdit {
    /// Insert a character at the cursor and advance past it.
    Insert(char),
    /// Delete the character before the cursor.
    Backspace,
    /// Delete the character under the cursor.
    Delete,
    /// Move the cursor one character left. Saturates at 0.
    Left,
    /// Move the cursor one character right. Saturates at the end.
    Right,
    /// Move the cursor to the start.
    Home,
    /// Move the cursor to the end.
    End,
    /// Remove all text.
    Clear,
}

/// Editable query text with a cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryInput {
    text: String,
    cursor: usize,
}

impl QueryInput {
    /// Input pre-filled with `text`, cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the text is the empty string.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Apply an edit in place.
    pub fn apply(&mut self, edit: QueryEdit) {
        let len = self.text.chars().count();
        match edit {
            QueryEdit::Insert(ch) => {
                let at = self.byte_index(self.cursor);
                self.text.insert(at, ch);
                self.cursor += 1;
            }
            QueryEdit::Backspace => {
                if self.cursor > 0 {
                    let at = self.byte_index(self.cursor - 1);
                    self.text.remove(at);
                    self.cursor -= 1;
                }
            }
            QueryEdit::Delete => {
                if self.cursor < len {
                    let at = self.byte_index(self.cursor);
                    self.text.remove(at);
                }
            }
            QueryEdit::Left => self.cursor = self.cursor.saturating_sub(1),
            QueryEdit::Right => self.cursor = (self.cursor + 1).min(len),
            QueryEdit::Home => self.cursor = 0,
            QueryEdit::End => self.cursor = len,
            QueryEdit::Clear => {
                self.text.clear();
                self.cursor = 0;
            }
        }
    }

    /// Text before the cursor.
    pub fn before_cursor(&self) -> &str {
        &self.text[..self.byte_index(self.cursor)]
    }

    /// Text from the cursor on.
    pub fn after_cursor(&self) -> &str {
        &self.text[self.byte_index(self.cursor)..]
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> QueryInput {
        let mut input = QueryInput::default();
        for ch in text.chars() {
            input.apply(QueryEdit::Insert(ch));
        }
        input
    }

    #[test]
    fn insert_appends_and_advances_cursor() {
        let input = typed("cats");
        assert_eq!(input.text(), "cats");
        assert_eq!(input.cursor(), 4);
    }

    #[test]
    fn insert_at_cursor_in_middle() {
        let mut input = typed("cts");
        input.apply(QueryEdit::Left);
        input.apply(QueryEdit::Left);
        input.apply(QueryEdit::Insert('a'));
        assert_eq!(input.text(), "cats");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut input = typed("a");
        input.apply(QueryEdit::Home);
        input.apply(QueryEdit::Backspace);
        assert_eq!(input.text(), "a");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn backspace_removes_previous_char() {
        let mut input = typed("cats");
        input.apply(QueryEdit::Backspace);
        assert_eq!(input.text(), "cat");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn delete_removes_char_under_cursor() {
        let mut input = typed("cats");
        input.apply(QueryEdit::Home);
        input.apply(QueryEdit::Delete);
        assert_eq!(input.text(), "ats");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn delete_at_end_is_noop() {
        let mut input = typed("cats");
        input.apply(QueryEdit::Delete);
        assert_eq!(input.text(), "cats");
    }

    #[test]
    fn cursor_movement_saturates() {
        let mut input = typed("ab");
        input.apply(QueryEdit::Right);
        assert_eq!(input.cursor(), 2);
        input.apply(QueryEdit::Home);
        input.apply(QueryEdit::Left);
        assert_eq!(input.cursor(), 0);
        input.apply(QueryEdit::End);
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn multibyte_text_edits_by_character() {
        let mut input = typed("café");
        assert_eq!(input.cursor(), 4);
        input.apply(QueryEdit::Backspace);
        assert_eq!(input.text(), "caf");
        input.apply(QueryEdit::Insert('é'));
        input.apply(QueryEdit::Left);
        assert_eq!(input.before_cursor(), "caf");
        assert_eq!(input.after_cursor(), "é");
    }

    #[test]
    fn clear_empties_text_and_resets_cursor() {
        let mut input = typed("cats");
        input.apply(QueryEdit::Clear);
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn with_text_places_cursor_at_end() {
        let input = QueryInput::with_text("zürich");
        assert_eq!(input.cursor(), 6);
        assert_eq!(input.after_cursor(), "");
    }
}
