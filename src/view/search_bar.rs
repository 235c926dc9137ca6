//! Search bar widget.

use super::styles::Theme;
use crate::state::QueryInput;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Search bar showing the query being edited.
///
/// The cursor is drawn as a reversed cell while the bar has focus.
pub struct SearchBar<'a> {
    input: &'a QueryInput,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> SearchBar<'a> {
    /// Create new SearchBar widget.
    pub fn new(input: &'a QueryInput, focused: bool, theme: &'a Theme) -> Self {
        Self {
            input,
            focused,
            theme,
        }
    }

    fn line(&self, width: usize) -> Line<'a> {
        if !self.focused {
            if self.input.is_empty() {
                return Line::from(Span::styled("press / to search", self.theme.muted));
            }
            return Line::from(self.input.text());
        }

        let mut after = self.input.after_cursor().chars();
        let cursor_char = after.next().map_or_else(|| " ".to_string(), String::from);
        let rest: String = after.collect();

        Line::from(vec![
            Span::raw(visible_tail(self.input.before_cursor(), width.saturating_sub(1))),
            Span::styled(
                cursor_char,
                self.theme.snippet.add_modifier(Modifier::REVERSED),
            ),
            Span::raw(rest),
        ])
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Search ");

        let inner = block.inner(area);
        Paragraph::new(self.line(usize::from(inner.width)))
            .block(block)
            .render(area, buf);
    }
}

/// Longest suffix of `text` that fits in `width` terminal columns.
///
/// Keeps the cursor on screen once the query outgrows the bar.
fn visible_tail(text: &str, width: usize) -> &str {
    let mut start = 0;
    let mut used = text.width();
    for ch in text.chars() {
        if used <= width {
            break;
        }
        used -= ch.width().unwrap_or(0);
        start += ch.len_utf8();
    }
    &text[start..]
}
