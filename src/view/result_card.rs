//! Result cards: one search result as title, URL and highlighted snippet.
//!
//! Snippets arrive with `<strong>...</strong>` around matched terms. Those
//! tags become bold spans; any other markup is shown as literal text.

use super::constants::RESULT_CARD_HEIGHT;
use super::styles::Theme;
use crate::model::ResultItem;
use crate::state::ResultPage;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

const HIGHLIGHT_OPEN: &str = "<strong>";
const HIGHLIGHT_CLOSE: &str = "</strong>";

/// Columns reserved left of every card for the selection marker.
const MARKER_WIDTH: u16 = 2;

/// A run of snippet text, highlighted or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnippetSegment<'a> {
    /// The text, tags removed.
    pub text: &'a str,
    /// Whether the text was inside a highlight tag.
    pub highlighted: bool,
}

/// Split a snippet on its highlight tags.
///
/// An unclosed `<strong>` highlights to the end; a stray `</strong>` outside
/// a highlight is kept as text. Empty runs are dropped.
pub fn parse_snippet(snippet: &str) -> Vec<SnippetSegment<'_>> {
    let mut segments = Vec::new();
    let mut rest = snippet;
    let mut highlighted = false;

    loop {
        let tag = if highlighted {
            HIGHLIGHT_CLOSE
        } else {
            HIGHLIGHT_OPEN
        };
        let (text, next) = match rest.find(tag) {
            Some(at) => (&rest[..at], Some(&rest[at + tag.len()..])),
            None => (rest, None),
        };

        if !text.is_empty() {
            segments.push(SnippetSegment { text, highlighted });
        }

        match next {
            Some(next) => {
                rest = next;
                highlighted = !highlighted;
            }
            None => break,
        }
    }

    segments
}

/// Snippet as styled spans. Line breaks in the snippet become spaces.
pub fn snippet_line(snippet: &str, theme: &Theme) -> Line<'static> {
    let spans: Vec<Span<'static>> = parse_snippet(snippet)
        .into_iter()
        .map(|segment| {
            let style = if segment.highlighted {
                theme.highlight
            } else {
                theme.snippet
            };
            Span::styled(segment.text.replace(['\n', '\r'], " "), style)
        })
        .collect();
    Line::from(spans)
}

/// Title line: selection marker, title (URL when untitled), optional score.
pub fn title_line(item: &ResultItem, selected: bool, show_scores: bool, theme: &Theme) -> Line<'static> {
    let marker = if selected {
        Span::styled("▶ ", theme.selected)
    } else {
        Span::raw("  ")
    };

    let mut spans = vec![
        marker,
        Span::styled(item.display_title().to_string(), theme.title),
    ];
    if show_scores {
        spans.push(Span::styled(format!("  ({:.3})", item.score), theme.muted));
    }
    Line::from(spans)
}

/// Cards for every result on a page, scrolled to keep the selection visible.
pub struct ResultList<'a> {
    page: &'a ResultPage,
    show_scores: bool,
    theme: &'a Theme,
}

impl<'a> ResultList<'a> {
    /// Create new ResultList widget.
    pub fn new(page: &'a ResultPage, show_scores: bool, theme: &'a Theme) -> Self {
        Self {
            page,
            show_scores,
            theme,
        }
    }

    /// Index of the first card drawn when `visible` cards fit.
    fn first_visible(&self, visible: usize) -> usize {
        let selected = self.page.selected();
        if selected >= visible {
            selected + 1 - visible
        } else {
            0
        }
    }

    fn render_card(&self, item: &ResultItem, selected: bool, area: Rect, buf: &mut Buffer) {
        let row = |offset: u16, height: u16, indent: u16| Rect {
            x: area.x + indent,
            y: area.y + offset,
            width: area.width.saturating_sub(indent),
            height: height.min(area.height.saturating_sub(offset)),
        };

        Paragraph::new(title_line(item, selected, self.show_scores, self.theme))
            .render(row(0, 1, 0), buf);
        if area.height > 1 {
            Paragraph::new(Line::styled(item.url.clone(), self.theme.url))
                .render(row(1, 1, MARKER_WIDTH), buf);
        }
        if area.height > 2 {
            Paragraph::new(snippet_line(&item.snippet, self.theme))
                .wrap(Wrap { trim: true })
                .render(row(2, RESULT_CARD_HEIGHT - 3, MARKER_WIDTH), buf);
        }
    }
}

impl Widget for ResultList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let visible = usize::from((area.height / RESULT_CARD_HEIGHT).max(1));
        let first = self.first_visible(visible);
        let bottom = area.y + area.height;

        for (slot, (index, item)) in self
            .page
            .results()
            .iter()
            .enumerate()
            .skip(first)
            .take(visible)
            .enumerate()
        {
            // slot < visible <= area.height / RESULT_CARD_HEIGHT, so this fits in u16.
            let y = area.y + slot as u16 * RESULT_CARD_HEIGHT;
            if y >= bottom {
                break;
            }
            let card = Rect {
                x: area.x,
                y,
                width: area.width,
                height: RESULT_CARD_HEIGHT.min(bottom - y),
            };
            self.render_card(item, index == self.page.selected(), card, buf);
        }
    }
}

#[cfg(test)]
#[path = "result_card_tests.rs"]
mod tests;
