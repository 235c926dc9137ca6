//! Metrics card: crawler and search statistics.

use super::constants::METRICS_CARD_WIDTH;
use super::styles::Theme;
use crate::model::MetricsSnapshot;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Caption under the headline number.
pub const HEADLINE_CAPTION: &str = "searches made on OpenSearch";

/// Format a count with `,` thousands separators.
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Labelled figures shown under the headline, in display order.
///
/// Series metrics show their latest sample (0 when the series is empty).
pub fn metric_rows(snapshot: &MetricsSnapshot) -> Vec<(&'static str, String)> {
    vec![
        (
            "Total pages crawled",
            format_count(snapshot.latest_pages_crawled()),
        ),
        ("Latest queue size", format_count(snapshot.latest_queue_size())),
        ("Duplicates avoided", format_count(snapshot.duplicates_avoided)),
        (
            "Pages skipped (language)",
            format_count(snapshot.pages_skipped_for_language),
        ),
        ("Pages skipped (errors)", format_count(snapshot.page_errors)),
    ]
}

/// Bordered card with the number of searches as headline.
pub struct MetricsCard<'a> {
    snapshot: &'a MetricsSnapshot,
    theme: &'a Theme,
}

impl<'a> MetricsCard<'a> {
    /// Create new MetricsCard widget.
    pub fn new(snapshot: &'a MetricsSnapshot, theme: &'a Theme) -> Self {
        Self { snapshot, theme }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let rows = metric_rows(self.snapshot);
        let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

        let mut lines = vec![
            Line::styled(
                format_count(self.snapshot.number_of_searches),
                self.theme.value,
            )
            .alignment(Alignment::Center),
            Line::styled(HEADLINE_CAPTION, self.theme.muted).alignment(Alignment::Center),
            Line::default(),
        ];
        lines.extend(rows.into_iter().map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{:<width$}  ", label, width = label_width), self.theme.heading),
                Span::styled(value, self.theme.value),
            ])
        }));
        lines
    }
}

impl Widget for MetricsCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = METRICS_CARD_WIDTH.min(area.width);
        let card = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y,
            width,
            height: area.height.min(10),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_focused)
            .title(" Crawler metrics ")
            .title_bottom(Line::styled(" Esc to go back ", self.theme.muted).right_aligned());

        Paragraph::new(self.lines()).block(block).render(card, buf);
    }
}
