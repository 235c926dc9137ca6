//! Help overlay widget displaying keyboard shortcuts.
//!
//! Shows a centered modal overlay with all keyboard shortcuts grouped by category.
//! Triggered by '?' key, dismissed by 'Esc' or '?'.

use super::constants::{HELP_POPUP_HEIGHT_PERCENT, HELP_POPUP_WIDTH_PERCENT};
use super::styles::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Shortcut groups: (category, [(keys, description)]).
const SHORTCUTS: &[(&str, &[(&str, &str)])] = &[
    (
        "Search bar",
        &[
            ("type", "Edit the query"),
            ("Enter", "Search"),
            ("Ctrl+u", "Clear the query and start over"),
            ("Esc/Tab", "Leave the search bar"),
        ],
    ),
    (
        "Results",
        &[
            ("j/↓", "Next result"),
            ("k/↑", "Previous result"),
            ("n/→/PgDn", "Next page"),
            ("p/←/PgUp", "Previous page"),
            ("/ or i", "Edit the query"),
            ("Enter", "Search again"),
            ("r", "Clear the query and start over"),
        ],
    ),
    (
        "Metrics",
        &[("m", "Show crawler metrics"), ("Esc", "Back to the previous screen")],
    ),
    (
        "Application",
        &[("?", "Toggle this help"), ("q/Ctrl+c", "Quit")],
    ),
];

/// Render the help overlay centered on the screen.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme) {
    let popup_area = centered_rect(HELP_POPUP_WIDTH_PERCENT, HELP_POPUP_HEIGHT_PERCENT, frame.area());

    frame.render_widget(Clear, popup_area);

    let help_paragraph = Paragraph::new(build_help_content(theme))
        .block(
            Block::default()
                .title(" Keyboard Shortcuts ")
                .title_bottom(Line::styled(" Press Esc or ? to close ", theme.muted).centered())
                .borders(Borders::ALL)
                .border_style(theme.border_focused),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);
}

/// Calculate the centered rect for the help overlay.
///
/// Returns a Rect that is centered on the screen with the specified
/// percentage of width and height.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x: area.x + popup_x,
        y: area.y + popup_y,
        width: popup_width,
        height: popup_height,
    }
}

/// Build the help content lines grouped by category.
fn build_help_content(theme: &Theme) -> Vec<Line<'static>> {
    let key_width = SHORTCUTS
        .iter()
        .flat_map(|(_, entries)| entries.iter())
        .map(|(keys, _)| keys.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::new();
    for (index, (category, entries)) in SHORTCUTS.iter().enumerate() {
        if index > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::styled(*category, theme.heading));
        for (keys, description) in entries.iter() {
            let padding = key_width - keys.chars().count();
            lines.push(Line::from(vec![
                Span::styled(format!("  {}{}  ", keys, " ".repeat(padding)), theme.key),
                Span::raw(*description),
            ]));
        }
    }
    lines
}

// ===== Tests =====
