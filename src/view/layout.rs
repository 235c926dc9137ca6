//! Screen layout rendering.
//!
//! Header, search bar, the body selected by the session's view mode, and a
//! status bar. Pure with respect to state: everything drawn is read from
//! `AppState`.

use super::constants::{
    PAGINATION_HEIGHT, RESULTS_HEADING_HEIGHT, SEARCH_BAR_HEIGHT, STATUS_BAR_HEIGHT,
};
use super::help::render_help_overlay;
use super::metrics_card::{format_count, MetricsCard};
use super::result_card::ResultList;
use super::search_bar::SearchBar;
use super::styles::Theme;
use crate::model::FailureKind;
use crate::state::{AppState, Focus, Pagination, RequestKind, Screen, SearchScreen, SearchSession};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Rendering settings that do not change while the app runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOptions {
    /// Show relevance scores on result cards.
    pub show_scores: bool,
    /// Start screen tagline.
    pub tagline: String,
    /// Styles for every widget.
    pub theme: Theme,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            show_scores: false,
            tagline: crate::config::loader::DEFAULT_TAGLINE.to_string(),
            theme: Theme::default(),
        }
    }
}

/// Render the whole screen.
pub fn render_layout(frame: &mut Frame, state: &AppState, options: &ViewOptions) {
    let [header_area, search_area, body_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(SEARCH_BAR_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(STATUS_BAR_HEIGHT),
    ])
    .areas(frame.area());

    let theme = &options.theme;
    let session = state.session();

    frame.render_widget(
        Paragraph::new(Line::styled(" OpenSearch", theme.heading)),
        header_area,
    );
    frame.render_widget(
        SearchBar::new(session.input(), state.focus == Focus::Input, theme),
        search_area,
    );

    match session.screen() {
        Screen::Idle => render_idle(frame, body_area, state.focus, options),
        Screen::Search(SearchScreen::Results(page)) => {
            let [heading_area, list_area, pagination_area] = Layout::vertical([
                Constraint::Length(RESULTS_HEADING_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(PAGINATION_HEIGHT),
            ])
            .areas(body_area);

            frame.render_widget(
                Paragraph::new(Line::styled(
                    results_heading(page.total_results(), page.query().as_str()),
                    theme.heading,
                )),
                heading_area,
            );
            frame.render_widget(ResultList::new(page, options.show_scores, theme), list_area);
            if let Some(pagination) = session.pagination() {
                frame.render_widget(
                    Paragraph::new(pagination_line(pagination, theme)).alignment(Alignment::Center),
                    pagination_area,
                );
            }
        }
        Screen::Search(SearchScreen::Empty(empty)) => {
            frame.render_widget(
                Paragraph::new(vec![
                    Line::default(),
                    Line::styled(empty_message(empty.query().as_str()), theme.heading),
                ])
                .alignment(Alignment::Center),
                body_area,
            );
        }
        Screen::Metrics(metrics) => {
            frame.render_widget(MetricsCard::new(metrics.snapshot(), theme), body_area);
        }
    }

    let (status, status_style) = status_line(session, state.focus, theme);
    frame.render_widget(Paragraph::new(Line::styled(status, status_style)), status_area);

    if state.help_visible {
        render_help_overlay(frame, theme);
    }
}

/// Heading above a results page.
pub fn results_heading(total_results: usize, query: &str) -> String {
    let noun = if total_results == 1 { "result" } else { "results" };
    format!(
        "Showing {} {} for {}",
        format_count(total_results as u64),
        noun,
        query
    )
}

/// Message shown when a search matched nothing.
pub fn empty_message(query: &str) -> String {
    format!("No matching results for {}", query)
}

/// Previous/next controls with the page indicator.
pub fn pagination_line(pagination: Pagination, theme: &Theme) -> Line<'static> {
    let control = |label: &'static str, enabled: bool| {
        let style = if enabled { theme.key } else { theme.muted };
        Span::styled(label, style)
    };

    Line::from(vec![
        control("◀ Previous", pagination.previous_enabled),
        Span::raw(format!(
            "   Page {} of {}   ",
            pagination.page, pagination.page_count
        )),
        control("Next ▶", pagination.next_enabled),
    ])
}

/// Status bar text: loading, then failure, then key hints.
pub fn status_line(session: &SearchSession, focus: Focus, theme: &Theme) -> (String, Style) {
    match session.pending() {
        Some(RequestKind::Search) => return (" Searching...".to_string(), theme.loading),
        Some(RequestKind::Metrics) => return (" Loading metrics...".to_string(), theme.loading),
        None => {}
    }

    if let Some(notice) = session.failure() {
        let what = match notice.kind {
            RequestKind::Search => "Search failed",
            RequestKind::Metrics => "Could not load metrics",
        };
        let why = match notice.error.kind() {
            FailureKind::Network => "search service unreachable",
            FailureKind::BadResponse => "unexpected response from search service",
        };
        return (
            format!(" {}: {} ({})", what, why, notice.error),
            theme.error,
        );
    }

    let hints = match (focus, session.show_metrics()) {
        (Focus::Input, _) => " Enter search · Esc browse · ? help · Ctrl+c quit",
        (Focus::Browse, true) => " Esc back · / search · ? help · q quit",
        (Focus::Browse, false) => " n/p page · j/k select · m metrics · / search · ? help · q quit",
    };
    (hints.to_string(), theme.muted)
}

/// Start screen: tagline and the ways in.
fn render_idle(frame: &mut Frame, area: Rect, focus: Focus, options: &ViewOptions) {
    let theme = &options.theme;
    let affordances = match focus {
        Focus::Input => "[Enter] search    [Esc] then [m] metrics",
        Focus::Browse => "[/] type a query    [m] metrics",
    };

    let lines = vec![
        Line::default(),
        Line::styled(options.tagline.clone(), theme.heading),
        Line::default(),
        Line::styled(affordances, theme.key),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
