//! Styling for result cards, metrics, and chrome.
//!
//! Colors can be switched off with `--no-color` or `NO_COLOR`; emphasis that
//! carries meaning (highlighted terms, the selected card) survives as
//! modifiers when they are.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    /// Colors on or off, ignoring the environment.
    pub fn fixed(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== Theme =====

/// Every style the renderers use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Result title.
    pub title: Style,
    /// Result URL line.
    pub url: Style,
    /// Snippet body text.
    pub snippet: Style,
    /// Matched terms inside a snippet.
    pub highlight: Style,
    /// Marker in front of the selected result.
    pub selected: Style,
    /// Headings such as "Showing 42 results for ...".
    pub heading: Style,
    /// Hints and secondary text.
    pub muted: Style,
    /// Key names in hints and the help overlay.
    pub key: Style,
    /// Failure notices.
    pub error: Style,
    /// Loading indicator.
    pub loading: Style,
    /// Metric values.
    pub value: Style,
    /// Border of the focused widget.
    pub border_focused: Style,
    /// Border of unfocused widgets.
    pub border: Style,
}

impl Theme {
    /// Styles for the given color configuration.
    pub fn with_color_config(config: ColorConfig) -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        if config.colors_enabled() {
            Self {
                title: bold.fg(Color::Cyan),
                url: Style::default().fg(Color::Green),
                snippet: Style::default(),
                highlight: bold.fg(Color::Yellow),
                selected: bold.fg(Color::Magenta),
                heading: bold,
                muted: Style::default().fg(Color::DarkGray),
                key: bold.fg(Color::Yellow),
                error: Style::default().fg(Color::Red),
                loading: Style::default().fg(Color::Cyan),
                value: bold.fg(Color::Cyan),
                border_focused: Style::default().fg(Color::Cyan),
                border: Style::default().fg(Color::DarkGray),
            }
        } else {
            Self {
                title: bold,
                url: Style::default(),
                snippet: Style::default(),
                highlight: bold,
                selected: bold,
                heading: bold,
                muted: Style::default(),
                key: bold,
                error: bold,
                loading: Style::default(),
                value: bold,
                border_focused: bold,
                border: Style::default(),
            }
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::fixed(true))
    }
}

// ===== Tests =====
