//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
/// They apply while browsing; text typed into the search bar never reaches them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Result list
    /// Highlight the next result on the page. Default: j/↓
    SelectNext,
    /// Highlight the previous result on the page. Default: k/↑
    SelectPrevious,

    // Pagination
    /// Fetch the next page of results. Default: n/→/Page Down
    NextPage,
    /// Fetch the previous page of results. Default: p/←/Page Up
    PreviousPage,

    // Search
    /// Move keyboard focus to the search bar. Default: / or i
    FocusSearch,
    /// Re-submit the current query at the current page. Default: Enter
    Submit,
    /// Clear the query and return to the start screen. Default: r
    Reset,

    // Metrics
    /// Fetch and show crawler metrics. Default: m
    ShowMetrics,
    /// Leave the metrics view, restoring the previous screen. Default: Esc/Backspace
    Back,

    // Application
    /// Show help overlay with keyboard shortcuts. Default: ?
    Help,
    /// Exit the application. Default: q/Ctrl+c
    Quit,
}
