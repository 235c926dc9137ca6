//! Layout dimension constants for TUI rendering.

/// Height of the search bar in lines (border + content).
pub const SEARCH_BAR_HEIGHT: u16 = 3;

/// Height of the status bar in lines.
///
/// Single line for loading/failure notices and keyboard hints.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Height of the results heading ("Showing N results for ...").
pub const RESULTS_HEADING_HEIGHT: u16 = 1;

/// Height of the pagination footer.
pub const PAGINATION_HEIGHT: u16 = 1;

/// Lines a result card occupies: title, URL, two snippet lines, spacer.
pub const RESULT_CARD_HEIGHT: u16 = 5;

/// Width of the metrics card in columns.
pub const METRICS_CARD_WIDTH: u16 = 48;

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 60;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;
