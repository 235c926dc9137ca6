//! Application state and transitions.
//!
//! AppState is the root state type containing all UI state.
//! All state transitions are pure functions following Elm architecture.

use crate::state::SearchSession;
use std::num::NonZeroUsize;

// ===== Focus =====

/// Where keystrokes go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Typing into the search bar. Printable keys edit the query.
    #[default]
    Input,
    /// Browsing results and metrics. Keys go through the key bindings.
    Browse,
}

// ===== AppState =====

/// Application state. Pure data, no side effects.
///
/// Wraps the search session with the UI-only state around it: which widget
/// has keyboard focus and whether the help overlay is open.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    /// Query, screen and request bookkeeping.
    session: SearchSession,

    /// Which widget receives keystrokes.
    pub focus: Focus,

    /// Whether the help overlay is currently visible.
    pub help_visible: bool,
}

impl AppState {
    /// Fresh state: idle screen, search bar focused.
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            session: SearchSession::new(page_size),
            focus: Focus::Input,
            help_visible: false,
        }
    }

    /// The search session.
    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    /// Mutable access to the search session.
    pub fn session_mut(&mut self) -> &mut SearchSession {
        &mut self.session
    }

    /// Send keystrokes to the search bar.
    pub fn focus_input(&mut self) {
        self.focus = Focus::Input;
    }

    /// Send keystrokes to the key bindings.
    pub fn focus_browse(&mut self) {
        self.focus = Focus::Browse;
    }

    /// Show or hide the help overlay.
    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }
}
